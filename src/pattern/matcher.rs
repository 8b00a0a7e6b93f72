use hashbrown::HashMap;
use regex::{Regex, RegexBuilder};

use super::{CompiledPattern, GroupMap};

/// A compiled pattern bound to the `regex` engine, anchored at the start of
/// the haystack.
#[derive(Debug, Clone)]
pub struct PatternRegex {
    regex: Regex,
    group_map: GroupMap,
}

impl PatternRegex {
    #[tracing::instrument(level = "trace", skip(compiled), fields(source = %compiled.source()))]
    pub fn new(compiled: &CompiledPattern) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&format!("^{}", compiled.source()))
            .case_insensitive(compiled.case_insensitive())
            .build()?;

        Ok(Self {
            regex,
            group_map: compiled.group_map().clone(),
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn group_map(&self) -> &GroupMap {
        &self.group_map
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Named results merge the regex's own named groups with variable groups;
    /// a variable shadows a native group of the same name.
    pub fn captures<'h>(&self, haystack: &'h str) -> Option<PatternMatch<'h>> {
        let captures = self.regex.captures(haystack)?;
        let whole = captures.get(0)?;

        let mut params = HashMap::new();
        for name in self.regex.capture_names().flatten() {
            if let Some(found) = captures.name(name) {
                params.insert(name.to_string(), found.as_str());
            }
        }

        for (name, &index) in &self.group_map {
            match captures.get(index) {
                Some(found) => {
                    params.insert(name.clone(), found.as_str());
                }
                None => {
                    params.remove(name);
                }
            }
        }

        Some(PatternMatch {
            matched: whole.as_str(),
            end: whole.end(),
            params,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'h> {
    matched: &'h str,
    end: usize,
    params: HashMap<String, &'h str>,
}

impl<'h> PatternMatch<'h> {
    pub fn as_str(&self) -> &'h str {
        self.matched
    }

    /// Byte offset just past the match; the match always starts at 0.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn get(&self, name: &str) -> Option<&'h str> {
        self.params.get(name).copied()
    }

    pub fn params(&self) -> &HashMap<String, &'h str> {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
