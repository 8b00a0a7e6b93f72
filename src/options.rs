use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sub-pattern for a variable without a constraint.
pub const DEFAULT_VARIABLE_PATTERN: &str = "[^/]*";
pub const PATH_SEPARATOR: char = '/';

/// Minimum length matched by `*` and `**`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WildcardQuantifier {
    #[default]
    OneOrMore,
    ZeroOrMore,
}

impl WildcardQuantifier {
    /// `*`: lazy run inside one segment.
    pub fn segment_pattern(self) -> &'static str {
        match self {
            Self::OneOrMore => "[^/]+?",
            Self::ZeroOrMore => "[^/]*?",
        }
    }

    /// `**`: may cross path separators.
    pub fn greedy_pattern(self) -> &'static str {
        match self {
            Self::OneOrMore => ".+",
            Self::ZeroOrMore => ".*",
        }
    }

    pub fn pattern(self, greedy: bool) -> &'static str {
        if greedy {
            self.greedy_pattern()
        } else {
            self.segment_pattern()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompileOptions {
    /// Only toggles the regex engine flag; the emitted source is unchanged.
    pub case_insensitive: bool,
    pub wildcard_quantifier: WildcardQuantifier,
    pub variable_pattern: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            wildcard_quantifier: WildcardQuantifier::default(),
            variable_pattern: DEFAULT_VARIABLE_PATTERN.to_string(),
        }
    }
}

impl CompileOptions {
    pub fn builder() -> CompileOptionsBuilder {
        CompileOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.variable_pattern.trim().is_empty() {
            return Err(OptionsError::EmptyVariablePattern);
        }
        let source = format!("^(?:{})$", self.variable_pattern);
        if let Err(err) = Regex::new(&source) {
            return Err(OptionsError::InvalidVariablePattern {
                pattern: self.variable_pattern.clone(),
                error: err.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CompileOptionsBuilder {
    options: CompileOptions,
}

impl CompileOptionsBuilder {
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.options.case_insensitive = value;
        self
    }

    pub fn wildcard_quantifier(mut self, value: WildcardQuantifier) -> Self {
        self.options.wildcard_quantifier = value;
        self
    }

    pub fn variable_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.options.variable_pattern = pattern.into();
        self
    }

    pub fn build(self) -> Result<CompileOptions, OptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("variable_pattern must not be empty")]
    EmptyVariablePattern,
    #[error("variable_pattern '{pattern}' is not a valid regex: {error}")]
    InvalidVariablePattern { pattern: String, error: String },
}
