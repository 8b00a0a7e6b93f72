use hashbrown::HashMap;

use crate::options::{CompileOptions, PATH_SEPARATOR};
use crate::pattern::PatternRegex;
use crate::pattern::ast::{
    AltNode, LiteralNode, NodeId, NodeKind, PathNode, PathSegmentNode, PatternAst, RegExpNode,
    VariableNode, WildcardNode,
};
use crate::pattern::visitor::{Next, PatternVisitor, walk};

/// Variable name to 1-based capture group index.
pub type GroupMap = HashMap<String, usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    group_map: GroupMap,
    capture_count: usize,
    case_insensitive: bool,
}

impl CompiledPattern {
    /// Unanchored regex source.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn group_map(&self) -> &GroupMap {
        &self.group_map
    }

    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.group_map.get(name).copied()
    }

    /// Capture groups in `source`, counting both variables and groups inside
    /// inline regex fragments.
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn has_variables(&self) -> bool {
        !self.group_map.is_empty()
    }

    pub fn into_parts(self) -> (String, GroupMap) {
        (self.source, self.group_map)
    }

    pub fn to_regex(&self) -> Result<PatternRegex, regex::Error> {
        PatternRegex::new(self)
    }
}

/// Escapes regex metacharacters in literal text.
pub fn escape_literal(text: &str) -> String {
    regex::escape(text)
}

#[tracing::instrument(level = "trace", skip(ast, options), fields(nodes = ast.len() as u64))]
pub fn compile_pattern_ast(ast: &PatternAst, options: &CompileOptions) -> CompiledPattern {
    let mut emitter = RegexEmitter {
        options,
        source: String::new(),
        group_index: 1,
        group_map: GroupMap::new(),
    };
    walk(ast, &mut emitter);

    tracing::event!(
        tracing::Level::TRACE,
        operation = "compile_pattern_ast",
        source = %emitter.source,
        groups = (emitter.group_index - 1) as u64
    );

    CompiledPattern {
        source: emitter.source,
        group_map: emitter.group_map,
        capture_count: emitter.group_index - 1,
        case_insensitive: options.case_insensitive,
    }
}

struct RegexEmitter<'o> {
    options: &'o CompileOptions,
    source: String,
    group_index: usize,
    group_map: GroupMap,
}

impl PatternVisitor for RegexEmitter<'_> {
    fn visit_path(&mut self, ast: &PatternAst, id: NodeId, _node: &PathNode, next: Next<'_>) {
        let is_branch = ast
            .parent(id)
            .is_some_and(|parent| matches!(ast.node(parent).kind, NodeKind::Alt(_)));
        if is_branch && !ast.is_first_child(id) {
            self.source.push('|');
        }
        next.run(self);
    }

    fn visit_path_segment(
        &mut self,
        ast: &PatternAst,
        id: NodeId,
        _node: &PathSegmentNode,
        next: Next<'_>,
    ) {
        let absolute = ast.parent(id).is_some_and(|parent| {
            matches!(&ast.node(parent).kind, NodeKind::Path(path) if path.absolute)
        });
        if absolute || !ast.is_first_child(id) {
            self.source.push(PATH_SEPARATOR);
        }
        next.run(self);
    }

    fn visit_alt(&mut self, _ast: &PatternAst, _id: NodeId, _node: &AltNode, next: Next<'_>) {
        self.source.push_str("(?:");
        next.run(self);
        self.source.push(')');
    }

    fn visit_variable(
        &mut self,
        _ast: &PatternAst,
        _id: NodeId,
        node: &VariableNode,
        next: Next<'_>,
    ) {
        self.group_map.insert(node.name.clone(), self.group_index);
        self.group_index += 1;

        self.source.push('(');
        if next.is_empty() {
            self.source.push_str(&self.options.variable_pattern);
        } else {
            next.run(self);
        }
        self.source.push(')');
    }

    fn visit_wildcard(&mut self, _ast: &PatternAst, _id: NodeId, node: &WildcardNode) {
        self.source
            .push_str(self.options.wildcard_quantifier.pattern(node.greedy));
    }

    fn visit_reg_exp(&mut self, _ast: &PatternAst, _id: NodeId, node: &RegExpNode) {
        self.group_index += node.group_count;
        self.source.push_str("(?:");
        self.source.push_str(&node.source);
        self.source.push(')');
    }

    fn visit_literal(&mut self, _ast: &PatternAst, _id: NodeId, node: &LiteralNode) {
        self.source.push_str(&escape_literal(&node.value));
    }
}
