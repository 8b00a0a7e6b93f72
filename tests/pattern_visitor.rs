use bunner_path_pattern::pattern::{
    AltNode, LiteralNode, Next, NodeId, PatternAst, PatternVisitor, VariableNode, WildcardNode,
    parse_pattern, visit, walk,
};

#[derive(Default)]
struct VariableNames(Vec<String>);

impl PatternVisitor for VariableNames {
    fn visit_variable(
        &mut self,
        _ast: &PatternAst,
        _id: NodeId,
        node: &VariableNode,
        next: Next<'_>,
    ) {
        self.0.push(node.name.clone());
        next.run(self);
    }
}

#[derive(Default)]
struct Trace(Vec<String>);

impl PatternVisitor for Trace {
    fn visit_alt(&mut self, _ast: &PatternAst, _id: NodeId, node: &AltNode, next: Next<'_>) {
        self.0.push(format!("alt<{}", node.branches.len()));
        next.run(self);
        self.0.push("alt>".to_string());
    }

    fn visit_wildcard(&mut self, _ast: &PatternAst, _id: NodeId, node: &WildcardNode) {
        self.0.push(if node.greedy { "**" } else { "*" }.to_string());
    }

    fn visit_literal(&mut self, _ast: &PatternAst, _id: NodeId, node: &LiteralNode) {
        self.0.push(node.value.clone());
    }
}

#[test]
fn default_callbacks_descend_into_constraints() {
    let ast = parse_pattern("/:a{:b/x,:c(\\d+)}/:d").expect("pattern should parse");
    let mut names = VariableNames::default();
    walk(&ast, &mut names);
    assert_eq!(names.0, vec!["a", "b", "c", "d"]);
}

#[test]
fn continuation_runs_between_before_and_after_hooks() {
    let ast = parse_pattern("x{y,*}**").expect("pattern should parse");
    let mut trace = Trace::default();
    walk(&ast, &mut trace);
    assert_eq!(trace.0, vec!["x", "alt<2", "y", "*", "alt>", "**"]);
}

#[derive(Default)]
struct SkipChildren(usize);

impl PatternVisitor for SkipChildren {
    fn visit_alt(&mut self, _ast: &PatternAst, _id: NodeId, _node: &AltNode, _next: Next<'_>) {
        self.0 += 1;
    }

    fn visit_literal(&mut self, _ast: &PatternAst, _id: NodeId, _node: &LiteralNode) {
        self.0 += 100;
    }
}

#[test]
fn skipping_the_continuation_prunes_the_subtree() {
    let ast = parse_pattern("{a,b}").expect("pattern should parse");
    let mut counter = SkipChildren::default();
    visit(&ast, ast.root(), &mut counter);
    assert_eq!(counter.0, 1);
}
