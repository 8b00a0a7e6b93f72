use crate::pattern::ast::{
    AltNode, LiteralNode, NodeId, NodeKind, PathNode, PathSegmentNode, PatternAst, RegExpNode,
    VariableNode, WildcardNode,
};

/// Continuation handed to composite nodes. Running it visits the node's
/// children, or a variable's constraint, with the given visitor.
#[derive(Debug, Clone, Copy)]
pub struct Next<'a> {
    ast: &'a PatternAst,
    targets: &'a [NodeId],
}

impl Next<'_> {
    pub fn run<V: PatternVisitor + ?Sized>(self, visitor: &mut V) {
        for &id in self.targets {
            visit(self.ast, id, visitor);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Per-kind callbacks for [`visit`]. Composite kinds descend by default;
/// leaf kinds do nothing.
pub trait PatternVisitor {
    fn visit_path(&mut self, ast: &PatternAst, id: NodeId, node: &PathNode, next: Next<'_>) {
        let _ = (ast, id, node);
        next.run(self);
    }

    fn visit_path_segment(
        &mut self,
        ast: &PatternAst,
        id: NodeId,
        node: &PathSegmentNode,
        next: Next<'_>,
    ) {
        let _ = (ast, id, node);
        next.run(self);
    }

    fn visit_alt(&mut self, ast: &PatternAst, id: NodeId, node: &AltNode, next: Next<'_>) {
        let _ = (ast, id, node);
        next.run(self);
    }

    fn visit_variable(
        &mut self,
        ast: &PatternAst,
        id: NodeId,
        node: &VariableNode,
        next: Next<'_>,
    ) {
        let _ = (ast, id, node);
        next.run(self);
    }

    fn visit_wildcard(&mut self, ast: &PatternAst, id: NodeId, node: &WildcardNode) {
        let _ = (ast, id, node);
    }

    fn visit_reg_exp(&mut self, ast: &PatternAst, id: NodeId, node: &RegExpNode) {
        let _ = (ast, id, node);
    }

    fn visit_literal(&mut self, ast: &PatternAst, id: NodeId, node: &LiteralNode) {
        let _ = (ast, id, node);
    }
}

pub fn visit<V: PatternVisitor + ?Sized>(ast: &PatternAst, id: NodeId, visitor: &mut V) {
    let next = Next {
        ast,
        targets: ast.children(id),
    };
    match &ast.node(id).kind {
        NodeKind::Path(node) => visitor.visit_path(ast, id, node, next),
        NodeKind::PathSegment(node) => visitor.visit_path_segment(ast, id, node, next),
        NodeKind::Alt(node) => visitor.visit_alt(ast, id, node, next),
        NodeKind::Variable(node) => visitor.visit_variable(ast, id, node, next),
        NodeKind::Wildcard(node) => visitor.visit_wildcard(ast, id, node),
        NodeKind::RegExp(node) => visitor.visit_reg_exp(ast, id, node),
        NodeKind::Literal(node) => visitor.visit_literal(ast, id, node),
    }
}

/// Visits the whole tree from its root.
pub fn walk<V: PatternVisitor + ?Sized>(ast: &PatternAst, visitor: &mut V) {
    visit(ast, ast.root(), visitor);
}
