use smallvec::SmallVec;

/// Index of a node inside a [`PatternAst`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub type NodeList = SmallVec<[NodeId; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathNode {
    pub children: NodeList,
    pub absolute: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegmentNode {
    pub children: NodeList,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AltNode {
    pub branches: NodeList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNode {
    pub name: String,
    pub constraint: Option<NodeId>,
}

impl VariableNode {
    pub fn new(name: String) -> Self {
        Self {
            name,
            constraint: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WildcardNode {
    pub greedy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExpNode {
    pub source: String,
    pub group_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralNode {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Path(PathNode),
    PathSegment(PathSegmentNode),
    Alt(AltNode),
    Variable(VariableNode),
    Wildcard(WildcardNode),
    RegExp(RegExpNode),
    Literal(LiteralNode),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::PathSegment(_) => "path_segment",
            Self::Alt(_) => "alt",
            Self::Variable(_) => "variable",
            Self::Wildcard(_) => "wildcard",
            Self::RegExp(_) => "reg_exp",
            Self::Literal(_) => "literal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub start: usize,
    pub end: usize,
}

impl Node {
    pub fn new(kind: NodeKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            parent: None,
            start,
            end,
        }
    }

    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// A parsed pattern. Nodes are owned by the arena; `parent` links are plain
/// indices. The root is always a `Path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternAst {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for PatternAst {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternAst {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Path(PathNode::default()), 0, 0)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True for a pattern with no content, e.g. `""` or `"  "`.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Path and segment children, alternation branches, or a variable's
    /// constraint.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).kind {
            NodeKind::Path(path) => path.children.as_slice(),
            NodeKind::PathSegment(segment) => segment.children.as_slice(),
            NodeKind::Alt(alt) => alt.branches.as_slice(),
            NodeKind::Variable(variable) => variable.constraint.as_slice(),
            NodeKind::Wildcard(_) | NodeKind::RegExp(_) | NodeKind::Literal(_) => &[],
        }
    }

    pub fn is_first_child(&self, id: NodeId) -> bool {
        self.parent(id)
            .is_some_and(|parent| self.children(parent).first() == Some(&id))
    }

    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Nearest `Alt` at or above `id`.
    pub fn nearest_alt(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&candidate| matches!(self.node(candidate).kind, NodeKind::Alt(_)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Appends `child` to a path, segment or alternation. Returns false for
    /// any other parent kind.
    #[must_use]
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let appended = match &mut self.node_mut(parent).kind {
            NodeKind::Path(path) => {
                path.children.push(child);
                true
            }
            NodeKind::PathSegment(segment) => {
                segment.children.push(child);
                true
            }
            NodeKind::Alt(alt) => {
                alt.branches.push(child);
                true
            }
            _ => false,
        };
        if appended {
            self.node_mut(child).parent = Some(parent);
        }
        appended
    }

    /// Stores `constraint` on a variable. Returns false when the variable
    /// already has one; the existing constraint is kept.
    #[must_use]
    pub(crate) fn set_constraint(&mut self, variable: NodeId, constraint: NodeId) -> bool {
        let stored = match &mut self.node_mut(variable).kind {
            NodeKind::Variable(node) if node.constraint.is_none() => {
                node.constraint = Some(constraint);
                true
            }
            _ => false,
        };
        if stored {
            self.node_mut(constraint).parent = Some(variable);
        }
        stored
    }

    /// Moves the end of `id` and of all its ancestors to `end`.
    pub(crate) fn extend_end(&mut self, id: NodeId, end: usize) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node_mut(node_id);
            node.end = node.end.max(end);
            current = node.parent;
        }
    }
}
