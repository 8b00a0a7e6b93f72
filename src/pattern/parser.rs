use crate::pattern::ast::{
    AltNode, LiteralNode, Node, NodeId, NodeKind, PathNode, PathSegmentNode, PatternAst,
    RegExpNode, VariableNode, WildcardNode,
};
use crate::pattern::lexer::{LexHalt, Token, TokenKind, Tokenized, tokenize};
use crate::pattern::{PatternError, PatternResult};

/// Parses a pattern into its AST. Any syntax problem rejects the whole
/// pattern; there is no partial result.
#[tracing::instrument(level = "trace", fields(pattern = %pattern))]
pub fn parse_pattern(pattern: &str) -> PatternResult<PatternAst> {
    let Tokenized {
        tokens,
        consumed,
        halt,
    } = tokenize(pattern);

    let mut builder = PatternBuilder::new(pattern);
    let result = tokens
        .into_iter()
        .try_for_each(|token| builder.apply(token))
        .and_then(|()| builder.finish(consumed, halt));

    if let Err(err) = &result {
        tracing::event!(
            tracing::Level::DEBUG,
            operation = "parse_pattern",
            offset = err.offset() as u64,
            error = %err
        );
    }

    result
}

/// Where an attached node goes, decided before it is allocated.
enum Slot {
    Constraint,
    NewSegment,
    Append,
}

struct PatternBuilder<'a> {
    pattern: &'a str,
    ast: PatternAst,
    cursor: NodeId,
    alt_depth: usize,
}

impl<'a> PatternBuilder<'a> {
    fn new(pattern: &'a str) -> Self {
        let ast = PatternAst::new();
        let cursor = ast.root();
        Self {
            pattern,
            ast,
            cursor,
            alt_depth: 0,
        }
    }

    fn apply(&mut self, token: Token<'_>) -> PatternResult<()> {
        let Token { kind, start, end } = token;
        match kind {
            TokenKind::Variable(name) => self.on_variable(name, start, end),
            TokenKind::AltStart => self.on_alt_start(start, end),
            TokenKind::AltSeparator => self.on_alt_separator(start, end),
            TokenKind::AltEnd => self.on_alt_end(start, end),
            TokenKind::PathSeparator => {
                self.on_path_separator(start, end);
                Ok(())
            }
            TokenKind::Wildcard { greedy } => self
                .attach(Node::new(
                    NodeKind::Wildcard(WildcardNode { greedy }),
                    start,
                    end,
                ))
                .map(drop),
            TokenKind::RegExp {
                source,
                group_count,
            } => self
                .attach(Node::new(
                    NodeKind::RegExp(RegExpNode {
                        source: source.to_string(),
                        group_count,
                    }),
                    start,
                    end,
                ))
                .map(drop),
            TokenKind::Literal(value) => self
                .attach(Node::new(
                    NodeKind::Literal(LiteralNode {
                        value: value.into_owned(),
                    }),
                    start,
                    end,
                ))
                .map(drop),
        }
    }

    fn finish(self, consumed: usize, halt: Option<LexHalt>) -> PatternResult<PatternAst> {
        let pattern = self.pattern.to_string();
        match halt {
            Some(LexHalt::Literal) => {
                return Err(PatternError::UnterminatedLiteral {
                    pattern,
                    offset: consumed,
                });
            }
            Some(LexHalt::RegExp) => {
                return Err(PatternError::UnterminatedRegExp {
                    pattern,
                    offset: consumed,
                });
            }
            None => {}
        }

        if consumed < self.pattern.len() {
            return Err(PatternError::TrailingUnparsableInput {
                pattern,
                offset: consumed,
            });
        }

        if self.alt_depth != 0 {
            return Err(PatternError::UnterminatedAlternation {
                pattern,
                depth: self.alt_depth,
                offset: self.pattern.len(),
            });
        }

        Ok(self.ast)
    }

    fn on_variable(&mut self, name: &str, start: usize, end: usize) -> PatternResult<()> {
        if let NodeKind::Variable(previous) = &self.ast.node(self.cursor).kind
            && previous.constraint.is_none()
        {
            return Err(PatternError::AmbiguousVariableSequence {
                pattern: self.pattern.to_string(),
                name: name.to_string(),
                previous: previous.name.clone(),
                offset: start,
            });
        }

        let id = self.attach(Node::new(
            NodeKind::Variable(VariableNode::new(name.to_string())),
            start,
            end,
        ))?;
        self.cursor = id;
        Ok(())
    }

    fn on_alt_start(&mut self, start: usize, end: usize) -> PatternResult<()> {
        self.alt_depth += 1;
        let alt = self.attach(Node::new(NodeKind::Alt(AltNode::default()), start, end))?;
        let branch = self
            .ast
            .alloc(Node::new(NodeKind::Path(PathNode::default()), end, end));
        self.link(alt, branch);
        self.cursor = branch;
        Ok(())
    }

    fn on_alt_separator(&mut self, start: usize, end: usize) -> PatternResult<()> {
        let alt = self.enclosing_alt(',', start)?;
        let branch = self
            .ast
            .alloc(Node::new(NodeKind::Path(PathNode::default()), end, end));
        self.link(alt, branch);
        self.ast.extend_end(branch, end);
        self.cursor = branch;
        Ok(())
    }

    fn on_alt_end(&mut self, start: usize, end: usize) -> PatternResult<()> {
        let alt = self.enclosing_alt('}', start)?;
        self.alt_depth -= 1;
        self.ast.extend_end(alt, end);

        let root = self.ast.root();
        let parent = self.ast.parent(alt).unwrap_or(root);
        // An alternation used as a constraint closes its variable.
        self.cursor = match self.ast.node(parent).kind {
            NodeKind::Variable(_) => self.ast.parent(parent).unwrap_or(root),
            _ => parent,
        };
        Ok(())
    }

    fn on_path_separator(&mut self, start: usize, end: usize) {
        let path = std::iter::once(self.cursor)
            .chain(self.ast.ancestors(self.cursor))
            .find(|&id| matches!(self.ast.node(id).kind, NodeKind::Path(_)))
            .unwrap_or(self.ast.root());

        if self.ast.children(path).is_empty() {
            let node = self.ast.node_mut(path);
            node.start = start;
            if let NodeKind::Path(path_node) = &mut node.kind {
                path_node.absolute = true;
            }
        }

        let segment = self.ast.alloc(Node::new(
            NodeKind::PathSegment(PathSegmentNode::default()),
            start,
            end,
        ));
        self.link(path, segment);
        self.ast.extend_end(segment, end);
        self.cursor = segment;
    }

    /// Places `node` relative to the cursor: as the constraint of a waiting
    /// variable, or as the next item of the current segment.
    fn attach(&mut self, node: Node) -> PatternResult<NodeId> {
        let (start, end) = (node.start, node.end);
        let cursor = self.cursor;

        let slot = match &self.ast.node(cursor).kind {
            NodeKind::Variable(variable) if variable.constraint.is_none() => Slot::Constraint,
            NodeKind::Variable(variable) => {
                return Err(PatternError::ConstraintRedefined {
                    pattern: self.pattern.to_string(),
                    name: variable.name.clone(),
                    offset: start,
                });
            }
            NodeKind::Path(_) => Slot::NewSegment,
            NodeKind::PathSegment(_) => Slot::Append,
            _ => {
                return Err(PatternError::UnexpectedSyntax {
                    pattern: self.pattern.to_string(),
                    offset: start,
                });
            }
        };

        let id = self.ast.alloc(node);
        match slot {
            Slot::Constraint => {
                let stored = self.ast.set_constraint(cursor, id);
                debug_assert!(stored, "variable constraint slot was checked empty");
                self.ast.extend_end(cursor, end);
                self.cursor = self.ast.parent(cursor).unwrap_or(self.ast.root());
            }
            Slot::NewSegment => {
                if self.ast.children(cursor).is_empty() {
                    self.ast.node_mut(cursor).start = start;
                }
                let segment = self.ast.alloc(Node::new(
                    NodeKind::PathSegment(PathSegmentNode::default()),
                    start,
                    end,
                ));
                self.link(cursor, segment);
                self.link(segment, id);
                self.ast.extend_end(segment, end);
                self.cursor = segment;
            }
            Slot::Append => {
                self.link(cursor, id);
                self.ast.extend_end(cursor, end);
            }
        }

        Ok(id)
    }

    fn enclosing_alt(&self, token: char, offset: usize) -> PatternResult<NodeId> {
        self.ast
            .nearest_alt(self.cursor)
            .ok_or_else(|| PatternError::UnexpectedAlternationToken {
                pattern: self.pattern.to_string(),
                token,
                offset,
            })
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        let linked = self.ast.append_child(parent, child);
        debug_assert!(linked, "container kinds are checked before linking");
    }
}
