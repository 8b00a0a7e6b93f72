mod ast;
mod compiler;
mod error;
mod lexer;
mod matcher;
mod parser;
mod visitor;

pub use ast::{
    AltNode, LiteralNode, Node, NodeId, NodeKind, NodeList, PathNode, PathSegmentNode,
    PatternAst, RegExpNode, VariableNode, WildcardNode,
};
pub use compiler::{CompiledPattern, GroupMap, compile_pattern_ast, escape_literal};
pub use error::{PatternError, PatternResult};
pub use lexer::{LexHalt, Token, TokenKind, Tokenized, decode_literal, tokenize};
pub use matcher::{PatternMatch, PatternRegex};
pub use parser::parse_pattern;
pub use visitor::{Next, PatternVisitor, visit, walk};
