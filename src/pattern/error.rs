use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("quoted literal starting at {offset} in pattern '{pattern}' is not terminated")]
    UnterminatedLiteral { pattern: String, offset: usize },
    #[error("inline regex starting at {offset} in pattern '{pattern}' has unbalanced parentheses")]
    UnterminatedRegExp { pattern: String, offset: usize },
    #[error("unexpected alternation token '{token}' at {offset} in pattern '{pattern}'")]
    UnexpectedAlternationToken {
        pattern: String,
        token: char,
        offset: usize,
    },
    #[error("{depth} alternation(s) left open at end of pattern '{pattern}' (offset {offset})")]
    UnterminatedAlternation {
        pattern: String,
        depth: usize,
        offset: usize,
    },
    #[error(
        "variable '{name}' at {offset} directly follows unconstrained variable '{previous}' in pattern '{pattern}'"
    )]
    AmbiguousVariableSequence {
        pattern: String,
        name: String,
        previous: String,
        offset: usize,
    },
    #[error("variable '{name}' already has a constraint; second constraint at {offset} in pattern '{pattern}'")]
    ConstraintRedefined {
        pattern: String,
        name: String,
        offset: usize,
    },
    #[error("unexpected syntax at {offset} in pattern '{pattern}'")]
    UnexpectedSyntax { pattern: String, offset: usize },
    #[error("unparsable input after {offset} in pattern '{pattern}'")]
    TrailingUnparsableInput { pattern: String, offset: usize },
}

impl PatternError {
    pub fn offset(&self) -> usize {
        match self {
            Self::UnterminatedLiteral { offset, .. }
            | Self::UnterminatedRegExp { offset, .. }
            | Self::UnexpectedAlternationToken { offset, .. }
            | Self::UnterminatedAlternation { offset, .. }
            | Self::AmbiguousVariableSequence { offset, .. }
            | Self::ConstraintRedefined { offset, .. }
            | Self::UnexpectedSyntax { offset, .. }
            | Self::TrailingUnparsableInput { offset, .. } => *offset,
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            Self::UnterminatedLiteral { pattern, .. }
            | Self::UnterminatedRegExp { pattern, .. }
            | Self::UnexpectedAlternationToken { pattern, .. }
            | Self::UnterminatedAlternation { pattern, .. }
            | Self::AmbiguousVariableSequence { pattern, .. }
            | Self::ConstraintRedefined { pattern, .. }
            | Self::UnexpectedSyntax { pattern, .. }
            | Self::TrailingUnparsableInput { pattern, .. } => pattern,
        }
    }
}

pub type PatternResult<T> = Result<T, PatternError>;
