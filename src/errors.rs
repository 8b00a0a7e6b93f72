use crate::options::OptionsError;
use crate::pattern::PatternError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type CompileResult<T> = Result<T, CompileError>;
