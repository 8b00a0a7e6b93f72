pub mod errors;
pub mod options;
pub mod pattern;

pub use errors::{CompileError, CompileResult};
pub use options::{
    CompileOptions, CompileOptionsBuilder, DEFAULT_VARIABLE_PATTERN, OptionsError,
    WildcardQuantifier,
};
pub use pattern::{
    CompiledPattern, GroupMap, PatternAst, PatternError, PatternMatch, PatternRegex,
    compile_pattern_ast, parse_pattern,
};

/// Parses and compiles `pattern` in one step.
#[tracing::instrument(level = "trace", skip(options), fields(pattern = %pattern))]
pub fn compile(pattern: &str, options: &CompileOptions) -> CompileResult<CompiledPattern> {
    options.validate()?;
    let ast = parse_pattern(pattern)?;
    Ok(compile_pattern_ast(&ast, options))
}

/// Like [`compile`], then builds the anchored regex.
pub fn compile_regex(pattern: &str, options: &CompileOptions) -> CompileResult<PatternRegex> {
    let compiled = compile(pattern, options)?;
    Ok(compiled.to_regex()?)
}
