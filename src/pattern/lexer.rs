use std::borrow::Cow;

use memchr::memchr2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Variable(&'a str),
    AltStart,
    AltEnd,
    AltSeparator,
    Wildcard { greedy: bool },
    RegExp { source: &'a str, group_count: usize },
    Literal(Cow<'a, str>),
    PathSeparator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }
}

/// The rule that stopped a scan before the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexHalt {
    Literal,
    RegExp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized<'a> {
    pub tokens: Vec<Token<'a>>,
    /// Bytes of input covered by `tokens`. Shorter than the input only when
    /// `halt` is set.
    pub consumed: usize,
    pub halt: Option<LexHalt>,
}

impl Tokenized<'_> {
    pub fn is_complete(&self, text: &str) -> bool {
        self.halt.is_none() && self.consumed == text.len()
    }
}

enum Scan<T> {
    NoMatch,
    Taken { end: usize, payload: T },
    Failed,
}

/// Splits a pattern into tokens. Never fails: a malformed quoted literal or
/// inline regex stops the scan, and the result reports how far it got.
#[tracing::instrument(level = "trace", skip(text), fields(text_len = text.len() as u64))]
pub fn tokenize(text: &str) -> Tokenized<'_> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut i = 0usize;

    while i < bytes.len() {
        let j = take_space(bytes, i);
        if j != i {
            flush_run(text, &mut run_start, i, &mut tokens);
            i = j;
            continue;
        }

        if let Some(end) = take_variable(bytes, i) {
            flush_run(text, &mut run_start, i, &mut tokens);
            tokens.push(Token::new(TokenKind::Variable(&text[i + 1..end]), i, end));
            i = end;
            continue;
        }

        if let Some((kind, end)) = take_punctuation(bytes, i) {
            flush_run(text, &mut run_start, i, &mut tokens);
            tokens.push(Token::new(kind, i, end));
            i = end;
            continue;
        }

        match take_quoted(text, i) {
            Scan::Taken { end, payload } => {
                flush_run(text, &mut run_start, i, &mut tokens);
                tokens.push(Token::new(TokenKind::Literal(payload), i, end));
                i = end;
                continue;
            }
            Scan::Failed => {
                flush_run(text, &mut run_start, i, &mut tokens);
                return halted(tokens, i, LexHalt::Literal);
            }
            Scan::NoMatch => {}
        }

        match take_regexp(bytes, i) {
            Scan::Taken { end, payload } => {
                flush_run(text, &mut run_start, i, &mut tokens);
                let source = &text[i + 1..end - 1];
                tokens.push(Token::new(
                    TokenKind::RegExp {
                        source,
                        group_count: payload,
                    },
                    i,
                    end,
                ));
                i = end;
                continue;
            }
            Scan::Failed => {
                flush_run(text, &mut run_start, i, &mut tokens);
                return halted(tokens, i, LexHalt::RegExp);
            }
            Scan::NoMatch => {}
        }

        // Special rules only ever match ASCII bytes, so a run always ends on a
        // char boundary.
        run_start.get_or_insert(i);
        i += 1;
    }

    flush_run(text, &mut run_start, i, &mut tokens);
    tracing::event!(
        tracing::Level::TRACE,
        operation = "tokenize",
        tokens = tokens.len() as u64
    );

    Tokenized {
        tokens,
        consumed: i,
        halt: None,
    }
}

/// Removes backslash escapes: every `\` makes the following char literal.
pub fn decode_literal(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                decoded.push(escaped);
            }
        } else {
            decoded.push(ch);
        }
    }
    decoded
}

fn halted(tokens: Vec<Token<'_>>, consumed: usize, halt: LexHalt) -> Tokenized<'_> {
    tracing::event!(
        tracing::Level::DEBUG,
        operation = "tokenize",
        consumed = consumed as u64,
        halt = ?halt
    );
    Tokenized {
        tokens,
        consumed,
        halt: Some(halt),
    }
}

fn flush_run<'a>(
    text: &'a str,
    run_start: &mut Option<usize>,
    end: usize,
    tokens: &mut Vec<Token<'a>>,
) {
    if let Some(start) = run_start.take() {
        tokens.push(Token::new(
            TokenKind::Literal(Cow::Borrowed(&text[start..end])),
            start,
            end,
        ));
    }
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
fn is_variable_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn take_space(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_space(bytes[i]) {
        i += 1;
    }
    i
}

fn take_variable(bytes: &[u8], i: usize) -> Option<usize> {
    if bytes[i] != b':' {
        return None;
    }
    let mut j = i + 1;
    while j < bytes.len() && is_variable_name_byte(bytes[j]) {
        j += 1;
    }
    (j > i + 1).then_some(j)
}

fn take_punctuation(bytes: &[u8], i: usize) -> Option<(TokenKind<'static>, usize)> {
    match bytes[i] {
        b'{' => Some((TokenKind::AltStart, i + 1)),
        b'}' => Some((TokenKind::AltEnd, i + 1)),
        b',' => Some((TokenKind::AltSeparator, i + 1)),
        b'*' if bytes.get(i + 1) == Some(&b'*') => {
            Some((TokenKind::Wildcard { greedy: true }, i + 2))
        }
        b'*' => Some((TokenKind::Wildcard { greedy: false }, i + 1)),
        b'/' => Some((TokenKind::PathSeparator, i + 1)),
        _ => None,
    }
}

fn take_quoted(text: &str, i: usize) -> Scan<Cow<'_, str>> {
    let bytes = text.as_bytes();
    let quote = bytes[i];
    if quote != b'"' && quote != b'\'' {
        return Scan::NoMatch;
    }

    let mut j = i + 1;
    let mut escaped = false;
    while j <= bytes.len() {
        let Some(found) = memchr2(quote, b'\\', &bytes[j..]) else {
            break;
        };
        let at = j + found;
        if bytes[at] == quote {
            let raw = &text[i + 1..at];
            let payload = if escaped {
                Cow::Owned(decode_literal(raw))
            } else {
                Cow::Borrowed(raw)
            };
            return Scan::Taken {
                end: at + 1,
                payload,
            };
        }
        escaped = true;
        j = at + 2;
    }

    Scan::Failed
}

/// Scans a parenthesised regex fragment; the payload is the number of
/// capturing groups inside it.
fn take_regexp(bytes: &[u8], i: usize) -> Scan<usize> {
    if bytes[i] != b'(' {
        return Scan::NoMatch;
    }

    let mut depth = 0usize;
    let mut class_depth = 0usize;
    let mut group_count = 0usize;
    let mut j = i + 1;

    while j < bytes.len() {
        match bytes[j] {
            b'\\' => {
                j += 2;
                continue;
            }
            b'[' if class_depth == 0 => {
                class_depth = 1;
                j += 1;
                // `]` right after the opening bracket (or `[^`) is a literal.
                if bytes.get(j) == Some(&b'^') {
                    j += 1;
                }
                if bytes.get(j) == Some(&b']') {
                    j += 1;
                }
                continue;
            }
            b'[' => class_depth += 1,
            b']' if class_depth > 0 => class_depth -= 1,
            _ if class_depth > 0 => {}
            b'(' => {
                depth += 1;
                if opens_capture_group(&bytes[j + 1..]) {
                    group_count += 1;
                }
            }
            b')' => {
                if depth == 0 {
                    return Scan::Taken {
                        end: j + 1,
                        payload: group_count,
                    };
                }
                depth -= 1;
            }
            _ => {}
        }
        j += 1;
    }

    Scan::Failed
}

fn opens_capture_group(rest: &[u8]) -> bool {
    match rest {
        [b'?', b'P', b'<', ..] => true,
        [b'?', b'<', next, ..] => *next != b'=' && *next != b'!',
        [b'?', ..] => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind<'_>> {
        tokenize(text).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        for text in ["", "  ", "\t", "\n", "\r"] {
            let out = tokenize(text);
            assert!(out.tokens.is_empty());
            assert_eq!(out.consumed, text.len());
            assert!(out.is_complete(text));
        }
    }

    #[test]
    fn scans_variable_names_with_digits_and_dollar() {
        let out = tokenize(":foo123$_");
        assert_eq!(
            out.tokens,
            vec![Token::new(TokenKind::Variable("foo123$_"), 0, 9)]
        );
    }

    #[test]
    fn lone_colon_is_literal_text() {
        assert_eq!(kinds("a:"), vec![TokenKind::Literal(Cow::Borrowed("a:"))]);
    }

    #[test]
    fn greedy_wildcard_wins_over_single() {
        assert_eq!(
            tokenize("***").tokens,
            vec![
                Token::new(TokenKind::Wildcard { greedy: true }, 0, 2),
                Token::new(TokenKind::Wildcard { greedy: false }, 2, 3),
            ]
        );
    }

    #[test]
    fn counts_nested_regex_groups() {
        let out = tokenize("((a)((b)c))");
        assert_eq!(out.consumed, 11);
        assert_eq!(
            out.tokens,
            vec![Token::new(
                TokenKind::RegExp {
                    source: "(a)((b)c)",
                    group_count: 3
                },
                0,
                11
            )]
        );
    }

    #[test]
    fn empty_regex_is_accepted() {
        assert_eq!(
            kinds("()"),
            vec![TokenKind::RegExp {
                source: "",
                group_count: 0
            }]
        );
    }

    #[test]
    fn escaped_parentheses_do_not_change_depth() {
        assert_eq!(
            kinds("(\\()"),
            vec![TokenKind::RegExp {
                source: "\\(",
                group_count: 0
            }]
        );
        assert_eq!(
            kinds("(\\))"),
            vec![TokenKind::RegExp {
                source: "\\)",
                group_count: 0
            }]
        );
    }

    #[test]
    fn non_capturing_and_lookbehind_groups_are_not_counted() {
        assert_eq!(
            kinds("((?:a)(?<=b)(?<!c)(?<name>d)(?P<other>e))"),
            vec![TokenKind::RegExp {
                source: "(?:a)(?<=b)(?<!c)(?<name>d)(?P<other>e)",
                group_count: 2
            }]
        );
    }

    #[test]
    fn parentheses_inside_character_class_are_ignored() {
        assert_eq!(
            kinds("([()]+)"),
            vec![TokenKind::RegExp {
                source: "[()]+",
                group_count: 0
            }]
        );
        assert_eq!(
            kinds("([])]x)"),
            vec![TokenKind::RegExp {
                source: "[])]x",
                group_count: 0
            }]
        );
    }

    #[test]
    fn unterminated_regex_halts_at_its_start() {
        let out = tokenize("(foo");
        assert_eq!(out.consumed, 0);
        assert_eq!(out.halt, Some(LexHalt::RegExp));
        assert!(out.tokens.is_empty());
    }

    #[test]
    fn quoted_text_decodes_escapes() {
        assert_eq!(
            tokenize("\"fo\\\"o\"").tokens,
            vec![Token::new(
                TokenKind::Literal(Cow::Owned("fo\"o".to_string())),
                0,
                7
            )]
        );
        assert_eq!(kinds("'foo'"), vec![TokenKind::Literal(Cow::Borrowed("foo"))]);
    }

    #[test]
    fn unterminated_quote_halts_at_its_start() {
        let out = tokenize("ab\"foo");
        assert_eq!(out.consumed, 2);
        assert_eq!(out.halt, Some(LexHalt::Literal));
        assert_eq!(out.tokens, vec![Token::new(TokenKind::Literal("ab".into()), 0, 2)]);

        let out = tokenize("'foo\\'");
        assert_eq!(out.consumed, 0);
        assert_eq!(out.halt, Some(LexHalt::Literal));
    }

    #[test]
    fn whitespace_splits_unquoted_runs() {
        assert_eq!(
            tokenize("  \nfoo  bar\t").tokens,
            vec![
                Token::new(TokenKind::Literal("foo".into()), 3, 6),
                Token::new(TokenKind::Literal("bar".into()), 8, 11),
            ]
        );
    }

    #[test]
    fn non_ascii_text_is_kept_in_one_run() {
        assert_eq!(
            tokenize("café/x").tokens,
            vec![
                Token::new(TokenKind::Literal("café".into()), 0, 5),
                Token::new(TokenKind::PathSeparator, 5, 6),
                Token::new(TokenKind::Literal("x".into()), 6, 7),
            ]
        );
    }

    #[test]
    fn decode_literal_drops_escape_chars() {
        assert_eq!(decode_literal("a\\\\b\\c"), "a\\bc");
        assert_eq!(decode_literal("trailing\\"), "trailing");
        assert_eq!(decode_literal("plain"), "plain");
    }
}
