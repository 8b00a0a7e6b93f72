use bunner_path_pattern::pattern::{LexHalt, Token, TokenKind, tokenize};

#[test]
fn tokenizes_complex_pattern_with_offsets() {
    let text = "/aaa/{ :foo (\\d+) , :baz \"qqq\" }/**";
    let out = tokenize(text);

    assert_eq!(out.consumed, 35);
    assert!(out.is_complete(text));
    assert_eq!(
        out.tokens,
        vec![
            Token::new(TokenKind::PathSeparator, 0, 1),
            Token::new(TokenKind::Literal("aaa".into()), 1, 4),
            Token::new(TokenKind::PathSeparator, 4, 5),
            Token::new(TokenKind::AltStart, 5, 6),
            Token::new(TokenKind::Variable("foo"), 7, 11),
            Token::new(
                TokenKind::RegExp {
                    source: "\\d+",
                    group_count: 0
                },
                12,
                17
            ),
            Token::new(TokenKind::AltSeparator, 18, 19),
            Token::new(TokenKind::Variable("baz"), 20, 24),
            Token::new(TokenKind::Literal("qqq".into()), 25, 30),
            Token::new(TokenKind::AltEnd, 31, 32),
            Token::new(TokenKind::PathSeparator, 32, 33),
            Token::new(TokenKind::Wildcard { greedy: true }, 33, 35),
        ]
    );
}

#[test]
fn stops_at_unterminated_regex_inside_complex_pattern() {
    let out = tokenize("/aaa/{ :foo (\\d+");

    assert_eq!(out.consumed, 12);
    assert_eq!(out.halt, Some(LexHalt::RegExp));
    assert_eq!(
        out.tokens.last(),
        Some(&Token::new(TokenKind::Variable("foo"), 7, 11))
    );
    assert!(
        !out.tokens
            .iter()
            .any(|token| matches!(token.kind, TokenKind::RegExp { .. }))
    );
}

#[test]
fn treats_unknown_punctuation_as_text() {
    let out = tokenize("!@#$%^&");
    assert_eq!(
        out.tokens,
        vec![Token::new(TokenKind::Literal("!@#$%^&".into()), 0, 7)]
    );
}

#[test]
fn newline_separates_text_runs() {
    let out = tokenize("foo\nbar");
    assert_eq!(
        out.tokens,
        vec![
            Token::new(TokenKind::Literal("foo".into()), 0, 3),
            Token::new(TokenKind::Literal("bar".into()), 4, 7),
        ]
    );
}

#[test]
fn consecutive_separators_are_separate_tokens() {
    let out = tokenize("//");
    assert_eq!(
        out.tokens,
        vec![
            Token::new(TokenKind::PathSeparator, 0, 1),
            Token::new(TokenKind::PathSeparator, 1, 2),
        ]
    );
}

#[test]
fn text_is_flushed_before_special_tokens() {
    let out = tokenize("ab:cd{e,f}g*");
    let kinds: Vec<_> = out.tokens.iter().map(|token| token.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Literal("ab".into()),
            TokenKind::Variable("cd"),
            TokenKind::AltStart,
            TokenKind::Literal("e".into()),
            TokenKind::AltSeparator,
            TokenKind::Literal("f".into()),
            TokenKind::AltEnd,
            TokenKind::Literal("g".into()),
            TokenKind::Wildcard { greedy: false },
        ]
    );
}
