#![allow(dead_code)]

use template_lexer::{LexConfig, LexErrorKind, Lexed, Token, TokenKind, lex};

/// Lex with the default configuration.
pub fn lex_str(input: &str) -> Lexed {
    lex(LexConfig::new("test", input))
}

/// Token kinds only, terminal token included.
pub fn kinds(input: &str) -> Vec<TokenKind> {
    lex_str(input).tokens.iter().map(|t| t.kind).collect()
}

/// `(kind, value)` pairs, terminal token included.
pub fn pairs(input: &str) -> Vec<(TokenKind, String)> {
    lex_str(input)
        .tokens
        .into_iter()
        .map(|t| (t.kind, t.value))
        .collect()
}

/// Assert that lexing fails with `expected` and return the error token.
pub fn assert_lex_error(input: &str, expected: &LexErrorKind) -> Token {
    let lexed = lex_str(input);
    let err = lexed
        .error()
        .unwrap_or_else(|| panic!("expected {expected:?} for {input:?}"));
    assert_eq!(&err.kind, expected, "wrong error for {input:?}");

    let errors = lexed
        .tokens
        .iter()
        .filter(|t| t.kind.is_terminal())
        .count();
    assert_eq!(errors, 1, "expected one terminal token for {input:?}");

    let last = lexed.tokens.last().expect("error token").clone();
    assert_eq!(last.kind, TokenKind::Error);
    assert_eq!(last.value, expected.to_string());
    last
}
