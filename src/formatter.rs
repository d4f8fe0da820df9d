//! Renderers that turn a token stream back into text.
//!
//! `format` gives the display form used in diagnostics, `reconstruct`
//! rebuilds the source minus the regions the lexer skipped, and `dump`
//! produces a line-per-token listing for inspection.

use std::fmt::Write;

use crate::token::Token;

/// Concatenate the display form of every token.
#[must_use]
pub fn format(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = write!(out, "{token}");
    }
    out
}

/// Concatenate the raw values of every non-terminal token.
///
/// For a stream that lexed cleanly this is the input with trim markers,
/// trimmed whitespace, and discarded comments removed.
#[must_use]
pub fn reconstruct(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| !t.kind.is_terminal())
        .map(|t| t.value.as_str())
        .collect()
}

/// List tokens one per line as `line:position kind value`.
#[must_use]
pub fn dump(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "{}:{} {} {:?}",
            token.span.line, token.span.position, token.kind, token.value
        );
    }
    out
}
