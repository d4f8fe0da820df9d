//! Scan state and the one-byte read/pushback primitives the lexer modes
//! are built from.

use tracing::trace;

use crate::config::LexConfig;
use crate::lexer::{LexError, LexErrorKind};
use crate::token::{Span, Token, TokenKind};

/// Length of a trim marker together with its adjacent whitespace.
pub const TRIM_MARKER_LEN: usize = 2;

const TRIM_MARKER: u8 = b'-';

/// Whitespace recognized between action tokens and trimmed around delimiters.
pub const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Letters, digits, and underscore.
pub const fn is_alphanumeric(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

/// `-` followed by whitespace, as found right after a left delimiter.
pub const fn has_left_trim_marker(s: &[u8]) -> bool {
    matches!(s, [TRIM_MARKER, c, ..] if is_space(*c))
}

/// Whitespace followed by `-`, as found right before a right delimiter.
pub const fn has_right_trim_marker(s: &[u8]) -> bool {
    matches!(s, [c, TRIM_MARKER, ..] if is_space(*c))
}

/// Length of the leading whitespace run.
pub fn left_trim_length(s: &[u8]) -> usize {
    s.iter().take_while(|b| is_space(**b)).count()
}

/// Length of the trailing whitespace run.
pub fn right_trim_length(s: &[u8]) -> usize {
    s.iter().rev().take_while(|b| is_space(**b)).count()
}

fn count_newlines(s: &[u8]) -> usize {
    memchr::memchr_iter(b'\n', s).count()
}

/// Mutable scan state for a single `lex` call.
///
/// Invariant: `start <= pos <= input.len()`. `width` is the width of the
/// last byte read by [`Cursor::advance`], so one [`Cursor::retreat`]
/// undoes exactly one advance.
pub struct Cursor<'a> {
    pub name: &'a str,
    pub src: &'a str,
    pub input: &'a [u8],
    pub left_delim: &'a [u8],
    pub right_delim: &'a [u8],
    pub emit_comment: bool,
    /// Next byte to read.
    pub pos: usize,
    /// Start of the token being built.
    pub start: usize,
    pub width: usize,
    pub line: usize,
    pub start_line: usize,
    pub paren_depth: usize,
    pub tokens: Vec<Token>,
    pub error: Option<LexError>,
}

impl<'a> Cursor<'a> {
    pub fn new(config: &'a LexConfig) -> Self {
        Self {
            name: &config.name,
            src: &config.input,
            input: config.input.as_bytes(),
            left_delim: config.left_delim.as_bytes(),
            right_delim: config.right_delim.as_bytes(),
            emit_comment: config.emit_comment,
            pos: 0,
            start: 0,
            width: 0,
            line: 1,
            start_line: 1,
            paren_depth: 0,
            tokens: Vec::new(),
            error: None,
        }
    }

    /// Read one byte, or `None` at end of input.
    pub fn advance(&mut self) -> Option<u8> {
        let Some(&b) = self.input.get(self.pos) else {
            self.width = 0;
            return None;
        };
        self.width = 1;
        self.pos += self.width;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    /// Step back over the last byte read. Only valid once per `advance`.
    pub fn retreat(&mut self) {
        if self.width == 1 {
            self.pos -= self.width;
            if self.input.get(self.pos) == Some(&b'\n') {
                self.line -= 1;
            }
        }
    }

    /// Look at the next byte without consuming it.
    pub fn peek(&mut self) -> Option<u8> {
        let b = self.advance();
        self.retreat();
        b
    }

    /// Consume the next byte if it is in `valid`.
    pub fn accept(&mut self, valid: &[u8]) -> bool {
        if self.advance().is_some_and(|b| valid.contains(&b)) {
            return true;
        }
        self.retreat();
        false
    }

    /// Consume a run of bytes from `valid`.
    pub fn accept_run(&mut self, valid: &[u8]) {
        while self.advance().is_some_and(|b| valid.contains(&b)) {}
        self.retreat();
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Bytes of the token being built.
    pub fn pending_bytes(&self) -> &'a [u8] {
        self.input.get(self.start..self.pos).unwrap_or_default()
    }

    /// The pending token text.
    pub fn pending(&self) -> String {
        String::from_utf8_lossy(self.pending_bytes()).into_owned()
    }

    /// The pending token text, or `""` if it does not fall on char boundaries.
    pub fn pending_str(&self) -> &'a str {
        self.src.get(self.start..self.pos).unwrap_or_default()
    }

    /// The character starting at `pos`, for error messages.
    pub fn char_at(&self, pos: usize) -> char {
        self.src
            .get(pos..)
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Count newlines in the pending slice that were skipped without `advance`.
    pub fn sync_line(&mut self) {
        self.line += count_newlines(self.pending_bytes());
    }

    /// Push the pending slice as a token of `kind` and start a new one.
    pub fn emit(&mut self, kind: TokenKind) {
        let token = Token {
            kind,
            value: self.pending(),
            span: Span {
                position: self.start,
                line: self.start_line,
            },
        };
        trace!(%kind, position = self.start, line = self.start_line, "emit");
        self.tokens.push(token);
        self.start = self.pos;
        self.start_line = self.line;
    }

    /// Drop the pending slice without emitting it.
    pub fn ignore(&mut self) {
        self.sync_line();
        self.start = self.pos;
        self.start_line = self.line;
    }

    /// Push an error token carrying the message and record the error.
    pub fn fail(&mut self, kind: LexErrorKind) {
        let span = Span {
            position: self.start,
            line: self.start_line,
        };
        tracing::debug!(
            name = self.name,
            error = %kind,
            position = span.position,
            line = span.line,
            "lex error"
        );
        self.tokens.push(Token {
            kind: TokenKind::Error,
            value: kind.to_string(),
            span,
        });
        self.error = Some(LexError { kind, span });
    }

    /// Whether the next byte may legally follow an identifier, field,
    /// or variable.
    pub fn at_terminator(&mut self) -> bool {
        match self.peek() {
            None | Some(b'.' | b',' | b'|' | b':' | b')' | b'(') => true,
            Some(b) => is_space(b) || self.right_delim.first() == Some(&b),
        }
    }

    /// Whether the cursor sits at the right delimiter. `Some(true)` means a
    /// trim marker precedes it.
    pub fn at_right_delim(&self) -> Option<bool> {
        let rest = self.rest();
        if has_right_trim_marker(rest)
            && rest
                .get(TRIM_MARKER_LEN..)
                .is_some_and(|after| after.starts_with(self.right_delim))
        {
            return Some(true);
        }
        rest.starts_with(self.right_delim).then_some(false)
    }
}
