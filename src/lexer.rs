use std::fmt;

use tracing::{debug, trace};

use crate::config::LexConfig;
use crate::cursor::{self, Cursor, TRIM_MARKER_LEN};
use crate::formatter;
use crate::token::{Keyword, Span, Token, TokenKind};

const LEFT_COMMENT: &[u8] = b"/*";
const RIGHT_COMMENT: &[u8] = b"*/";

const DECIMAL_DIGITS: &[u8] = b"0123456789_";

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// `/*` without a matching `*/`.
    UnclosedComment,
    /// `*/` not immediately followed by the right delimiter.
    CommentWithoutDelim,
    /// End of input inside an action.
    UnclosedAction,
    /// `:` not followed by `=`.
    ExpectedDeclare,
    /// Right delimiter reached with parentheses still open.
    UnclosedLeftParen,
    /// `)` with no matching `(`.
    UnexpectedRightParen,
    /// Character that cannot start any action token.
    UnrecognizedCharacter(char),
    /// Character that cannot follow a word, field, or variable.
    BadCharacter(char),
    /// Malformed number; carries the text scanned so far.
    BadNumber(String),
    UnterminatedQuote,
    UnterminatedRawQuote,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedComment => write!(f, "unclosed comment"),
            Self::CommentWithoutDelim => {
                write!(f, "comment ends before closing delimiter")
            }
            Self::UnclosedAction => write!(f, "unclosed action"),
            Self::ExpectedDeclare => write!(f, "expected :="),
            Self::UnclosedLeftParen => write!(f, "unclosed left paren"),
            Self::UnexpectedRightParen => write!(f, "unexpected right paren"),
            Self::UnrecognizedCharacter(ch) => {
                write!(f, "unrecognized character in action: {ch}")
            }
            Self::BadCharacter(ch) => write!(f, "bad character {ch}"),
            Self::BadNumber(text) => write!(f, "bad number syntax: {text}"),
            Self::UnterminatedQuote => write!(f, "unterminated quoted string"),
            Self::UnterminatedRawQuote => {
                write!(f, "unterminated raw quoted string")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, position {}", span.line, span.position)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Result of one `lex` call.
///
/// `tokens` always ends with exactly one terminal token: `Eof` on success,
/// `Error` carrying the message on failure. `error` tells the two apart
/// without inspecting token values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    /// The configuration used, with default delimiters filled in.
    pub config: LexConfig,
    pub tokens: Vec<Token>,
    pub error: Option<LexError>,
}

impl Lexed {
    /// Whether the input lexed cleanly to end of input.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The fatal error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    /// Split into the token stream or the error that stopped it.
    pub fn into_result(self) -> Result<Vec<Token>, LexError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.tokens),
        }
    }
}

impl fmt::Display for Lexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&formatter::format(&self.tokens))
    }
}

/// Lex a template into its token stream.
///
/// Never fails outright: a lex error ends the stream with an `Error`
/// token and is reported through [`Lexed::error`].
#[must_use]
pub fn lex(config: LexConfig) -> Lexed {
    let config = config.with_defaults();
    debug!(
        name = %config.name,
        len = config.input.len(),
        "lexing template"
    );

    let mut cursor = Cursor::new(&config);
    cursor.run();
    let Cursor { tokens, error, .. } = cursor;

    debug!(
        name = %config.name,
        tokens = tokens.len(),
        ok = error.is_none(),
        "lexed template"
    );
    Lexed {
        config,
        tokens,
        error,
    }
}

/// Lex a template with the default delimiters.
///
/// # Errors
///
/// Returns `LexError` on the first lexical error: unterminated strings,
/// comments, or actions, unbalanced parentheses, and malformed tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    lex(LexConfig::new("", input)).into_result()
}

/// Lexer states; each names the function that runs next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    LeftDelim,
    Comment,
    InsideAction,
    Space,
    Identifier,
    Field,
    Variable,
    Number,
    Quote,
    RawQuote,
    RightDelim,
}

/// Digit alphabet selected by a number's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl Radix {
    const fn digits(self) -> &'static [u8] {
        match self {
            Self::Binary => b"01_",
            Self::Octal => b"01234567_",
            Self::Decimal => DECIMAL_DIGITS,
            Self::Hex => b"0123456789abcdefABCDEF_",
        }
    }
}

// Every mode function returns the next mode, even those that never stop.
#[allow(clippy::unnecessary_wraps)]
impl Cursor<'_> {
    fn run(&mut self) {
        let mut mode = Some(Mode::Text);
        while let Some(current) = mode {
            trace!(mode = ?current, position = self.pos, line = self.line, "step");
            mode = match current {
                Mode::Text => self.lex_text(),
                Mode::LeftDelim => self.lex_left_delim(),
                Mode::Comment => self.lex_comment(),
                Mode::InsideAction => self.lex_inside_action(),
                Mode::Space => self.lex_space(),
                Mode::Identifier => self.lex_identifier(),
                Mode::Field => self.lex_field_or_variable(TokenKind::Field),
                Mode::Variable => self.lex_field_or_variable(TokenKind::Variable),
                Mode::Number => self.lex_number(),
                Mode::Quote => self.lex_quote(),
                Mode::RawQuote => self.lex_raw_quote(),
                Mode::RightDelim => self.lex_right_delim(),
            };
        }
    }

    fn error(&mut self, kind: LexErrorKind) -> Option<Mode> {
        self.fail(kind);
        None
    }

    fn emit_in_action(&mut self, kind: TokenKind) -> Option<Mode> {
        self.emit(kind);
        Some(Mode::InsideAction)
    }

    /// Scan text up to the next left delimiter or end of input.
    fn lex_text(&mut self) -> Option<Mode> {
        let Some(offset) = memchr::memmem::find(self.rest(), self.left_delim) else {
            self.pos = self.input.len();
            if self.pos > self.start {
                self.sync_line();
                self.emit(TokenKind::Text);
            }
            self.emit(TokenKind::Eof);
            return None;
        };

        self.pos += offset;
        let after_delim = self.rest().get(self.left_delim.len()..).unwrap_or_default();
        let trim = if cursor::has_left_trim_marker(after_delim) {
            cursor::right_trim_length(self.pending_bytes())
        } else {
            0
        };

        self.pos -= trim;
        if self.pos > self.start {
            self.sync_line();
            self.emit(TokenKind::Text);
        }
        self.pos += trim;
        self.ignore();
        Some(Mode::LeftDelim)
    }

    /// Consume the left delimiter and its trim marker.
    fn lex_left_delim(&mut self) -> Option<Mode> {
        self.pos += self.left_delim.len();
        let after_marker = if cursor::has_left_trim_marker(self.rest()) {
            TRIM_MARKER_LEN
        } else {
            0
        };

        if self
            .rest()
            .get(after_marker..)
            .is_some_and(|s| s.starts_with(LEFT_COMMENT))
        {
            self.pos += after_marker;
            self.ignore();
            return Some(Mode::Comment);
        }

        self.emit(TokenKind::LeftDelim);
        self.pos += after_marker;
        self.ignore();
        self.paren_depth = 0;
        Some(Mode::InsideAction)
    }

    /// Scan a `/* ... */` comment, which must be followed by the right delimiter.
    fn lex_comment(&mut self) -> Option<Mode> {
        self.pos += LEFT_COMMENT.len();
        let Some(offset) = memchr::memmem::find(self.rest(), RIGHT_COMMENT) else {
            return self.error(LexErrorKind::UnclosedComment);
        };
        self.pos += offset + RIGHT_COMMENT.len();

        let Some(trim) = self.at_right_delim() else {
            return self.error(LexErrorKind::CommentWithoutDelim);
        };
        if self.emit_comment {
            self.sync_line();
            self.emit(TokenKind::Comment);
        }
        if trim {
            self.pos += TRIM_MARKER_LEN;
        }
        self.pos += self.right_delim.len();
        if trim {
            self.pos += cursor::left_trim_length(self.rest());
        }
        self.ignore();
        Some(Mode::Text)
    }

    /// Consume the right delimiter and any whitespace its trim marker removes.
    fn lex_right_delim(&mut self) -> Option<Mode> {
        let trim = cursor::has_right_trim_marker(self.rest());
        if trim {
            self.pos += TRIM_MARKER_LEN;
            self.ignore();
        }
        self.pos += self.right_delim.len();
        self.emit(TokenKind::RightDelim);
        if trim {
            self.pos += cursor::left_trim_length(self.rest());
            self.ignore();
        }
        Some(Mode::Text)
    }

    /// Scan one element of an action.
    fn lex_inside_action(&mut self) -> Option<Mode> {
        if self.at_right_delim().is_some() {
            if self.paren_depth == 0 {
                return Some(Mode::RightDelim);
            }
            return self.error(LexErrorKind::UnclosedLeftParen);
        }

        let Some(b) = self.advance() else {
            return self.error(LexErrorKind::UnclosedAction);
        };
        match b {
            b if cursor::is_space(b) => {
                self.retreat();
                Some(Mode::Space)
            }
            b'=' => self.emit_in_action(TokenKind::Assign),
            b':' => {
                if self.advance() != Some(b'=') {
                    return self.error(LexErrorKind::ExpectedDeclare);
                }
                self.emit_in_action(TokenKind::Declare)
            }
            b'|' => self.emit_in_action(TokenKind::Pipe),
            b'"' => Some(Mode::Quote),
            b'`' => Some(Mode::RawQuote),
            b'$' => Some(Mode::Variable),
            b'.' if self.rest().first().is_some_and(|next| !next.is_ascii_digit()) => {
                Some(Mode::Field)
            }
            // A '.' before a digit or at end of input starts a number.
            b'.' | b'+' | b'-' | b'0'..=b'9' => {
                self.retreat();
                Some(Mode::Number)
            }
            b if cursor::is_alphanumeric(b) => {
                self.retreat();
                Some(Mode::Identifier)
            }
            b'(' => {
                self.emit(TokenKind::LeftParen);
                self.paren_depth += 1;
                Some(Mode::InsideAction)
            }
            b')' => {
                self.emit(TokenKind::RightParen);
                let Some(depth) = self.paren_depth.checked_sub(1) else {
                    return self.error(LexErrorKind::UnexpectedRightParen);
                };
                self.paren_depth = depth;
                Some(Mode::InsideAction)
            }
            _ => {
                let ch = self.char_at(self.pos - 1);
                self.error(LexErrorKind::UnrecognizedCharacter(ch))
            }
        }
    }

    /// Scan a run of whitespace.
    fn lex_space(&mut self) -> Option<Mode> {
        let mut spaces = 0;
        while self.peek().is_some_and(cursor::is_space) {
            self.advance();
            spaces += 1;
        }

        // The last space may belong to a trim marker before the right delimiter.
        let from_last_space = self
            .input
            .get(self.pos.saturating_sub(1)..)
            .unwrap_or_default();
        if cursor::has_right_trim_marker(from_last_space)
            && from_last_space
                .get(TRIM_MARKER_LEN..)
                .is_some_and(|s| s.starts_with(self.right_delim))
        {
            // The peek above read the '-', so this backs up over the space.
            self.retreat();
            if spaces == 1 {
                return Some(Mode::RightDelim);
            }
        }
        self.emit_in_action(TokenKind::Space)
    }

    /// Scan a word and classify it as keyword, boolean, or identifier.
    fn lex_identifier(&mut self) -> Option<Mode> {
        while self.advance().is_some_and(cursor::is_alphanumeric) {}
        self.retreat();
        if !self.at_terminator() {
            let ch = self.char_at(self.pos);
            return self.error(LexErrorKind::BadCharacter(ch));
        }

        let word = self.pending_str();
        let kind = match Keyword::lookup(word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None if word.starts_with('.') => TokenKind::Field,
            None if word == "true" || word == "false" => TokenKind::Boolean,
            None => TokenKind::Identifier,
        };
        self.emit_in_action(kind)
    }

    /// Scan `.name` or `$name`; the sigil is already consumed.
    fn lex_field_or_variable(&mut self, kind: TokenKind) -> Option<Mode> {
        if self.at_terminator() {
            let bare = if kind == TokenKind::Variable {
                TokenKind::Variable
            } else {
                TokenKind::Keyword(Keyword::Dot)
            };
            return self.emit_in_action(bare);
        }

        while self.advance().is_some_and(cursor::is_alphanumeric) {}
        self.retreat();
        if !self.at_terminator() {
            let ch = self.char_at(self.pos);
            return self.error(LexErrorKind::BadCharacter(ch));
        }
        self.emit_in_action(kind)
    }

    fn lex_number(&mut self) -> Option<Mode> {
        if !self.scan_number() {
            let text = self.pending();
            return self.error(LexErrorKind::BadNumber(text));
        }
        self.emit_in_action(TokenKind::Number)
    }

    /// Recognize number syntax. On failure the offending byte is consumed
    /// so it shows up in the error text.
    fn scan_number(&mut self) -> bool {
        self.accept(b"+-");

        let mut radix = Radix::Decimal;
        if self.accept(b"0") {
            if self.accept(b"xX") {
                radix = Radix::Hex;
            } else if self.accept(b"oO") {
                radix = Radix::Octal;
            } else if self.accept(b"bB") {
                radix = Radix::Binary;
            }
        }

        let digits = radix.digits();
        self.accept_run(digits);
        if self.accept(b".") {
            self.accept_run(digits);
        }
        if radix == Radix::Decimal && self.accept(b"eE") {
            self.accept(b"+-");
            self.accept_run(DECIMAL_DIGITS);
        }
        if radix == Radix::Hex && self.accept(b"pP") {
            self.accept(b"+-");
            self.accept_run(DECIMAL_DIGITS);
        }

        if self.peek().is_some_and(cursor::is_alphanumeric) {
            self.advance();
            return false;
        }
        true
    }

    /// Scan a double-quoted string; the opening quote is already consumed.
    fn lex_quote(&mut self) -> Option<Mode> {
        loop {
            match self.advance() {
                Some(b'\\') => {
                    if matches!(self.advance(), None | Some(b'\n')) {
                        return self.error(LexErrorKind::UnterminatedQuote);
                    }
                }
                Some(b'"') => break,
                Some(_) => {}
                None => return self.error(LexErrorKind::UnterminatedQuote),
            }
        }
        self.emit_in_action(TokenKind::String)
    }

    /// Scan a backtick string; no escapes apply.
    fn lex_raw_quote(&mut self) -> Option<Mode> {
        loop {
            match self.advance() {
                Some(b'`') => break,
                Some(_) => {}
                None => return self.error(LexErrorKind::UnterminatedRawQuote),
            }
        }
        self.emit_in_action(TokenKind::RawString)
    }
}
