use std::fmt;

/// Number of characters a token value keeps when displayed.
const DISPLAY_LIMIT: usize = 10;

/// Source location of a token: byte offset and 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub position: usize,
    pub line: usize,
}

/// Reserved words recognized inside an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// The cursor, `.`.
    Dot,
    Block,
    Define,
    Else,
    End,
    If,
    Range,
    Null,
    Undefined,
    Template,
    With,
}

impl Keyword {
    /// Look up a word in the keyword table.
    #[must_use]
    pub fn lookup(word: &str) -> Option<Self> {
        let keyword = match word {
            "." => Self::Dot,
            "block" => Self::Block,
            "define" => Self::Define,
            "else" => Self::Else,
            "end" => Self::End,
            "if" => Self::If,
            "range" => Self::Range,
            "null" => Self::Null,
            "undefined" => Self::Undefined,
            "template" => Self::Template,
            "with" => Self::With,
            _ => return None,
        };
        Some(keyword)
    }

    /// Source spelling of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dot => ".",
            Self::Block => "block",
            Self::Define => "define",
            Self::Else => "else",
            Self::End => "end",
            Self::If => "if",
            Self::Range => "range",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Template => "template",
            Self::With => "with",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Fatal lex error; the value holds the message.
    Error,
    /// `true` or `false`.
    Boolean,
    /// `/* ... */`, only emitted when comments are requested.
    Comment,
    /// `=`.
    Assign,
    /// `:=`.
    Declare,
    /// Clean end of input.
    Eof,
    /// `.Name`.
    Field,
    /// Bare word that is not a keyword.
    Identifier,
    LeftDelim,
    LeftParen,
    /// Number literal, kept as source text.
    Number,
    /// `|`.
    Pipe,
    /// Backtick-quoted string, quotes included.
    RawString,
    RightDelim,
    RightParen,
    /// Run of whitespace inside an action.
    Space,
    /// Double-quoted string, quotes and escapes included.
    String,
    /// Plain text outside actions.
    Text,
    /// `$` or `$name`.
    Variable,
    /// Reserved word, displayed in angle brackets.
    Keyword(Keyword),
}

impl TokenKind {
    /// Whether this kind belongs to the keyword range.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::Keyword(_))
    }

    /// Whether this kind ends a token stream.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Eof | Self::Error)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "Error",
            Self::Boolean => "Boolean",
            Self::Comment => "Comment",
            Self::Assign => "Assign",
            Self::Declare => "Declare",
            Self::Eof => "EOF",
            Self::Field => "Field",
            Self::Identifier => "Identifier",
            Self::LeftDelim => "LeftDelim",
            Self::LeftParen => "LeftParen",
            Self::Number => "Number",
            Self::Pipe => "Pipe",
            Self::RawString => "RawString",
            Self::RightDelim => "RightDelim",
            Self::RightParen => "RightParen",
            Self::Space => "Space",
            Self::String => "String",
            Self::Text => "Text",
            Self::Variable => "Variable",
            Self::Keyword(keyword) => return write!(f, "Keyword({keyword})"),
        };
        f.write_str(name)
    }
}

/// A single token: its kind, the exact source slice, and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Error => f.write_str(&self.value),
            TokenKind::Keyword(_) => write!(f, "<{}>", self.value),
            _ => match self.value.char_indices().nth(DISPLAY_LIMIT) {
                Some((cut, _)) => write!(f, "{}...", &self.value[..cut]),
                None => f.write_str(&self.value),
            },
        }
    }
}
