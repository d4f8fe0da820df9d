//! Lexer for delimiter-based text templates.
//!
//! Splits template source into plain text and `{{ ... }}` actions, and
//! breaks actions into identifiers, fields, variables, keywords, numbers,
//! strings, and operators. The token stream is meant for a separate
//! template parser.
//!
//! # Quick start
//!
//! ## Lex with the default delimiters
//!
//! ```
//! use template_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("Hello, {{ .Name }}!").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [
//!     TokenKind::Text,
//!     TokenKind::LeftDelim,
//!     TokenKind::Space,
//!     TokenKind::Field,
//!     TokenKind::Space,
//!     TokenKind::RightDelim,
//!     TokenKind::Text,
//!     TokenKind::Eof,
//! ]);
//! ```
//!
//! ## Configure delimiters and keep comments
//!
//! ```
//! use template_lexer::{lex, LexConfig, TokenKind};
//!
//! let config = LexConfig::new("page", "<%/* note */%>done")
//!     .delims("<%", "%>")
//!     .emit_comments(true);
//! let lexed = lex(config);
//! assert!(lexed.is_ok());
//! assert_eq!(lexed.tokens[0].kind, TokenKind::Comment);
//! assert_eq!(lexed.tokens[0].value, "/* note */");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
mod cursor;
pub mod formatter;
pub mod lexer;
pub mod token;

pub use config::{DEFAULT_LEFT_DELIM, DEFAULT_RIGHT_DELIM, LexConfig};
pub use formatter::{dump, format, reconstruct};
pub use lexer::{LexError, LexErrorKind, Lexed, lex, tokenize};
pub use token::{Keyword, Span, Token, TokenKind};
