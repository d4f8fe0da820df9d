/// Opening action delimiter used when none is configured.
pub const DEFAULT_LEFT_DELIM: &str = "{{";
/// Closing action delimiter used when none is configured.
pub const DEFAULT_RIGHT_DELIM: &str = "}}";

/// Input and options for one `lex` call.
///
/// Empty delimiters fall back to `{{` and `}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexConfig {
    /// Label used in diagnostics.
    pub name: String,
    pub input: String,
    pub left_delim: String,
    pub right_delim: String,
    /// Emit `Comment` tokens instead of discarding comments.
    pub emit_comment: bool,
}

impl LexConfig {
    /// Create a config with default delimiters and comments discarded.
    #[must_use]
    pub fn new(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            left_delim: DEFAULT_LEFT_DELIM.to_string(),
            right_delim: DEFAULT_RIGHT_DELIM.to_string(),
            emit_comment: false,
        }
    }

    /// Set both action delimiters.
    #[must_use]
    pub fn delims(mut self, left: &str, right: &str) -> Self {
        self.left_delim = left.to_string();
        self.right_delim = right.to_string();
        self
    }

    /// Emit comments as tokens.
    #[must_use]
    pub const fn emit_comments(mut self, emit: bool) -> Self {
        self.emit_comment = emit;
        self
    }

    /// Replace empty delimiters with the defaults.
    #[must_use]
    pub(crate) fn with_defaults(mut self) -> Self {
        if self.left_delim.is_empty() {
            DEFAULT_LEFT_DELIM.clone_into(&mut self.left_delim);
        }
        if self.right_delim.is_empty() {
            DEFAULT_RIGHT_DELIM.clone_into(&mut self.right_delim);
        }
        self
    }
}
