//! Configuration for parsers, validators, and tokenizers.

/// Which grammar the engine runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grammar {
    /// Strict JSON: quoted keys and strings, mandatory commas, the four
    /// literal tokens.
    #[default]
    Json,
    /// SEN, a permissive superset: bare tokens may stand in for keys and
    /// strings, and commas count as whitespace.
    Sen,
}

/// Configuration options shared by every consumption mode.
///
/// # Examples
///
/// ```
/// use jsen::{Grammar, Options, Parser};
///
/// let mut parser = Parser::new(Options {
///     grammar: Grammar::Sen,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// The grammar to parse.
    ///
    /// # Default
    ///
    /// [`Grammar::Json`]
    pub grammar: Grammar,

    /// Whether `//` line comments are accepted between tokens.
    ///
    /// When `false`, a `/` outside of a string is an unexpected-character
    /// error.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_comments: bool,

    /// Whether sink-driven parses stop at one document.
    ///
    /// When `true`, any non-whitespace after the first top-level value is an
    /// error. Entry points that return a single [`Value`] enforce this
    /// regardless, since they have nowhere to put a second document.
    ///
    /// # Default
    ///
    /// `false`
    ///
    /// [`Value`]: crate::Value
    pub only_one: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            grammar: Grammar::Json,
            allow_comments: true,
            only_one: false,
        }
    }
}

impl Options {
    /// Options for SEN input, comments allowed.
    #[must_use]
    pub fn sen() -> Self {
        Self {
            grammar: Grammar::Sen,
            ..Self::default()
        }
    }
}
