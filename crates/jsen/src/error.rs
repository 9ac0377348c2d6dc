//! Parse and I/O error types.

use thiserror::Error;

/// A syntax error raised by the engine.
///
/// Rendered as `"<message> at <line>:<column>"` with a 1-based line and a
/// 1-based column counted in bytes since the last newline. The wording and
/// positions are a compatibility contract; callers match on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based byte column of the offending byte.
    pub column: usize,
}

/// The reason a parse failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A byte that no rule of the current state accepts.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A malformed numeric literal, including leading zeros and a bare `-`.
    #[error("invalid number")]
    InvalidNumber,
    /// Input ended while a token or container was still open.
    #[error("incomplete JSON")]
    Incomplete,
    /// `]` without a matching open array.
    #[error("unexpected array close")]
    UnexpectedArrayClose,
    /// `}` without a matching open object.
    #[error("unexpected object close")]
    UnexpectedObjectClose,
    /// Something other than a key or `}` directly after `{`.
    #[error("expected a string start or object close, not '{0}'")]
    ExpectedKeyOrClose(char),
    /// Something other than a key after a `,` inside an object.
    #[error("expected a string start, not '{0}'")]
    ExpectedKey(char),
    /// Something other than `:` between an object key and its value.
    #[error("expected a colon, not '{0}'")]
    ExpectedColon(char),
    /// A literal such as `true` broken off or misspelled.
    #[error("expected {0}")]
    ExpectedLiteral(&'static str),
    /// An escape other than `\" \\ \/ \b \f \n \r \t \u`.
    #[error("invalid JSON escape character '{0}'")]
    InvalidEscape(char),
    /// A bad `\u` sequence: non-hex digit or a broken surrogate pair.
    #[error("invalid JSON unicode character '{0}'")]
    InvalidUnicode(char),
    /// An unescaped control byte inside a string.
    #[error("invalid JSON character 0x{0:02x}")]
    ControlCharacter(u8),
    /// A string whose bytes are not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
    /// Non-whitespace after a lone document.
    #[error("extra characters")]
    ExtraCharacters,
    /// A `0xEF` lead byte at stream start not followed by `BB BF`.
    #[error("expected BOM")]
    ExpectedBom,
}

/// Error returned by reader-driven entry points.
///
/// Wraps either a [`ParseError`] or the I/O error the source raised, which
/// propagates verbatim.
#[derive(Error, Debug)]
pub enum Error {
    /// The input failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The source failed before end of input.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ParseError};

    #[test]
    fn display_contract() {
        let err = ParseError {
            kind: ErrorKind::InvalidNumber,
            line: 1,
            column: 2,
        };
        assert_eq!(err.to_string(), "invalid number at 1:2");

        let err = ParseError {
            kind: ErrorKind::ExpectedKeyOrClose(']'),
            line: 1,
            column: 2,
        };
        assert_eq!(
            err.to_string(),
            "expected a string start or object close, not ']' at 1:2"
        );

        let err = ParseError {
            kind: ErrorKind::Incomplete,
            line: 2,
            column: 1,
        };
        assert_eq!(err.to_string(), "incomplete JSON at 2:1");
    }
}
