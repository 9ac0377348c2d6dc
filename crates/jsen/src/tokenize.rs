//! Push-tokenize entry points.
//!
//! Instead of building a tree, parse events are forwarded to a
//! [`TokenHandler`] as they complete. Transitions are identical to the other
//! modes; only the side effects differ.

use std::io::Read;

use crate::{
    engine::Engine,
    error::{Error, ParseError},
    options::Options,
    sink::{EmitSink, TokenHandler},
};

/// A reusable push tokenizer.
///
/// Accepts multiple top-level documents by default; set
/// [`Options::only_one`] to reject trailing documents.
pub struct Tokenizer {
    engine: Engine,
}

impl Tokenizer {
    /// Creates a tokenizer with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            engine: Engine::new(&options),
        }
    }

    /// Tokenizes `data`, forwarding each event to `handler`.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, with its line and column.
    pub fn tokenize<H>(&mut self, data: &[u8], handler: &mut H) -> Result<(), ParseError>
    where
        H: TokenHandler + ?Sized,
    {
        self.engine.reset();
        let mut sink = EmitSink { handler };
        self.engine.feed(data, true, &mut sink)
    }

    /// Reader-driven variant of [`tokenize`](Self::tokenize).
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, or the source's I/O error verbatim.
    pub fn tokenize_reader<R, H>(&mut self, reader: R, handler: &mut H) -> Result<(), Error>
    where
        R: Read,
        H: TokenHandler + ?Sized,
    {
        self.engine.reset();
        let mut sink = EmitSink { handler };
        self.engine.feed_reader(reader, &mut sink)
    }
}

/// Tokenizes strict-JSON input, forwarding events to `handler`.
///
/// # Errors
///
/// Returns the first syntax error, with its line and column.
pub fn tokenize<H>(data: &[u8], handler: &mut H) -> Result<(), ParseError>
where
    H: TokenHandler + ?Sized,
{
    Tokenizer::new(Options::default()).tokenize(data, handler)
}

/// Tokenizes input with explicit options.
///
/// # Errors
///
/// Returns the first syntax error, with its line and column.
pub fn tokenize_with<H>(data: &[u8], options: &Options, handler: &mut H) -> Result<(), ParseError>
where
    H: TokenHandler + ?Sized,
{
    Tokenizer::new(*options).tokenize(data, handler)
}

/// Tokenizes a blocking reader with default options.
///
/// # Errors
///
/// Returns the first syntax error, or the source's I/O error verbatim.
pub fn tokenize_reader<R, H>(reader: R, handler: &mut H) -> Result<(), Error>
where
    R: Read,
    H: TokenHandler + ?Sized,
{
    Tokenizer::new(Options::default()).tokenize_reader(reader, handler)
}
