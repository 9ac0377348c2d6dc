//! Tree-building parse entry points.

use std::{io::Read, sync::mpsc::SyncSender};

use crate::{
    builder::{Docs, TreeBuilder, TreeSink},
    engine::Engine,
    error::{Error, ParseError},
    options::Options,
    value::Value,
};

/// A reusable tree-building parser.
///
/// All scratch state is truncated, not freed, between parses, so one
/// instance amortizes its allocations across many documents. A fresh and a
/// reused instance accept and reject exactly the same inputs, including
/// after a failed parse.
///
/// # Examples
///
/// ```
/// use jsen::{Options, Parser, Value};
///
/// let mut parser = Parser::new(Options::default());
/// assert_eq!(parser.parse(b"[1,2]").unwrap(), Value::Array(vec![
///     Value::Int(1),
///     Value::Int(2),
/// ]));
/// assert_eq!(parser.parse(b"true").unwrap(), Value::Bool(true));
/// ```
pub struct Parser {
    engine: Engine,
    tree: TreeBuilder,
    /// `only_one` as configured; single-result parses force it on.
    only_one: bool,
}

impl Parser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            engine: Engine::new(&options),
            tree: TreeBuilder::default(),
            only_one: options.only_one,
        }
    }

    /// Parses a single document and returns its value.
    ///
    /// Trailing non-whitespace is an error: with nowhere to put a second
    /// document, this entry point always enforces one.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, with its line and column.
    pub fn parse(&mut self, data: &[u8]) -> Result<Value, ParseError> {
        self.engine.reset();
        self.tree.reset();
        self.engine.only_one = true;
        let mut slot = None;
        let mut sink = TreeSink {
            tree: &mut self.tree,
            docs: Docs::Single(&mut slot),
        };
        self.engine.feed(data, true, &mut sink)?;
        slot.ok_or_else(|| self.engine.incomplete())
    }

    /// Parses a single document from a blocking reader, consuming fixed-size
    /// chunks until end of file.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, or the source's I/O error verbatim.
    pub fn parse_reader<R: Read>(&mut self, reader: R) -> Result<Value, Error> {
        self.engine.reset();
        self.tree.reset();
        self.engine.only_one = true;
        let mut slot = None;
        let mut sink = TreeSink {
            tree: &mut self.tree,
            docs: Docs::Single(&mut slot),
        };
        self.engine.feed_reader(reader, &mut sink)?;
        slot.ok_or_else(|| Error::Parse(self.engine.incomplete()))
    }

    /// Parses a sequence of top-level documents, handing each completed
    /// value to `each`. Returning `false` stops the parse early with `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, with its line and column.
    pub fn parse_multi<F>(&mut self, data: &[u8], mut each: F) -> Result<(), ParseError>
    where
        F: FnMut(Value) -> bool,
    {
        self.engine.reset();
        self.tree.reset();
        self.engine.only_one = self.only_one;
        let mut sink = TreeSink {
            tree: &mut self.tree,
            docs: Docs::Each(&mut each),
        };
        self.engine.feed(data, true, &mut sink)
    }

    /// Reader-driven variant of [`parse_multi`](Self::parse_multi).
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, or the source's I/O error verbatim.
    pub fn parse_multi_reader<R, F>(&mut self, reader: R, mut each: F) -> Result<(), Error>
    where
        R: Read,
        F: FnMut(Value) -> bool,
    {
        self.engine.reset();
        self.tree.reset();
        self.engine.only_one = self.only_one;
        let mut sink = TreeSink {
            tree: &mut self.tree,
            docs: Docs::Each(&mut each),
        };
        self.engine.feed_reader(reader, &mut sink)
    }

    /// Parses a sequence of documents, sending each down a bounded channel.
    /// Channel capacity provides backpressure; a dropped receiver stops the
    /// parse early with `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, with its line and column.
    pub fn parse_channel(
        &mut self,
        data: &[u8],
        results: &SyncSender<Value>,
    ) -> Result<(), ParseError> {
        self.engine.reset();
        self.tree.reset();
        self.engine.only_one = self.only_one;
        let mut sink = TreeSink {
            tree: &mut self.tree,
            docs: Docs::Channel(results),
        };
        self.engine.feed(data, true, &mut sink)
    }
}

/// Parses a single strict-JSON document.
///
/// # Errors
///
/// Returns the first syntax error, with its line and column.
///
/// # Examples
///
/// ```
/// use jsen::{parse, Value};
///
/// assert_eq!(parse(b"null").unwrap(), Value::Null);
/// assert_eq!(
///     parse(b"9223372036854775808").unwrap(),
///     Value::BigNumber("9223372036854775808".into()),
/// );
/// ```
pub fn parse(data: &[u8]) -> Result<Value, ParseError> {
    Parser::new(Options::default()).parse(data)
}

/// Parses a single document with explicit options.
///
/// # Errors
///
/// Returns the first syntax error, with its line and column.
pub fn parse_with(data: &[u8], options: &Options) -> Result<Value, ParseError> {
    Parser::new(*options).parse(data)
}

/// Parses a single SEN document.
///
/// # Errors
///
/// Returns the first syntax error, with its line and column.
///
/// # Examples
///
/// ```
/// use jsen::{parse_sen, Value};
///
/// let v = parse_sen(b"[one two]").unwrap();
/// assert_eq!(
///     v,
///     Value::Array(vec![Value::String("one".into()), Value::String("two".into())]),
/// );
/// ```
pub fn parse_sen(data: &[u8]) -> Result<Value, ParseError> {
    Parser::new(Options::sen()).parse(data)
}

/// Parses a sequence of top-level documents, handing each to `each`.
///
/// # Errors
///
/// Returns the first syntax error, with its line and column.
pub fn parse_multi<F>(data: &[u8], options: &Options, each: F) -> Result<(), ParseError>
where
    F: FnMut(Value) -> bool,
{
    Parser::new(*options).parse_multi(data, each)
}

/// Parses a single document from a blocking reader.
///
/// # Errors
///
/// Returns the first syntax error, or the source's I/O error verbatim.
pub fn parse_reader<R: Read>(reader: R, options: &Options) -> Result<Value, Error> {
    Parser::new(*options).parse_reader(reader)
}
