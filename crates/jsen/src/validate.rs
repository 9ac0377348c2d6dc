//! Validate-only entry points.
//!
//! Validation runs the identical engine transitions with a no-op sink, so it
//! allocates nothing and agrees with tree building on every accept/reject
//! decision.

use std::io::Read;

use crate::{
    engine::Engine,
    error::{Error, ParseError},
    options::Options,
    sink::ValidateSink,
};

/// A reusable validator.
///
/// # Examples
///
/// ```
/// use jsen::{Options, Validator};
///
/// let mut validator = Validator::new(Options::default());
/// assert!(validator.validate(br#"{"a": [1, 2]}"#).is_ok());
/// assert!(validator.validate(b"{]}").is_err());
/// ```
pub struct Validator {
    engine: Engine,
}

impl Validator {
    /// Creates a validator with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            engine: Engine::new(&options),
        }
    }

    /// Checks that `data` holds exactly one well-formed document.
    ///
    /// # Errors
    ///
    /// Returns the same error a tree-building parse of `data` would.
    pub fn validate(&mut self, data: &[u8]) -> Result<(), ParseError> {
        self.engine.reset();
        self.engine.only_one = true;
        let mut sink = ValidateSink::default();
        self.engine.feed(data, true, &mut sink)?;
        if sink.docs == 0 {
            return Err(self.engine.incomplete());
        }
        Ok(())
    }

    /// Reader-driven variant of [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, or the source's I/O error verbatim.
    pub fn validate_reader<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        self.engine.reset();
        self.engine.only_one = true;
        let mut sink = ValidateSink::default();
        self.engine.feed_reader(reader, &mut sink)?;
        if sink.docs == 0 {
            return Err(Error::Parse(self.engine.incomplete()));
        }
        Ok(())
    }
}

/// Validates a single strict-JSON document.
///
/// # Errors
///
/// Returns the same error [`parse`](crate::parse) would.
pub fn validate(data: &[u8]) -> Result<(), ParseError> {
    Validator::new(Options::default()).validate(data)
}

/// Validates a single document with explicit options.
///
/// # Errors
///
/// Returns the same error [`parse_with`](crate::parse_with) would.
pub fn validate_with(data: &[u8], options: &Options) -> Result<(), ParseError> {
    Validator::new(*options).validate(data)
}

/// Validates a single document from a blocking reader.
///
/// # Errors
///
/// Returns the first syntax error, or the source's I/O error verbatim.
pub fn validate_reader<R: Read>(reader: R) -> Result<(), Error> {
    Validator::new(Options::default()).validate_reader(reader)
}
