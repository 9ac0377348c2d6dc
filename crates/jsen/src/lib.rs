//! An incremental JSON and SEN parser.
//!
//! One byte-at-a-time, table-driven engine backs every entry point: strict
//! JSON and the permissive SEN superset (bare tokens, optional commas, `//`
//! comments) share the state machine through per-grammar classifier tables,
//! and tree building, validation, and push tokenizing are three side-effect
//! policies over identical transitions. Input may arrive as one slice or as
//! reader chunks split anywhere — even mid-token — with identical results.
//!
//! # Examples
//!
//! ```
//! use jsen::{parse, parse_sen, Value};
//!
//! let v = parse(br#"{"a": [1, true]}"#).unwrap();
//! assert!(v.is_object());
//!
//! // SEN: bare tokens, optional commas.
//! let v = parse_sen(b"{a:1 b:2}").unwrap();
//! assert_eq!(v.as_object().unwrap()["a"], Value::Int(1));
//! ```
//!
//! Multiple top-level documents stream through a callback:
//!
//! ```
//! use jsen::{parse_multi, Options, Value};
//!
//! let mut docs = Vec::new();
//! parse_multi(b"1 [2] true", &Options::default(), |v| {
//!     docs.push(v);
//!     true
//! })
//! .unwrap();
//! assert_eq!(docs.len(), 3);
//! ```

mod builder;
mod engine;
mod error;
mod escape;
mod literal;
mod number;
mod options;
mod parser;
mod sink;
mod tables;
mod tokenize;
mod validate;
mod value;

#[cfg(test)]
mod tests;

pub use error::{Error, ErrorKind, ParseError};
pub use options::{Grammar, Options};
pub use parser::{Parser, parse, parse_multi, parse_reader, parse_sen, parse_with};
pub use sink::TokenHandler;
pub use tokenize::{Tokenizer, tokenize, tokenize_reader, tokenize_with};
pub use validate::{Validator, validate, validate_reader, validate_with};
pub use value::{Array, Map, Value};
