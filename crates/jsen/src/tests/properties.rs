//! Property tests over the engine's headline guarantees.

use quickcheck::QuickCheck;

use super::chunks::PartReader;
use crate::{Options, Parser, Value, parse, parse_reader, validate};

fn test_count() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Property: `parse(v.to_string()) == v` for every constructible value.
#[test]
fn roundtrip_serialize_then_parse() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let text = value.to_string();
        parse(text.as_bytes()).as_ref() == Ok(&value)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: for any document and any split point, streaming the two halves
/// through the reader entry point equals parsing the whole slice.
#[test]
fn chunk_boundary_invariance() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value, split: usize) -> bool {
        let text = value.to_string();
        let data = text.as_bytes();
        let k = split % (data.len() + 1);
        let whole = parse(data);
        let streamed = match parse_reader(PartReader::split_at(data, k), &Options::default()) {
            Ok(v) => Ok(v),
            Err(_) => return false,
        };
        whole == streamed
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value, usize) -> bool);
}

/// Property: the validator and the parser accept exactly the same inputs,
/// even over arbitrary byte soup.
#[test]
fn validator_parser_agreement_on_bytes() {
    fn prop(bytes: Vec<u8>) -> bool {
        validate(&bytes).is_ok() == parse(&bytes).is_ok()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Property: the validator accepts every serialized value.
#[test]
fn validator_accepts_all_documents() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        validate(value.to_string().as_bytes()).is_ok()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: a reused instance yields identical results, including after an
/// interleaved failing parse.
#[test]
fn reuse_idempotence() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let text = value.to_string();
        let mut parser = Parser::new(Options::default());
        let first = parser.parse(text.as_bytes());
        if parser.parse(b"{\"broken\":").is_ok() {
            return false;
        }
        let second = parser.parse(text.as_bytes());
        first == second && first == Ok(value)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value) -> bool);
}
