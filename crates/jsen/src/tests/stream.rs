//! Reader-driven parsing: chunk-boundary invariance and I/O behavior.

use std::io::ErrorKind;

use super::chunks::{FailingReader, PartReader};
use crate::{Error, Options, Value, parse, parse_reader, validate, validate_reader};

/// Documents with token boundaries of every kind: strings with escapes,
/// multi-byte UTF-8, numbers, literals, nested containers, a BOM.
const DOCS: &[&[u8]] = &[
    br#"{"a":[1,2.5,"x\n"],"b":{"c":null},"big":9223372036854775808}"#,
    b"[1,2,3]",
    b"-12.5e-3",
    b"true",
    "\"caf\u{e9} \u{65e5}\u{672c}\"".as_bytes(),
    b"\xEF\xBB\xBF[\"bom\"]",
    "\"\u{1F600}\"".as_bytes(),
    br#""\uD83D\uDE00""#,
];

#[test]
fn every_split_point_matches_whole_parse() {
    for doc in DOCS {
        let whole = parse(doc).unwrap();
        for k in 0..=doc.len() {
            let reader = PartReader::split_at(doc, k);
            let split = parse_reader(reader, &Options::default()).unwrap();
            assert_eq!(whole, split, "split at {k} of {doc:?} diverged");
        }
    }
}

#[test]
fn every_split_point_matches_for_rejects() {
    let bad: &[&[u8]] = &[b"{]}", b"[1,]", b"01", b"\"a\nb\"", b"[1", b"tru]"];
    for doc in bad {
        let whole = parse(doc).unwrap_err();
        for k in 0..=doc.len() {
            let reader = PartReader::split_at(doc, k);
            match parse_reader(reader, &Options::default()) {
                Err(Error::Parse(err)) => {
                    assert_eq!(whole, err, "split at {k} of {doc:?} diverged");
                }
                other => panic!("expected parse error, got {other:?}"),
            }
        }
    }
}

#[test]
fn tiny_chunks() {
    for doc in DOCS {
        let whole = parse(doc).unwrap();
        let reader = PartReader::fixed(doc, 1);
        assert_eq!(whole, parse_reader(reader, &Options::default()).unwrap());
    }
}

#[test]
fn chunk_larger_than_read_buffer() {
    // More than one 4096-byte engine chunk in a single document.
    let mut doc = Vec::from(&b"["[..]);
    for i in 0..3000 {
        if i > 0 {
            doc.push(b',');
        }
        doc.extend_from_slice(i.to_string().as_bytes());
    }
    doc.push(b']');
    assert!(doc.len() > 4096 * 2);

    let whole = parse(&doc).unwrap();
    let streamed = parse_reader(PartReader::fixed(&doc, 777), &Options::default()).unwrap();
    assert_eq!(whole, streamed);
    if let Value::Array(elems) = streamed {
        assert_eq!(elems.len(), 3000);
        assert_eq!(elems[2999], Value::Int(2999));
    } else {
        panic!("expected array");
    }
}

#[test]
fn sen_reader() {
    let reader = PartReader::fixed(b"{a:1 b:[x y]}", 3);
    let v = parse_reader(reader, &Options::sen()).unwrap();
    assert_eq!(v.as_object().unwrap()["a"], Value::Int(1));
}

#[test]
fn incomplete_stream_errors() {
    let reader = PartReader::new(&[b"[1,".as_slice(), b"2".as_slice()]);
    match parse_reader(reader, &Options::default()) {
        Err(Error::Parse(err)) => assert_eq!(err.to_string(), "incomplete JSON at 1:5"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn io_errors_propagate_verbatim() {
    let reader = FailingReader::new(b"[1,", ErrorKind::ConnectionReset, false);
    match parse_reader(reader, &Options::default()) {
        Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::ConnectionReset),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn interrupted_reads_are_retried() {
    let reader = FailingReader::new(b"[1,2]", ErrorKind::Interrupted, true);
    let v = parse_reader(reader, &Options::default()).unwrap();
    assert_eq!(v, Value::Array(vec![Value::Int(1), Value::Int(2)]));
}

#[test]
fn validate_reader_agrees() {
    for doc in DOCS {
        assert_eq!(
            validate(doc).is_ok(),
            validate_reader(PartReader::fixed(doc, 2)).is_ok()
        );
    }
    assert!(validate_reader(PartReader::fixed(b"{]}", 1)).is_err());
}
