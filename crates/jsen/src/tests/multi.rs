//! Multi-document inputs: callbacks, channels, `only_one`.

use std::sync::mpsc::sync_channel;

use crate::{Map, Options, Parser, Value, parse_multi};

#[test]
fn documents_arrive_in_order() {
    let mut docs = Vec::new();
    parse_multi(b"1 [2] {\"x\":3} true false 123", &Options::default(), |v| {
        docs.push(v);
        true
    })
    .unwrap();

    let mut map = Map::new();
    map.insert("x".into(), Value::Int(3));
    assert_eq!(
        docs,
        vec![
            Value::Int(1),
            Value::Array(vec![Value::Int(2)]),
            Value::Object(map),
            Value::Bool(true),
            Value::Bool(false),
            Value::Int(123),
        ]
    );
}

#[test]
fn newline_delimited_documents() {
    let mut docs = Vec::new();
    parse_multi(b"{\"a\":1}\n{\"a\":2}\n{\"a\":3}\n", &Options::default(), |v| {
        docs.push(v);
        true
    })
    .unwrap();
    assert_eq!(docs.len(), 3);
}

#[test]
fn empty_input_is_zero_documents() {
    let mut count = 0;
    parse_multi(b"  \n ", &Options::default(), |_| {
        count += 1;
        true
    })
    .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn callback_false_stops_early() {
    let mut docs = Vec::new();
    parse_multi(b"1 2 3 4", &Options::default(), |v| {
        docs.push(v);
        docs.len() < 2
    })
    .unwrap();
    assert_eq!(docs, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn callback_stop_skips_later_errors() {
    // Parsing stops at the first document; the garbage after it is never
    // reached.
    let mut docs = Vec::new();
    parse_multi(b"1 ???", &Options::default(), |v| {
        docs.push(v);
        false
    })
    .unwrap();
    assert_eq!(docs, vec![Value::Int(1)]);
}

#[test]
fn only_one_rejects_second_document() {
    let options = Options {
        only_one: true,
        ..Options::default()
    };
    let err = parse_multi(b"1 2", &options, |_| true).unwrap_err();
    assert_eq!(err.to_string(), "extra characters at 1:3");

    // A lone document still passes.
    let mut docs = Vec::new();
    parse_multi(b" 1 ", &options, |v| {
        docs.push(v);
        true
    })
    .unwrap();
    assert_eq!(docs, vec![Value::Int(1)]);
}

#[test]
fn channel_dispatch_in_order() {
    let (tx, rx) = sync_channel(8);
    let mut parser = Parser::new(Options::default());
    parser.parse_channel(b"1 2 [3]", &tx).unwrap();
    drop(tx);
    let got: Vec<Value> = rx.iter().collect();
    assert_eq!(
        got,
        vec![
            Value::Int(1),
            Value::Int(2),
            Value::Array(vec![Value::Int(3)]),
        ]
    );
}

#[test]
fn channel_backpressure_across_threads() {
    // Capacity one: the parser blocks until the consumer drains.
    let (tx, rx) = sync_channel(1);
    let handle = std::thread::spawn(move || {
        let mut parser = Parser::new(Options::default());
        parser.parse_channel(b"1 2 3 4 5", &tx).unwrap();
    });
    let got: Vec<Value> = rx.iter().collect();
    handle.join().unwrap();
    assert_eq!(got.len(), 5);
}

#[test]
fn dropped_receiver_stops_cleanly() {
    let (tx, rx) = sync_channel(1);
    drop(rx);
    let mut parser = Parser::new(Options::default());
    // No receiver left; the parse stops without error.
    parser.parse_channel(b"1 2 3", &tx).unwrap();
}

#[test]
fn multi_errors_keep_positions() {
    let err = parse_multi(b"1 [2 {\"x\":", &Options::default(), |_| true).unwrap_err();
    assert_eq!(err.to_string(), "unexpected character '{' at 1:6");
}
