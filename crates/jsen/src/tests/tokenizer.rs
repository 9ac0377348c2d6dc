//! Push-tokenize mode: visitor event sequences.

use crate::{
    Options, TokenHandler, Tokenizer, parse, tokenize, tokenize_reader, tokenize_with,
};

use super::chunks::PartReader;

/// Records every event as a compact string for sequence assertions.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl TokenHandler for Recorder {
    fn null(&mut self) {
        self.events.push("null".into());
    }
    fn boolean(&mut self, value: bool) {
        self.events.push(format!("bool {value}"));
    }
    fn int(&mut self, value: i64) {
        self.events.push(format!("int {value}"));
    }
    fn float(&mut self, value: f64) {
        self.events.push(format!("float {value}"));
    }
    fn big_number(&mut self, literal: &str) {
        self.events.push(format!("big {literal}"));
    }
    fn string(&mut self, value: &str) {
        self.events.push(format!("str {value}"));
    }
    fn key(&mut self, key: &str) {
        self.events.push(format!("key {key}"));
    }
    fn array_start(&mut self) {
        self.events.push("[".into());
    }
    fn array_end(&mut self) {
        self.events.push("]".into());
    }
    fn object_start(&mut self) {
        self.events.push("{".into());
    }
    fn object_end(&mut self) {
        self.events.push("}".into());
    }
}

fn events(data: &[u8]) -> Vec<String> {
    let mut recorder = Recorder::default();
    tokenize(data, &mut recorder).unwrap();
    recorder.events
}

#[test]
fn nested_document_event_order() {
    assert_eq!(
        events(br#"{"a":[1,null,2.5],"b":"x"}"#),
        vec![
            "{", "key a", "[", "int 1", "null", "float 2.5", "]", "key b", "str x", "}",
        ]
    );
}

#[test]
fn scalar_events() {
    assert_eq!(events(b"true"), vec!["bool true"]);
    assert_eq!(
        events(b"9223372036854775808"),
        vec!["big 9223372036854775808"]
    );
}

#[test]
fn multiple_documents_by_default() {
    assert_eq!(events(b"1 2 [3]"), vec!["int 1", "int 2", "[", "int 3", "]"]);
}

#[test]
fn only_one_applies_when_asked() {
    let options = Options {
        only_one: true,
        ..Options::default()
    };
    let mut recorder = Recorder::default();
    let err = tokenize_with(b"1 2", &options, &mut recorder).unwrap_err();
    assert_eq!(err.to_string(), "extra characters at 1:3");
    assert_eq!(recorder.events, vec!["int 1"]);
}

#[test]
fn default_handler_methods_are_no_ops() {
    struct Silent;
    impl TokenHandler for Silent {}
    let mut silent = Silent;
    tokenize(br#"{"a":[1,"b",null]}"#, &mut silent).unwrap();
}

#[test]
fn sen_tokens_emit_the_same_events() {
    let mut recorder = Recorder::default();
    tokenize_with(b"{a:1 b:[x true]}", &Options::sen(), &mut recorder).unwrap();
    assert_eq!(
        recorder.events,
        vec!["{", "key a", "int 1", "key b", "[", "str x", "bool true", "]", "}"]
    );
}

#[test]
fn tokenizer_errors_match_parser_errors() {
    let corpus: &[&[u8]] = &[b"{]}", b"[1,]", b"01", b"tru]", b"\"\\q\"", b"[1"];
    for doc in corpus {
        let mut recorder = Recorder::default();
        let tok_err = tokenize(doc, &mut recorder);
        let parse_err = parse(doc);
        match (tok_err, parse_err) {
            (Err(t), Err(p)) => assert_eq!(t, p, "diverged on {doc:?}"),
            other => panic!("expected both to fail on {doc:?}, got {other:?}"),
        }
    }
}

#[test]
fn reader_driven_tokenizing() {
    let mut recorder = Recorder::default();
    tokenize_reader(PartReader::fixed(br#"[1,"two",3]"#, 2), &mut recorder).unwrap();
    assert_eq!(
        recorder.events,
        vec!["[", "int 1", "str two", "int 3", "]"]
    );
}

#[test]
fn tokenizer_instance_reuse() {
    let mut tokenizer = Tokenizer::new(Options::default());
    let mut first = Recorder::default();
    tokenizer.tokenize(b"[1]", &mut first).unwrap();
    let mut bad = Recorder::default();
    assert!(tokenizer.tokenize(b"[1,", &mut bad).is_err());
    let mut second = Recorder::default();
    tokenizer.tokenize(b"[1]", &mut second).unwrap();
    assert_eq!(first.events, second.events);
}
