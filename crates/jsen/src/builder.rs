//! Flat-stack container building and the per-document dispatcher.
//!
//! Values accumulate on one flat stack; a parallel marker stack records, per
//! open container, where its children begin. Object keys are pushed onto the
//! flat stack interleaved with their values, so closing an object drains
//! key/value pairs. Nesting depth is bounded by the heap, not the call stack.

use std::sync::mpsc::SyncSender;

use crate::{
    sink::{Flow, Sink},
    value::{Map, Value},
};

/// One open container: the flat-stack index where its children start.
#[derive(Debug, Clone, Copy)]
enum Mark {
    Array(usize),
    Object(usize),
}

/// Reusable builder state. Cleared by truncation between parses.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    stack: Vec<Value>,
    marks: Vec<Mark>,
}

impl TreeBuilder {
    pub(crate) fn reset(&mut self) {
        self.stack.clear();
        self.marks.clear();
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn close_array(&mut self) {
        // The engine has already matched the close against the open marker.
        let start = match self.marks.pop() {
            Some(Mark::Array(start)) => start,
            other => {
                debug_assert!(other.is_none(), "array close against object marker");
                0
            }
        };
        let arr: Vec<Value> = self.stack.drain(start..).collect();
        self.stack.push(Value::Array(arr));
    }

    fn close_object(&mut self) {
        let start = match self.marks.pop() {
            Some(Mark::Object(start)) => start,
            other => {
                debug_assert!(other.is_none(), "object close against array marker");
                0
            }
        };
        let mut map = Map::new();
        let mut drain = self.stack.drain(start..);
        // Keys and values alternate; duplicate keys resolve last-write-wins.
        while let (Some(key), Some(value)) = (drain.next(), drain.next()) {
            if let Value::String(key) = key {
                map.insert(key, value);
            }
        }
        drop(drain);
        self.stack.push(Value::Object(map));
    }

    fn take_root(&mut self) -> Value {
        debug_assert_eq!(self.stack.len(), 1, "document end without a lone root");
        self.stack.pop().unwrap_or_default()
    }
}

/// Where completed top-level values go.
pub(crate) enum Docs<'a> {
    /// Capture a lone document.
    Single(&'a mut Option<Value>),
    /// Hand each document to a callback; `false` stops the parse.
    Each(&'a mut dyn FnMut(Value) -> bool),
    /// Send each document down a bounded channel; a dropped receiver stops
    /// the parse.
    Channel(&'a SyncSender<Value>),
}

/// Tree-building sink: builder plus the document dispatcher.
pub(crate) struct TreeSink<'a> {
    pub tree: &'a mut TreeBuilder,
    pub docs: Docs<'a>,
}

impl Sink for TreeSink<'_> {
    fn null(&mut self) {
        self.tree.push(Value::Null);
    }
    fn boolean(&mut self, value: bool) {
        self.tree.push(Value::Bool(value));
    }
    fn int(&mut self, value: i64) {
        self.tree.push(Value::Int(value));
    }
    fn float(&mut self, value: f64) {
        self.tree.push(Value::Float(value));
    }
    fn big_number(&mut self, literal: &str) {
        self.tree.push(Value::BigNumber(literal.to_string()));
    }
    fn string(&mut self, value: &str) {
        self.tree.push(Value::String(value.to_string()));
    }
    fn key(&mut self, key: &str) {
        self.tree.push(Value::String(key.to_string()));
    }
    fn array_start(&mut self) {
        self.tree.marks.push(Mark::Array(self.tree.stack.len()));
    }
    fn array_end(&mut self) {
        self.tree.close_array();
    }
    fn object_start(&mut self) {
        self.tree.marks.push(Mark::Object(self.tree.stack.len()));
    }
    fn object_end(&mut self) {
        self.tree.close_object();
    }

    fn document_end(&mut self) -> Flow {
        let root = self.tree.take_root();
        log::trace!("dispatching completed document");
        match &mut self.docs {
            Docs::Single(slot) => {
                **slot = Some(root);
                Flow::Continue
            }
            Docs::Each(callback) => {
                if callback(root) {
                    Flow::Continue
                } else {
                    Flow::Stop
                }
            }
            Docs::Channel(sender) => {
                if sender.send(root).is_ok() {
                    Flow::Continue
                } else {
                    Flow::Stop
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::sync_channel;

    use super::{Docs, TreeBuilder, TreeSink};
    use crate::{
        sink::{Flow, Sink},
        value::{Map, Value},
    };

    #[test]
    fn builds_nested_containers() {
        let mut tree = TreeBuilder::default();
        let mut slot = None;
        let mut sink = TreeSink {
            tree: &mut tree,
            docs: Docs::Single(&mut slot),
        };

        // {"a": [1, null]}
        sink.object_start();
        sink.key("a");
        sink.array_start();
        sink.int(1);
        sink.null();
        sink.array_end();
        sink.object_end();
        assert_eq!(sink.document_end(), Flow::Continue);

        let mut map = Map::new();
        map.insert(
            "a".into(),
            Value::Array(vec![Value::Int(1), Value::Null]),
        );
        assert_eq!(slot, Some(Value::Object(map)));
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let mut tree = TreeBuilder::default();
        let mut slot = None;
        let mut sink = TreeSink {
            tree: &mut tree,
            docs: Docs::Single(&mut slot),
        };

        sink.object_start();
        sink.key("x");
        sink.int(1);
        sink.key("x");
        sink.int(2);
        sink.object_end();
        sink.document_end();

        let mut map = Map::new();
        map.insert("x".into(), Value::Int(2));
        assert_eq!(slot, Some(Value::Object(map)));
    }

    #[test]
    fn dropped_receiver_stops() {
        let mut tree = TreeBuilder::default();
        let (tx, rx) = sync_channel(1);
        drop(rx);
        let mut sink = TreeSink {
            tree: &mut tree,
            docs: Docs::Channel(&tx),
        };
        sink.int(7);
        assert_eq!(sink.document_end(), Flow::Stop);
    }
}
