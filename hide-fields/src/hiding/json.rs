//! Dynamic values: `serde_json::Value`.
//!
//! A JSON value only knows its kind at runtime. It is exposed as
//! [`Node::Dynamic`] wrapping the node of whatever it currently holds, and the
//! walker visits that node with the state it already carries. A `#[hide]` on a
//! `Value` field therefore hides every string, number and boolean inside it.

use std::mem;

use serde_json::{Map, Value};

use super::{
    impls::visit_taken,
    node::{EntryVisitor, Hideable, MapNode, Node, Scalar},
};
use crate::error::HideError;

impl Hideable for Value {
    fn node(&mut self) -> Node<'_> {
        let concrete = match self {
            Value::Null => Node::Opaque,
            Value::Bool(value) => value.node(),
            Value::Number(number) => Node::Scalar(Scalar::Number(number)),
            Value::String(text) => text.node(),
            Value::Array(items) => items.node(),
            Value::Object(map) => map.node(),
        };
        Node::Dynamic(Box::new(concrete))
    }
}

impl MapNode for Map<String, Value> {
    // Taking the whole map keeps the key order when `preserve_order` is on.
    fn for_each_entry(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), HideError> {
        let entries = mem::take(self);
        visit_taken(entries, visit, |key, value| {
            self.insert(key, value);
        })
    }
}

impl Hideable for Map<String, Value> {
    fn node(&mut self) -> Node<'_> {
        Node::Map(self)
    }
}
