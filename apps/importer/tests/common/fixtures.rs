//! Factory functions for Roam export JSON.

use serde_json::{json, Value};

/// A page with the given top-level blocks.
pub fn page(title: &str, children: Vec<Value>) -> Value {
    json!({"title": title, "children": children})
}

/// A block without children.
pub fn block(text: &str) -> Value {
    json!({"string": text})
}

/// A block with nested blocks.
pub fn block_with_children(text: &str, children: Vec<Value>) -> Value {
    json!({"string": text, "children": children})
}

/// A block carrying creation and edit times in epoch milliseconds.
pub fn timed_block(text: &str, create_time: i64, edit_time: i64) -> Value {
    json!({"string": text, "create-time": create_time, "edit-time": edit_time})
}

/// An export made of the given pages.
pub fn export(pages: Vec<Value>) -> Value {
    Value::Array(pages)
}
