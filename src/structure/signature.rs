//! Canonical structure signatures
//!
//! A signature describes the full nested shape of a value while ignoring its
//! contents. Two values share a signature exactly when they have the same
//! keys at every level and the same scalar kinds at every leaf, so signatures
//! can be used as class keys.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::inference::ValueNode;

/// Default number of leading array elements signed
pub const DEFAULT_ARRAY_SAMPLE: usize = 10;

/// Signature of a value, sampling the first 10 elements of each array
pub fn signature(value: &Value) -> String {
    signature_with_sample(value, DEFAULT_ARRAY_SAMPLE)
}

/// Signature of a value, sampling the first `array_sample` elements of each array
pub fn signature_with_sample(value: &Value, array_sample: usize) -> String {
    let mut out = String::new();
    write_signature(&mut out, value, array_sample.max(1));
    out
}

fn write_signature(out: &mut String, value: &Value, array_sample: usize) {
    match ValueNode::decode(value) {
        ValueNode::Null => out.push_str("null"),
        ValueNode::Bool(_) => out.push_str("boolean"),
        ValueNode::Int(_) | ValueNode::UInt(_) => out.push_str("integer"),
        ValueNode::Float(_) => out.push_str("number"),
        ValueNode::String(_) => out.push_str("string"),
        ValueNode::Array(items) => {
            let distinct: BTreeSet<String> = items
                .iter()
                .take(array_sample)
                .map(|item| signature_with_sample(item, array_sample))
                .collect();
            out.push_str("array[");
            for (i, sig) in distinct.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(sig);
            }
            out.push(']');
        }
        ValueNode::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push_str("object{");
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_key(out, key);
                out.push(':');
                write_signature(out, &map[key.as_str()], array_sample);
            }
            out.push('}');
        }
    }
}

const KEY_DELIMITERS: [char; 8] = [':', ',', '{', '}', '[', ']', '"', '\\'];

// Keys holding a delimiter are quoted so they cannot mimic another shape
fn write_key(out: &mut String, key: &str) {
    if !key.contains(KEY_DELIMITERS) {
        out.push_str(key);
        return;
    }
    out.push('"');
    for c in key.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

/// Rough structural complexity: the number of `:`, `[` and `{` in a signature
pub fn complexity(signature: &str) -> usize {
    signature
        .chars()
        .filter(|c| matches!(c, ':' | '[' | '{'))
        .count()
}
