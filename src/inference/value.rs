//! Tagged view over `serde_json::Value`
//!
//! Every value is decoded once into a [`ValueNode`] so that classification,
//! recording and signing dispatch on a single tag instead of re-probing the
//! raw JSON value.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Borrowed, decoded view of a JSON value
#[derive(Debug, Clone, Copy)]
pub enum ValueNode<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(&'a str),
    Array(&'a [Value]),
    Object(&'a Map<String, Value>),
}

impl<'a> ValueNode<'a> {
    /// Decode a JSON value into its tag
    pub fn decode(value: &'a Value) -> Self {
        match value {
            Value::Null => ValueNode::Null,
            Value::Bool(b) => ValueNode::Bool(*b),
            Value::Number(n) => decode_number(n),
            Value::String(s) => ValueNode::String(s),
            Value::Array(items) => ValueNode::Array(items),
            Value::Object(map) => ValueNode::Object(map),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ValueNode::Null)
    }

    /// Arrays and objects
    pub fn is_container(&self) -> bool {
        matches!(self, ValueNode::Array(_) | ValueNode::Object(_))
    }

    /// The scalar payload, if this is a non-null scalar
    pub fn scalar(&self) -> Option<ScalarValue> {
        match *self {
            ValueNode::Bool(b) => Some(ScalarValue::Bool(b)),
            ValueNode::Int(i) => Some(ScalarValue::Int(i)),
            ValueNode::UInt(u) => Some(ScalarValue::UInt(u)),
            ValueNode::Float(f) => Some(ScalarValue::Float(f)),
            ValueNode::String(s) => Some(ScalarValue::String(s.to_string())),
            ValueNode::Null | ValueNode::Array(_) | ValueNode::Object(_) => None,
        }
    }
}

fn decode_number(n: &Number) -> ValueNode<'static> {
    if let Some(i) = n.as_i64() {
        ValueNode::Int(i)
    } else if let Some(u) = n.as_u64() {
        ValueNode::UInt(u)
    } else {
        ValueNode::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// A scalar JSON value with a total order, used for unique-value tracking
/// and enum detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl ScalarValue {
    fn rank(&self) -> u8 {
        match self {
            ScalarValue::Bool(_) => 0,
            ScalarValue::Int(_) | ScalarValue::UInt(_) | ScalarValue::Float(_) => 1,
            ScalarValue::String(_) => 2,
        }
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScalarValue {}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use ScalarValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (UInt(a), UInt(b)) => a.cmp(b),
            (Int(a), UInt(b)) => i128::from(*a).cmp(&i128::from(*b)),
            (UInt(a), Int(b)) => i128::from(*a).cmp(&i128::from(*b)),
            (Float(a), Float(b)) => a.total_cmp(b),
            // Integer vs float: compare numerically, integers first on a tie
            (Float(a), b @ (Int(_) | UInt(_))) => a.total_cmp(&b.as_f64()).then(Ordering::Greater),
            (a @ (Int(_) | UInt(_)), Float(b)) => a.as_f64().total_cmp(b).then(Ordering::Less),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            ScalarValue::Bool(b) => b.hash(state),
            ScalarValue::Int(i) => i128::from(*i).hash(state),
            ScalarValue::UInt(u) => i128::from(*u).hash(state),
            ScalarValue::Float(f) => f.to_bits().hash(state),
            ScalarValue::String(s) => s.hash(state),
        }
    }
}

impl ScalarValue {
    fn as_f64(&self) -> f64 {
        match self {
            ScalarValue::Int(i) => *i as f64,
            ScalarValue::UInt(u) => *u as f64,
            ScalarValue::Float(f) => *f,
            ScalarValue::Bool(_) | ScalarValue::String(_) => f64::NAN,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::UInt(u) => write!(f, "{}", u),
            ScalarValue::Float(x) => write!(f, "{}", x),
            ScalarValue::String(s) => f.write_str(s),
        }
    }
}

/// Printed form used to deduplicate examples: strings print bare, everything
/// else as compact JSON.
pub fn printed_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
