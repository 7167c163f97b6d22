//! Type lattice for observed JSON values
//!
//! Labels form a small lattice with `null` at the bottom and `mixed` at the
//! top. [`TypeLabel::merge`] computes the least common generalization of two
//! labels and is commutative, idempotent and associative, so partial results
//! can be reduced in any order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::patterns::{IdPrefix, StringKind, classify_string};
use super::value::ValueNode;

/// Observed type of a value at a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeLabel {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Uuid,
    DateTime,
    Url,
    Id,
    /// `array[<items>]`
    Array(ArrayItems),
    Object,
    Mixed,
}

/// Element typing of an array label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayItems {
    /// `array[empty]`
    Empty,
    /// `array[mixed]`: sampled elements disagree
    Mixed,
    /// All sampled elements share this label
    Of(Box<TypeLabel>),
}

impl TypeLabel {
    pub fn array_of(items: TypeLabel) -> Self {
        TypeLabel::Array(ArrayItems::Of(Box::new(items)))
    }

    /// Any of `string, uuid, datetime, url, id`
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            TypeLabel::String | TypeLabel::Uuid | TypeLabel::DateTime | TypeLabel::Url | TypeLabel::Id
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeLabel::Integer | TypeLabel::Number)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeLabel::Array(_))
    }

    /// Labels whose values are eligible for enum detection
    pub fn is_enum_candidate(&self) -> bool {
        matches!(self, TypeLabel::String | TypeLabel::Integer | TypeLabel::Boolean)
    }

    /// Least common generalization of two labels
    pub fn merge(&self, other: &TypeLabel) -> TypeLabel {
        use TypeLabel::*;

        if self == other {
            return self.clone();
        }

        match (self, other) {
            (Null, x) | (x, Null) => x.clone(),
            (a, b) if a.is_numeric() && b.is_numeric() => Number,
            (a, b) if a.is_string_like() && b.is_string_like() => String,
            (Array(ArrayItems::Empty), b @ Array(_)) | (b @ Array(_), Array(ArrayItems::Empty)) => {
                b.clone()
            }
            (Array(_), Array(_)) => Array(ArrayItems::Mixed),
            _ => Mixed,
        }
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeLabel::Null => write!(f, "null"),
            TypeLabel::Boolean => write!(f, "boolean"),
            TypeLabel::Integer => write!(f, "integer"),
            TypeLabel::Number => write!(f, "number"),
            TypeLabel::String => write!(f, "string"),
            TypeLabel::Uuid => write!(f, "uuid"),
            TypeLabel::DateTime => write!(f, "datetime"),
            TypeLabel::Url => write!(f, "url"),
            TypeLabel::Id => write!(f, "id"),
            TypeLabel::Array(ArrayItems::Empty) => write!(f, "array[empty]"),
            TypeLabel::Array(ArrayItems::Mixed) => write!(f, "array[mixed]"),
            TypeLabel::Array(ArrayItems::Of(inner)) => write!(f, "array[{}]", inner),
            TypeLabel::Object => write!(f, "object"),
            TypeLabel::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for TypeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = match s {
            "null" => TypeLabel::Null,
            "boolean" => TypeLabel::Boolean,
            "integer" => TypeLabel::Integer,
            "number" => TypeLabel::Number,
            "string" => TypeLabel::String,
            "uuid" => TypeLabel::Uuid,
            "datetime" => TypeLabel::DateTime,
            "url" => TypeLabel::Url,
            "id" => TypeLabel::Id,
            "object" => TypeLabel::Object,
            "mixed" => TypeLabel::Mixed,
            "array[empty]" => TypeLabel::Array(ArrayItems::Empty),
            "array[mixed]" => TypeLabel::Array(ArrayItems::Mixed),
            other => {
                let inner = other
                    .strip_prefix("array[")
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| format!("Unknown type label: {}", other))?;
                TypeLabel::array_of(inner.parse()?)
            }
        };
        Ok(label)
    }
}

impl Serialize for TypeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Classifies values into [`TypeLabel`]s
#[derive(Debug, Clone)]
pub struct TypeClassifier<'c> {
    id_prefixes: &'c [IdPrefix],
    array_sample: usize,
}

impl<'c> TypeClassifier<'c> {
    pub fn new(id_prefixes: &'c [IdPrefix], array_sample: usize) -> Self {
        Self {
            id_prefixes,
            array_sample,
        }
    }

    pub fn classify(&self, node: ValueNode<'_>) -> TypeLabel {
        match node {
            ValueNode::Null => TypeLabel::Null,
            ValueNode::Bool(_) => TypeLabel::Boolean,
            ValueNode::Int(_) | ValueNode::UInt(_) => TypeLabel::Integer,
            ValueNode::Float(_) => TypeLabel::Number,
            ValueNode::String(s) => match classify_string(s, self.id_prefixes) {
                StringKind::Uuid => TypeLabel::Uuid,
                StringKind::DateTime => TypeLabel::DateTime,
                StringKind::Url => TypeLabel::Url,
                StringKind::Id => TypeLabel::Id,
                StringKind::Plain => TypeLabel::String,
            },
            ValueNode::Array(items) => self.classify_array(items),
            ValueNode::Object(_) => TypeLabel::Object,
        }
    }

    fn classify_array(&self, items: &[serde_json::Value]) -> TypeLabel {
        let mut sampled = items
            .iter()
            .take(self.array_sample.max(1))
            .map(|item| self.classify(ValueNode::decode(item)));

        let Some(first) = sampled.next() else {
            return TypeLabel::Array(ArrayItems::Empty);
        };

        if sampled.all(|label| label == first) {
            TypeLabel::array_of(first)
        } else {
            TypeLabel::Array(ArrayItems::Mixed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::patterns::default_id_prefixes;
    use serde_json::json;

    fn all_labels() -> Vec<TypeLabel> {
        vec![
            TypeLabel::Null,
            TypeLabel::Boolean,
            TypeLabel::Integer,
            TypeLabel::Number,
            TypeLabel::String,
            TypeLabel::Uuid,
            TypeLabel::DateTime,
            TypeLabel::Url,
            TypeLabel::Id,
            TypeLabel::Array(ArrayItems::Empty),
            TypeLabel::Array(ArrayItems::Mixed),
            TypeLabel::array_of(TypeLabel::String),
            TypeLabel::array_of(TypeLabel::Integer),
            TypeLabel::array_of(TypeLabel::Object),
            TypeLabel::Object,
            TypeLabel::Mixed,
        ]
    }

    fn classify(value: serde_json::Value) -> TypeLabel {
        let prefixes = default_id_prefixes();
        TypeClassifier::new(&prefixes, 10).classify(ValueNode::decode(&value))
    }

    #[test]
    fn test_merge_idempotent() {
        for a in all_labels() {
            assert_eq!(a.merge(&a), a, "{} is not idempotent", a);
        }
    }

    #[test]
    fn test_merge_commutative() {
        for a in all_labels() {
            for b in all_labels() {
                assert_eq!(a.merge(&b), b.merge(&a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_merge_associative() {
        let labels = all_labels();
        for a in &labels {
            for b in &labels {
                for c in &labels {
                    assert_eq!(
                        a.merge(b).merge(c),
                        a.merge(&b.merge(c)),
                        "({} {} {})",
                        a,
                        b,
                        c
                    );
                }
            }
        }
    }

    #[test]
    fn test_merge_rules() {
        assert_eq!(TypeLabel::Null.merge(&TypeLabel::Url), TypeLabel::Url);
        assert_eq!(TypeLabel::Integer.merge(&TypeLabel::Number), TypeLabel::Number);
        assert_eq!(TypeLabel::Uuid.merge(&TypeLabel::Id), TypeLabel::String);
        assert_eq!(TypeLabel::DateTime.merge(&TypeLabel::String), TypeLabel::String);
        assert_eq!(TypeLabel::Boolean.merge(&TypeLabel::Integer), TypeLabel::Mixed);
        assert_eq!(TypeLabel::String.merge(&TypeLabel::Object), TypeLabel::Mixed);
        assert_eq!(
            TypeLabel::array_of(TypeLabel::String).merge(&TypeLabel::array_of(TypeLabel::Integer)),
            TypeLabel::Array(ArrayItems::Mixed)
        );
        assert_eq!(
            TypeLabel::Array(ArrayItems::Empty).merge(&TypeLabel::array_of(TypeLabel::String)),
            TypeLabel::array_of(TypeLabel::String)
        );
        assert_eq!(
            TypeLabel::array_of(TypeLabel::String).merge(&TypeLabel::Object),
            TypeLabel::Mixed
        );
    }

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify(json!(null)), TypeLabel::Null);
        assert_eq!(classify(json!(false)), TypeLabel::Boolean);
        assert_eq!(classify(json!(7)), TypeLabel::Integer);
        assert_eq!(classify(json!(7.25)), TypeLabel::Number);
        assert_eq!(classify(json!("hello")), TypeLabel::String);
        assert_eq!(classify(json!("https://x.io")), TypeLabel::Url);
        assert_eq!(classify(json!("msg_01")), TypeLabel::Id);
        assert_eq!(classify(json!({})), TypeLabel::Object);
    }

    #[test]
    fn test_classify_arrays() {
        assert_eq!(classify(json!([])), TypeLabel::Array(ArrayItems::Empty));
        assert_eq!(
            classify(json!(["a", "b"])),
            TypeLabel::array_of(TypeLabel::String)
        );
        assert_eq!(
            classify(json!([1, "b"])),
            TypeLabel::Array(ArrayItems::Mixed)
        );
        assert_eq!(
            classify(json!([[1], [2]])),
            TypeLabel::array_of(TypeLabel::array_of(TypeLabel::Integer))
        );
    }

    #[test]
    fn test_classify_array_samples_leading_elements() {
        let prefixes = default_id_prefixes();
        let classifier = TypeClassifier::new(&prefixes, 2);
        let value = json!([1, 2, "three"]);
        assert_eq!(
            classifier.classify(ValueNode::decode(&value)),
            TypeLabel::array_of(TypeLabel::Integer)
        );
    }

    #[test]
    fn test_label_string_roundtrip() {
        for label in all_labels() {
            let parsed: TypeLabel = label.to_string().parse().unwrap();
            assert_eq!(parsed, label);
        }
        let nested: TypeLabel = "array[array[uuid]]".parse().unwrap();
        assert_eq!(nested, TypeLabel::array_of(TypeLabel::array_of(TypeLabel::Uuid)));
        assert!("tuple".parse::<TypeLabel>().is_err());
    }

    #[test]
    fn test_label_serializes_as_string() {
        let json = serde_json::to_string(&TypeLabel::array_of(TypeLabel::Id)).unwrap();
        assert_eq!(json, r#""array[id]""#);
        let back: TypeLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TypeLabel::array_of(TypeLabel::Id));
    }
}
