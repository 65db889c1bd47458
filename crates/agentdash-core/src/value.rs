//! Row data model: an opaque field-name → value mapping.
//!
//! Rows come from JSON documents, so every JSON value has to land on one of
//! the displayable variants. Booleans and nested structures are kept as text.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single displayable field value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged, from = "Value")]
pub enum FieldValue {
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Returns true for `Integer` and `Float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Sort rank of the variant: nulls first, then numbers, then text.
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Integer(_) | Self::Float(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Natural ordering. Values are grouped by kind (null < number < text);
    /// numbers compare numerically and text lexically. This is a total order,
    /// so it can drive a stable sort over columns of mixed kinds.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.total_cmp(&y)
            }
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

/// Default stringification. `Null` displays as an empty string.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Text(b.to_string()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
            },
            Value::String(s) => Self::Text(s),
            nested @ (Value::Array(_) | Value::Object(_)) => Self::Text(nested.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Self::Null)
    }
}

/// One record of a dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, FieldValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Stringified value at `key`; absent fields display as empty.
    pub fn display(&self, key: &str) -> String {
        self.get(key).map(ToString::to_string).unwrap_or_default()
    }

    /// Converts a JSON value into a row. Returns `None` unless it is an object.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                fields: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            }),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_becomes_row() {
        let row = Row::from_json(json!({
            "agent_id": "a-1",
            "score": 3,
            "ratio": 0.5,
            "online": true,
            "mac": null,
            "tags": ["x", "y"],
        }))
        .unwrap();

        assert_eq!(row.get("agent_id"), Some(&FieldValue::Text("a-1".into())));
        assert_eq!(row.get("score"), Some(&FieldValue::Integer(3)));
        assert_eq!(row.get("ratio"), Some(&FieldValue::Float(0.5)));
        assert_eq!(row.get("online"), Some(&FieldValue::Text("true".into())));
        assert_eq!(row.get("mac"), Some(&FieldValue::Null));
        assert_eq!(row.display("tags"), r#"["x","y"]"#);
        assert_eq!(row.display("missing"), "");
    }

    #[test]
    fn non_object_json_is_not_a_row() {
        assert!(Row::from_json(json!([1, 2])).is_none());
        assert!(Row::from_json(json!("agent")).is_none());
    }

    #[test]
    fn deserializes_through_serde() {
        let row: Row = serde_json::from_str(r#"{"id":"b","score":1.25}"#).unwrap();
        assert_eq!(row.display("id"), "b");
        assert_eq!(row.get("score"), Some(&FieldValue::Float(1.25)));
    }

    #[test]
    fn display_of_values() {
        assert_eq!(FieldValue::Null.to_string(), "");
        assert_eq!(FieldValue::Integer(-4).to_string(), "-4");
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Float(2.0).to_string(), "2");
        assert_eq!(FieldValue::from("ok").to_string(), "ok");
    }

    #[test]
    fn natural_cmp_numeric_and_lexical() {
        use FieldValue::*;
        assert_eq!(Integer(9).natural_cmp(&Integer(10)), Ordering::Less);
        assert_eq!(Integer(2).natural_cmp(&Float(1.5)), Ordering::Greater);
        // Kinds rank null < number < text.
        assert_eq!(Text("9".into()).natural_cmp(&Integer(10)), Ordering::Greater);
        assert_eq!(Text("".into()).natural_cmp(&Float(-1.0)), Ordering::Greater);
        assert_eq!(Null.natural_cmp(&Integer(i64::MIN)), Ordering::Less);
        assert_eq!(Null.natural_cmp(&Text("a".into())), Ordering::Less);
        assert_eq!(Null.natural_cmp(&Null), Ordering::Equal);
        assert_eq!(
            Text("abc".into()).natural_cmp(&Text("abd".into())),
            Ordering::Less
        );
    }

    #[test]
    fn natural_cmp_is_transitive_across_kinds() {
        use FieldValue::*;
        let values = [
            Integer(9),
            Integer(10),
            Text("5a".into()),
            Text("10".into()),
            Float(9.5),
            Null,
            Text("".into()),
            Float(-0.0),
            Integer(0),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.natural_cmp(b), b.natural_cmp(a).reverse());
                for c in &values {
                    if a.natural_cmp(b).is_le() && b.natural_cmp(c).is_le() {
                        assert!(a.natural_cmp(c).is_le(), "{a:?} <= {b:?} <= {c:?}");
                    }
                }
            }
        }
    }
}
