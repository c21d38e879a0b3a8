use serde::{Deserialize, Serialize};

/// A property value as declared on a geometry unit.
///
/// Deserializes from plain JSON without a type tag; integers are tried
/// before reals so that index grids keep their integer type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
    IntList(Vec<i64>),
    RealList(Vec<f64>),
    TextList(Vec<String>),
    IntGrid(Vec<Vec<i64>>),
}

/// Conversion from a stored [`PropertyValue`] into a concrete type.
pub trait FromProperty: Sized {
    /// Human-readable name of the expected type, used in error messages.
    const EXPECTED: &'static str;

    /// Returns `None` if `value` does not hold a `Self`.
    fn from_property(value: &PropertyValue) -> Option<Self>;
}

impl FromProperty for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromProperty for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromProperty for f64 {
    const EXPECTED: &'static str = "real";

    #[allow(clippy::cast_precision_loss)]
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Real(r) => Some(*r),
            PropertyValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromProperty for String {
    const EXPECTED: &'static str = "string";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromProperty for Vec<i64> {
    const EXPECTED: &'static str = "list of integers";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::IntList(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromProperty for Vec<f64> {
    const EXPECTED: &'static str = "list of reals";

    #[allow(clippy::cast_precision_loss)]
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::RealList(v) => Some(v.clone()),
            PropertyValue::IntList(v) => Some(v.iter().map(|&i| i as f64).collect()),
            _ => None,
        }
    }
}

impl FromProperty for Vec<String> {
    const EXPECTED: &'static str = "list of strings";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::TextList(v) => Some(v.clone()),
            PropertyValue::IntList(v) if v.is_empty() => Some(Vec::new()),
            _ => None,
        }
    }
}

impl FromProperty for Vec<Vec<i64>> {
    const EXPECTED: &'static str = "grid of integers";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::IntGrid(v) => Some(v.clone()),
            PropertyValue::IntList(v) if v.is_empty() => Some(Vec::new()),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<Vec<i64>> for PropertyValue {
    fn from(v: Vec<i64>) -> Self {
        Self::IntList(v)
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(v: Vec<f64>) -> Self {
        Self::RealList(v)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(v: Vec<&str>) -> Self {
        Self::TextList(v.into_iter().map(String::from).collect())
    }
}

impl From<Vec<Vec<i64>>> for PropertyValue {
    fn from(v: Vec<Vec<i64>>) -> Self {
        Self::IntGrid(v)
    }
}
