//! Deals with run-time value representation
//!
//! A single evaluation produces exactly one [`Value`]. Hosts also use this
//! type in both directions: constants in an environment are `Value`s, and
//! resolvers receive and return `Value`s. The composite variants use
//! immutable collections, so cloning a value that is shared between an
//! environment and a result is cheap.

use im::{HashMap, Vector};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents everything a script can evaluate to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(OrderedFloat<f64>),
    Bool(bool),
    Unit,
    Vec(Vector<Value>),
    Dict(HashMap<String, Value>),
}

// ==============================================================================
// Conversions into Value
// ==============================================================================
impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Self::Int(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(OrderedFloat(x))
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Self::Bool(x)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Unit
    }
}

impl From<Vector<Value>> for Value {
    fn from(xs: Vector<Value>) -> Self {
        Self::Vec(xs)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(xs: HashMap<String, Value>) -> Self {
        Self::Dict(xs)
    }
}

// ==============================================================================
// Conversions out of Value, for resolvers that want concrete types
// ==============================================================================
impl TryFrom<Value> for String {
    type Error = ();
    fn try_from(v: Value) -> Result<String, ()> {
        if let Value::Str(s) = v {
            Ok(s)
        } else {
            Err(())
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = ();
    fn try_from(v: Value) -> Result<i64, ()> {
        if let Value::Int(i) = v {
            Ok(i)
        } else {
            Err(())
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ();
    fn try_from(v: Value) -> Result<f64, ()> {
        if let Value::Float(x) = v {
            Ok(x.0)
        } else {
            Err(())
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ();
    fn try_from(v: Value) -> Result<bool, ()> {
        if let Value::Bool(x) = v {
            Ok(x)
        } else {
            Err(())
        }
    }
}

impl TryFrom<Value> for () {
    type Error = ();
    fn try_from(v: Value) -> Result<(), ()> {
        if let Value::Unit = v {
            Ok(())
        } else {
            Err(())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Unit => write!(f, "()"),
            Value::Vec(xs) => {
                write!(f, "[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", x)?;
                }
                write!(f, "]")
            }
            Value::Dict(xs) => {
                // keys are sorted so the rendering is stable
                let mut keys: Vec<_> = xs.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, k) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, xs[*k])?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use im::{hashmap, vector};

    #[test]
    fn conversion_roundtrip() {
        let v = Value::from("hi");
        assert_eq!(String::try_from(v).unwrap(), "hi");
        assert_eq!(i64::try_from(Value::from(3)).unwrap(), 3);
        assert!(String::try_from(Value::from(3)).is_err());
    }

    #[test]
    fn display_renders_composites() {
        let v = Value::Vec(vector![Value::from("a"), Value::from(1)]);
        assert_eq!(v.to_string(), "[a, 1]");
        assert_eq!(Value::Unit.to_string(), "()");

        let d = Value::Dict(hashmap! {
            "b".to_string() => Value::from(2),
            "a".to_string() => Value::from(1),
        });
        assert_eq!(d.to_string(), "{a: 1, b: 2}");
    }
}
