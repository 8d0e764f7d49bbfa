//! Deals with types
//!
//! Type descriptors label resource signatures and are what the typed
//! evaluation path checks call sites against. They are compared only,
//! never mutated, and compatibility is exact structural equality.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Value;

/// Describes the shape of a [`Value`], or of a resource's argument list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// no value at all; also the args-type of a nullary resource
    Empty,
    Str,
    Int,
    Float,
    Bool,
    Vec(Box<DataType>),
    Dict(Box<DataType>),
    /// the args-type of a resource taking more than one argument
    Tuple(Vec<DataType>),
}

impl DataType {
    pub fn vec(self) -> Self {
        Self::Vec(Box::new(self))
    }

    pub fn dict(self) -> Self {
        Self::Dict(Box::new(self))
    }
}

/// infers the descriptor of a value
///
/// Collections are typed by their first element; an empty collection
/// infers an `Empty` element type.
pub fn type_of(value: &Value) -> DataType {
    match value {
        Value::Str(_) => DataType::Str,
        Value::Int(_) => DataType::Int,
        Value::Float(_) => DataType::Float,
        Value::Bool(_) => DataType::Bool,
        Value::Unit => DataType::Empty,
        Value::Vec(xs) => match xs.front() {
            Some(x) => type_of(x).vec(),
            None => DataType::Empty.vec(),
        },
        Value::Dict(xs) => match xs.values().next() {
            Some(x) => type_of(x).dict(),
            None => DataType::Empty.dict(),
        },
    }
}

/// infers the descriptor of an evaluated argument list
///
/// This is the shape that is matched against a resource's declared
/// args-type: `Empty` for no arguments, the plain type for exactly one,
/// and a `Tuple` for several.
pub fn args_type_of(args: &[Value]) -> DataType {
    match args {
        [] => DataType::Empty,
        [single] => type_of(single),
        many => DataType::Tuple(many.iter().map(type_of).collect()),
    }
}

/// whether an actual shape satisfies an expected one
///
/// There is no subtyping, so this is plain structural equality. It only
/// exists as a named seam so composite compatibility can grow without
/// touching the call-site check in the VM.
pub fn is_assignable(actual: &DataType, expected: &DataType) -> bool {
    actual == expected
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Empty => write!(f, "empty"),
            DataType::Str => write!(f, "string"),
            DataType::Int => write!(f, "int"),
            DataType::Float => write!(f, "float"),
            DataType::Bool => write!(f, "bool"),
            DataType::Vec(t) => write!(f, "vec<{}>", t),
            DataType::Dict(t) => write!(f, "dict<{}>", t),
            DataType::Tuple(ts) => {
                write!(f, "(")?;
                for (i, t) in ts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use im::{hashmap, vector, HashMap};

    #[test]
    fn infers_primitives() {
        assert_eq!(type_of(&Value::from("x")), DataType::Str);
        assert_eq!(type_of(&Value::from(1)), DataType::Int);
        assert_eq!(type_of(&Value::Unit), DataType::Empty);
    }

    #[test]
    fn infers_collections_from_first_element() {
        let xs = Value::Vec(vector![Value::from(1), Value::from(2)]);
        assert_eq!(type_of(&xs), DataType::Int.vec());
        assert_eq!(type_of(&Value::Vec(vector![])), DataType::Empty.vec());

        let d = Value::Dict(hashmap! {"a".to_string() => Value::from("x")});
        assert_eq!(type_of(&d), DataType::Str.dict());
        assert_eq!(type_of(&Value::Dict(HashMap::new())), DataType::Empty.dict());
    }

    #[test]
    fn args_shapes() {
        assert_eq!(args_type_of(&[]), DataType::Empty);
        assert_eq!(args_type_of(&[Value::from("x")]), DataType::Str);
        assert_eq!(
            args_type_of(&[Value::from("x"), Value::from(1)]),
            DataType::Tuple(vec![DataType::Str, DataType::Int])
        );
    }

    #[test]
    fn assignability_is_exact() {
        assert!(is_assignable(&DataType::Str, &DataType::Str));
        assert!(!is_assignable(&DataType::Int, &DataType::Str));
        assert!(!is_assignable(&DataType::Str.vec(), &DataType::Int.vec()));
    }

    #[test]
    fn renders_surface_names() {
        assert_eq!(DataType::Str.to_string(), "string");
        assert_eq!(DataType::Str.vec().to_string(), "vec<string>");
        let t = DataType::Tuple(vec![DataType::Str, DataType::Int]);
        assert_eq!(t.to_string(), "(string, int)");
    }
}
