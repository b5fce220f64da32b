//! Runtime values.
//!
//! Container variants hold their contents in [`Heap`], whose constructor is
//! private to this module:
//!
//! ```text
//! let s = Value::string("hello");                       // OK
//! let t = Value::tuple(vec![Value::int(1)]);            // OK
//! let s = Value::Str(Heap::new("hello".to_string()));   // ERROR: Heap::new is pub(super)
//! ```
//!
//! Representation, equality and hashing that must reach into records go
//! through the runtime's protocol dispatch, not through the impls here: the
//! `PartialEq` on `Value` compares records by identity only.

mod heap;
mod record;

use std::fmt;

pub use heap::Heap;
pub use record::{FieldIter, FieldValues, RecordValue};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Scalars
    Int(i64),
    Float(f64),
    Bool(bool),
    /// The absent value.
    None,

    // Containers
    Str(Heap<String>),
    /// Immutable, hashable sequence.
    Tuple(Heap<Vec<Value>>),
    /// Sequence that is deliberately unhashable.
    List(Heap<Vec<Value>>),
    /// Insertion-ordered string-keyed mapping; unhashable.
    Map(Heap<Vec<(String, Value)>>),

    // Object model
    /// Instance of a declared record class.
    Record(RecordValue),
    /// Restartable iterable over a record's fields.
    Fields(FieldIter),
    /// Sentinel returned by a comparison that does not handle its operands.
    NotImplemented,
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn map(entries: Vec<(String, Value)>) -> Self {
        Value::Map(Heap::new(entries))
    }
}

// Accessors

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Value::NotImplemented)
    }

    /// Name of the value's built-in type, used in error messages.
    ///
    /// Records report `record`; callers that know the class table print the
    /// class name instead.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::None => "None",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::Fields(_) => "field_iterator",
            Value::NotImplemented => "NotImplemented",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::None => write!(f, "None"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Tuple(items) => write!(f, "Tuple({:?})", &**items),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(entries) => write!(f, "Map({:?})", &**entries),
            Value::Record(r) => write!(f, "{r:?}"),
            Value::Fields(it) => write!(f, "{it:?}"),
            Value::NotImplemented => write!(f, "NotImplemented"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) | (Value::NotImplemented, Value::NotImplemented) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<RecordValue> for Value {
    fn from(r: RecordValue) -> Self {
        Value::Record(r)
    }
}
