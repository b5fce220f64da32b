//! Record protocols: construction, representation, equality, hashing,
//! iteration and positional matching.
//!
//! Each protocol resolves its behavior on the receiver's class. When the
//! class has no artifact for it (no rule registered, or no clues), the
//! default object behavior applies:
//!
//! | Protocol | Default |
//! |----------|---------|
//! | construct | accepts no arguments |
//! | represent | `<Name object at 0x...>` |
//! | equals | identity |
//! | hash | identity |
//! | iterate | `NotIterable` |
//!
//! Nested values recurse back into these entry points, so each one runs
//! under [`ensure_sufficient_stack`].

use std::hash::{Hash, Hasher};

use clue_ir::ClassId;
use clue_value::{Args, EvalError, EvalResult, FieldValues, RecordValue, Value};
use rustc_hash::FxHasher;

use super::Runtime;
use crate::stack::ensure_sufficient_stack;

/// One-sided equality outcome.
///
/// `NotSupported` means the left operand does not know how to compare with
/// the right one; [`Runtime::equals`] then asks the right operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    NotSupported,
}

impl Comparison {
    fn from_bool(equal: bool) -> Self {
        if equal {
            Comparison::Equal
        } else {
            Comparison::NotEqual
        }
    }
}

// Discriminants mixed into hashes so `(1,)` and `1` differ.
const TAG_NONE: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_INT: u8 = 2;
const TAG_FLOAT: u8 = 3;
const TAG_STR: u8 = 4;
const TAG_TUPLE: u8 = 5;
const TAG_IDENTITY: u8 = 6;

impl Runtime {
    /// Allocate an instance of `class` and run its `construct` behavior.
    #[tracing::instrument(level = "trace", skip(self, args), fields(class = self.class_name(class)))]
    pub fn construct(&self, class: ClassId, args: &Args) -> EvalResult {
        let info = self.class(class)?;
        let this = Value::Record(RecordValue::allocate(class));
        match self.resolve_method(&info, self.names.construct)? {
            Some(target) => {
                let result = target.call(self, &this, args)?;
                if !matches!(result, Value::None) {
                    return Err(EvalError::InvalidReturn {
                        method: "construct".to_owned(),
                        expected: "None",
                        got: result.type_name(),
                    });
                }
            }
            None if !args.is_empty() => {
                return Err(EvalError::NoConstructorArgs {
                    class: self.text(info.name()).to_owned(),
                    got: args.len(),
                });
            }
            None => {}
        }
        Ok(this)
    }

    /// Canonical text of a value.
    pub fn represent(&self, value: &Value) -> Result<String, EvalError> {
        ensure_sufficient_stack(|| match value {
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(n) => Ok(format!("{n:?}")),
            Value::Bool(true) => Ok("True".to_owned()),
            Value::Bool(false) => Ok("False".to_owned()),
            Value::None => Ok("None".to_owned()),
            Value::Str(s) => Ok(quote(s.as_str())),
            Value::Tuple(items) => {
                let inner = self.represent_all(items)?;
                if items.len() == 1 {
                    Ok(format!("({inner},)"))
                } else {
                    Ok(format!("({inner})"))
                }
            }
            Value::List(items) => Ok(format!("[{}]", self.represent_all(items)?)),
            Value::Map(entries) => {
                let mut parts = Vec::with_capacity(entries.len());
                for (key, value) in entries.iter() {
                    parts.push(format!("{}: {}", quote(key), self.represent(value)?));
                }
                Ok(format!("{{{}}}", parts.join(", ")))
            }
            Value::Record(record) => self.represent_record(value, record),
            Value::Fields(fields) => Ok(format!("<field iterator, {} fields>", fields.len())),
            Value::NotImplemented => Ok("NotImplemented".to_owned()),
        })
    }

    fn represent_all(&self, items: &[Value]) -> Result<String, EvalError> {
        let parts = items
            .iter()
            .map(|item| self.represent(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(", "))
    }

    fn represent_record(&self, this: &Value, record: &RecordValue) -> Result<String, EvalError> {
        let class = self.class(record.class())?;
        match self.resolve_method(&class, self.names.represent)? {
            Some(target) => match target.call(self, this, &Args::new())? {
                Value::Str(s) => Ok(s.as_str().to_owned()),
                other => Err(EvalError::InvalidReturn {
                    method: "represent".to_owned(),
                    expected: "str",
                    got: other.type_name(),
                }),
            },
            None => Ok(format!(
                "<{} object at {:#x}>",
                self.text(class.name()),
                record.id()
            )),
        }
    }

    /// Ask `left` whether it equals `right`, without reflection.
    pub fn compare(&self, left: &Value, right: &Value) -> Result<Comparison, EvalError> {
        ensure_sufficient_stack(|| {
            let Value::Record(record) = left else {
                if right.as_record().is_some() {
                    return Ok(Comparison::NotSupported);
                }
                return self.compare_plain(left, right);
            };

            let class = self.class(record.class())?;
            let Some(target) = self.resolve_method(&class, self.names.equals)? else {
                return Ok(match right {
                    Value::Record(other) if record.ptr_eq(other) => Comparison::Equal,
                    _ => Comparison::NotSupported,
                });
            };
            match target.call(self, left, &Args::positional([right.clone()]))? {
                Value::Bool(equal) => Ok(Comparison::from_bool(equal)),
                Value::NotImplemented => Ok(Comparison::NotSupported),
                other => Err(EvalError::InvalidReturn {
                    method: "equals".to_owned(),
                    expected: "bool",
                    got: other.type_name(),
                }),
            }
        })
    }

    /// Equality of non-record values. Values of different types are unequal;
    /// `Int(1)` does not equal `Float(1.0)` or `Bool(true)`.
    fn compare_plain(&self, left: &Value, right: &Value) -> Result<Comparison, EvalError> {
        let equal = match (left, right) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) | (Value::NotImplemented, Value::NotImplemented) => true,
            (Value::Str(a), Value::Str(b)) => a.as_str() == b.as_str(),
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => {
                self.sequences_equal(a, b)?
            }
            (Value::Map(a), Value::Map(b)) => self.maps_equal(a, b)?,
            _ => false,
        };
        Ok(Comparison::from_bool(equal))
    }

    fn sequences_equal(&self, a: &[Value], b: &[Value]) -> Result<bool, EvalError> {
        if a.len() != b.len() {
            return Ok(false);
        }
        for (x, y) in a.iter().zip(b) {
            if !self.equals(x, y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Maps compare by key set and value, ignoring entry order.
    fn maps_equal(&self, a: &[(String, Value)], b: &[(String, Value)]) -> Result<bool, EvalError> {
        if a.len() != b.len() {
            return Ok(false);
        }
        for (key, value) in a {
            let Some((_, other)) = b.iter().find(|(k, _)| k == key) else {
                return Ok(false);
            };
            if !self.equals(value, other)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Symmetric equality.
    ///
    /// Asks `left`, then the reflected `right`. If neither handles the
    /// comparison, falls back to identity.
    pub fn equals(&self, left: &Value, right: &Value) -> Result<bool, EvalError> {
        match self.compare(left, right)? {
            Comparison::Equal => return Ok(true),
            Comparison::NotEqual => return Ok(false),
            Comparison::NotSupported => {}
        }
        match self.compare(right, left)? {
            Comparison::Equal => Ok(true),
            Comparison::NotEqual => Ok(false),
            Comparison::NotSupported => Ok(match (left, right) {
                (Value::Record(a), Value::Record(b)) => a.ptr_eq(b),
                _ => false,
            }),
        }
    }

    /// Hash a value. Lists, maps and iterators are unhashable.
    pub fn hash(&self, value: &Value) -> Result<u64, EvalError> {
        ensure_sufficient_stack(|| {
            let mut hasher = FxHasher::default();
            match value {
                Value::Int(n) => {
                    hasher.write_u8(TAG_INT);
                    n.hash(&mut hasher);
                }
                Value::Float(n) => {
                    hasher.write_u8(TAG_FLOAT);
                    // -0.0 == 0.0, so they must hash alike.
                    let n = if *n == 0.0 { 0.0 } else { *n };
                    n.to_bits().hash(&mut hasher);
                }
                Value::Bool(b) => {
                    hasher.write_u8(TAG_BOOL);
                    b.hash(&mut hasher);
                }
                Value::None => hasher.write_u8(TAG_NONE),
                Value::Str(s) => {
                    hasher.write_u8(TAG_STR);
                    s.as_str().hash(&mut hasher);
                }
                Value::Tuple(items) => return self.hash_sequence(items),
                Value::Record(record) => return self.hash_record(value, record),
                Value::List(_) | Value::Map(_) | Value::Fields(_) | Value::NotImplemented => {
                    return Err(EvalError::Unhashable {
                        type_name: value.type_name().to_owned(),
                    });
                }
            }
            Ok(hasher.finish())
        })
    }

    /// Hash of an ordered tuple of values. Equal to `hash` of the same
    /// values wrapped in a tuple.
    pub fn hash_sequence(&self, values: &[Value]) -> Result<u64, EvalError> {
        let mut hasher = FxHasher::default();
        hasher.write_u8(TAG_TUPLE);
        hasher.write_usize(values.len());
        for value in values {
            hasher.write_u64(self.hash(value)?);
        }
        Ok(hasher.finish())
    }

    fn hash_record(&self, this: &Value, record: &RecordValue) -> Result<u64, EvalError> {
        let class = self.class(record.class())?;
        if let Some(target) = self.resolve_method(&class, self.names.hash)? {
            return match target.call(self, this, &Args::new())? {
                Value::Int(n) => Ok(u64::from_ne_bytes(n.to_ne_bytes())),
                other => Err(EvalError::InvalidReturn {
                    method: "hash".to_owned(),
                    expected: "int",
                    got: other.type_name(),
                }),
            };
        }

        // Value equality without a matching hash would break the hash
        // contract, so such records are unhashable.
        if self.resolve_method(&class, self.names.equals)?.is_some() {
            return Err(EvalError::Unhashable {
                type_name: self.text(class.name()).to_owned(),
            });
        }
        let mut hasher = FxHasher::default();
        hasher.write_u8(TAG_IDENTITY);
        hasher.write_usize(record.id());
        Ok(hasher.finish())
    }

    /// Start a fresh pass over a record's fields.
    ///
    /// Each call returns an independent iterator.
    pub fn iterate(&self, value: &Value) -> Result<RecordFields<'_>, EvalError> {
        let not_iterable = |type_name: &str| EvalError::NotIterable {
            type_name: type_name.to_owned(),
        };
        let Value::Record(record) = value else {
            return Err(not_iterable(value.type_name()));
        };
        let class = self.class(record.class())?;
        let Some(target) = self.resolve_method(&class, self.names.iterate_fields)? else {
            return Err(not_iterable(self.text(class.name())));
        };
        match target.call(self, value, &Args::new())? {
            Value::Fields(fields) => Ok(RecordFields {
                rt: self,
                record: record.clone(),
                values: fields.iter(),
            }),
            other => Err(EvalError::InvalidReturn {
                method: "iterate-fields".to_owned(),
                expected: "field_iterator",
                got: other.type_name(),
            }),
        }
    }

    /// Positional destructuring against `class`.
    ///
    /// Returns `None` when `value` is not an instance of `class`, otherwise
    /// the first `arity` fields named by the class's `match-args`.
    pub fn match_positional(
        &self,
        value: &Value,
        class: ClassId,
        arity: usize,
    ) -> Result<Option<Vec<Value>>, EvalError> {
        if !self.is_instance(value, class) {
            return Ok(None);
        }
        let info = self.class(class)?;
        let too_many = |expected: usize| EvalError::TooManySubpatterns {
            class: self.text(info.name()).to_owned(),
            expected,
            got: arity,
        };

        let names = match self.resolve_method(&info, self.names.match_args)? {
            Some(target) => target.call(self, value, &Args::new())?,
            None if arity == 0 => return Ok(Some(Vec::new())),
            None => return Err(too_many(0)),
        };
        let Some(names) = names.as_tuple() else {
            return Err(EvalError::InvalidReturn {
                method: "match-args".to_owned(),
                expected: "tuple",
                got: names.type_name(),
            });
        };
        if arity > names.len() {
            return Err(too_many(names.len()));
        }

        let mut values = Vec::with_capacity(arity);
        for name in &names[..arity] {
            let Some(field) = name.as_str() else {
                return Err(EvalError::InvalidReturn {
                    method: "match-args".to_owned(),
                    expected: "str",
                    got: name.type_name(),
                });
            };
            values.push(self.get_field(value, field)?);
        }
        Ok(Some(values))
    }
}

/// Iterator over a record's field values, produced by [`Runtime::iterate`].
///
/// A field with no instance value yields its class default, or
/// `UndefinedField` if it has none.
pub struct RecordFields<'rt> {
    rt: &'rt Runtime,
    record: RecordValue,
    values: FieldValues,
}

impl Iterator for RecordFields<'_> {
    type Item = EvalResult;

    fn next(&mut self) -> Option<Self::Item> {
        Some(match self.values.next()? {
            Ok(value) => Ok(value),
            Err(name) => self.rt.read_field(&self.record, name),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl ExactSizeIterator for RecordFields<'_> {}

/// Quote a string the way the record protocols print it: single quotes
/// unless the text contains a single quote and no double quote.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
