//! Record instances and the field iterators built over them.

use std::fmt;
use std::sync::Arc;

use clue_ir::{ClassId, Name};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Value;

struct RecordData {
    class: ClassId,
    fields: RwLock<FxHashMap<Name, Value>>,
}

/// An instance of a declared record class.
///
/// Cloning a `RecordValue` clones the handle, not the instance: all clones
/// observe the same field assignments. Identity (for the default equality and
/// hash of classes without synthesized behaviors) is the allocation address.
#[derive(Clone)]
pub struct RecordValue(Arc<RecordData>);

impl RecordValue {
    /// Allocate an instance with no fields assigned.
    ///
    /// Fields are populated by the class's `construct` artifact.
    pub fn allocate(class: ClassId) -> Self {
        RecordValue(Arc::new(RecordData {
            class,
            fields: RwLock::new(FxHashMap::default()),
        }))
    }

    /// The concrete runtime class of this instance.
    pub fn class(&self) -> ClassId {
        self.0.class
    }

    /// Read a field, if it has been assigned.
    pub fn get(&self, field: Name) -> Option<Value> {
        self.0.fields.read().get(&field).cloned()
    }

    /// Assign a field. Storage-policy checks happen in the runtime.
    pub fn set(&self, field: Name, value: Value) {
        self.0.fields.write().insert(field, value);
    }

    /// Whether a field has been assigned.
    pub fn has(&self, field: Name) -> bool {
        self.0.fields.read().contains_key(&field)
    }

    /// Address-based identity, stable for the lifetime of the instance.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub fn ptr_eq(&self, other: &RecordValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({:?} @ {:#x})", self.0.class, self.id())
    }
}

/// Iterable view of a record's fields in declared order.
///
/// Produced by the `iterate-fields` artifact. Each call to [`FieldIter::iter`]
/// starts a new, independent position; values are read from the record when
/// the iterator advances, so later assignments are observed.
#[derive(Clone)]
pub struct FieldIter {
    record: RecordValue,
    names: Arc<[Name]>,
}

impl FieldIter {
    pub fn new(record: RecordValue, names: Arc<[Name]>) -> Self {
        FieldIter { record, names }
    }

    pub fn iter(&self) -> FieldValues {
        FieldValues {
            record: self.record.clone(),
            names: Arc::clone(&self.names),
            pos: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Debug for FieldIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldIter({:?}, {} fields)", self.record, self.names.len())
    }
}

/// Lazy iterator over a record's field values.
///
/// Yields `Err(name)` for a field that was never assigned.
pub struct FieldValues {
    record: RecordValue,
    names: Arc<[Name]>,
    pos: usize,
}

impl Iterator for FieldValues {
    type Item = Result<Value, Name>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = *self.names.get(self.pos)?;
        self.pos += 1;
        Some(self.record.get(name).ok_or(name))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.names.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FieldValues {}
