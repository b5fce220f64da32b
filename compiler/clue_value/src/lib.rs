//! Clue Value - the data the synthesis engine reads and the artifacts it
//! builds operate on.
//!
//! # Contents
//!
//! - [`Value`]: runtime values, including [`RecordValue`] instances
//! - [`Args`]: positional and keyword arguments for a method call
//! - [`FieldDecl`], [`FieldDefault`], [`Clue`], [`ClueSet`]: field
//!   declarations and their merged, ordered form
//! - [`EvalError`], [`SynthesisError`], [`EvalResult`]: the error surface

mod args;
mod clues;
pub mod errors;
mod value;

pub use args::Args;
pub use clues::{Clue, ClueSet, FieldDecl, FieldDefault};
pub use errors::{EvalError, EvalResult, SynthesisError};
pub use value::{FieldIter, FieldValues, Heap, RecordValue, Value};

pub use clue_ir::{ClassId, Name, SharedInterner, TypeToken};
