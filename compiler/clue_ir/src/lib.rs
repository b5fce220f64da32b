//! Clue IR - identifiers shared by every layer of the clue engine.
//!
//! This crate holds the small, `Copy` handles the rest of the workspace is
//! built on:
//! - [`Name`]: interned identifier (field names, class names, behavior names)
//! - [`StringInterner`] / [`SharedInterner`]: the interner producing them
//! - [`ClassId`]: identity of a declared record class
//! - [`TypeToken`]: opaque declared-type annotation of a field
//!
//! Nothing here knows about runtime values; see `clue_value` for those.

mod class_id;
mod interner;
mod name;
mod type_token;

pub use class_id::ClassId;
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use type_token::TypeToken;
