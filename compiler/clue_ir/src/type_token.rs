//! Declared type of a field.

use crate::Name;

/// Opaque declared-type annotation attached to a field.
///
/// The engine carries the token from declaration to the merged clue set and
/// never interprets it: no rule checks or converts values against it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeToken(Name);

impl TypeToken {
    /// Token for names introduced without an annotation (storage slots).
    pub const UNTYPED: TypeToken = TypeToken(Name::EMPTY);

    pub const fn new(name: Name) -> Self {
        TypeToken(name)
    }

    /// The interned spelling of the annotation (e.g. `int`, `Expression`).
    pub const fn name(self) -> Name {
        self.0
    }
}
