//! Identity of a declared record class.

use std::fmt;

/// Index of a class in its `ClassTable`.
///
/// Class identity is what the synthesized `equals` rule compares: two records
/// are comparable only when their runtime `ClassId`s are identical, even if
/// the classes share a name and an identical field layout.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClassId(u32);

impl ClassId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ClassId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
