//! Field declarations and the merged clue set.
//!
//! A class declares an ordered list of [`FieldDecl`]s. A [`ClueSet`] is the
//! merge of those lists along the ancestor chain, base first. Merging a name
//! that is already present overrides it in place: the position of the first
//! declaration is kept, everything else comes from the later declaration.

use clue_ir::{Name, TypeToken};
use rustc_hash::FxHashMap;

use crate::Value;

/// Class-level value associated with a declared field.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldDefault {
    /// Bare declaration (`x: int`).
    #[default]
    Absent,
    /// Name introduced by a storage-slot declaration. Occupies the class
    /// namespace but is never a default.
    SlotPlaceholder,
    /// A real default, detected by presence: `0`, `""` and `false` count.
    Value(Value),
}

impl FieldDefault {
    /// The default value, if this is a real default.
    pub fn value(&self) -> Option<&Value> {
        match self {
            FieldDefault::Value(v) => Some(v),
            FieldDefault::Absent | FieldDefault::SlotPlaceholder => None,
        }
    }

    pub fn has_value(&self) -> bool {
        matches!(self, FieldDefault::Value(_))
    }
}

/// One declared field: name, opaque type token and optional default.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: TypeToken,
    pub default: FieldDefault,
}

/// A field as it appears in a merged clue set.
pub type Clue = FieldDecl;

impl FieldDecl {
    pub fn new(name: Name, ty: TypeToken) -> Self {
        FieldDecl {
            name,
            ty,
            default: FieldDefault::Absent,
        }
    }

    pub fn with_default(name: Name, ty: TypeToken, value: Value) -> Self {
        FieldDecl {
            name,
            ty,
            default: FieldDefault::Value(value),
        }
    }

    pub fn slot(name: Name, ty: TypeToken) -> Self {
        FieldDecl {
            name,
            ty,
            default: FieldDefault::SlotPlaceholder,
        }
    }
}

/// Ordered, override-resolved field mapping for one class.
///
/// Computed fresh for every synthesis event and never cached on the class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClueSet {
    clues: Vec<Clue>,
    index: FxHashMap<Name, usize>,
}

impl ClueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one declaration.
    ///
    /// A new name is appended. A known name keeps its position and takes the
    /// later type token; its default is replaced unless the later
    /// declaration is bare, in which case the inherited default still applies.
    pub fn merge_decl(&mut self, decl: &FieldDecl) {
        if let Some(&pos) = self.index.get(&decl.name) {
            let clue = &mut self.clues[pos];
            clue.ty = decl.ty;
            if decl.default != FieldDefault::Absent {
                clue.default = decl.default.clone();
            }
        } else {
            self.index.insert(decl.name, self.clues.len());
            self.clues.push(decl.clone());
        }
    }

    /// Merge a class's own declarations, in declaration order.
    pub fn merge<'a>(&mut self, decls: impl IntoIterator<Item = &'a FieldDecl>) {
        for decl in decls {
            self.merge_decl(decl);
        }
    }

    pub fn get(&self, name: Name) -> Option<&Clue> {
        self.index.get(&name).map(|&pos| &self.clues[pos])
    }

    pub fn contains(&self, name: Name) -> bool {
        self.index.contains_key(&name)
    }

    pub fn position(&self, name: Name) -> Option<usize> {
        self.index.get(&name).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clue> {
        self.clues.iter()
    }

    /// Field names in declared order.
    pub fn names(&self) -> Vec<Name> {
        self.clues.iter().map(|c| c.name).collect()
    }

    pub fn len(&self) -> usize {
        self.clues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }
}

impl<'a> IntoIterator for &'a ClueSet {
    type Item = &'a Clue;
    type IntoIter = std::slice::Iter<'a, Clue>;

    fn into_iter(self) -> Self::IntoIter {
        self.clues.iter()
    }
}
