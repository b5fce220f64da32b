//! Pre-interned behavior names for protocol dispatch.
//!
//! Interned once when the runtime is built, so every protocol call looks up
//! its method by `Name` comparison instead of interning the string again.

use clue_ir::{Name, StringInterner};

use crate::behavior::Behavior;

#[derive(Clone, Copy, Debug)]
pub(crate) struct BehaviorNames {
    pub(crate) construct: Name,
    pub(crate) represent: Name,
    pub(crate) equals: Name,
    pub(crate) iterate_fields: Name,
    pub(crate) hash: Name,
    pub(crate) match_args: Name,
}

impl BehaviorNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        let intern = |b: Behavior| interner.intern(b.method_name());
        Self {
            construct: intern(Behavior::Construct),
            represent: intern(Behavior::Represent),
            equals: intern(Behavior::Equals),
            iterate_fields: intern(Behavior::IterateFields),
            hash: intern(Behavior::Hash),
            match_args: intern(Behavior::MatchArgs),
        }
    }
}
