//! Propagation of lazy behaviors to a newly declared subclass.
//!
//! If a subclass simply inherited its parent's namespace, the first call on
//! a subclass instance would find the parent's artifact, built from the
//! parent's smaller clue set. Instead every subclass gets its own fresh
//! binding for each behavior the parent carries, whether or not the parent
//! has already synthesized it, so the subclass synthesizes from its own
//! clues.

use std::sync::Arc;

use clue_ir::Name;
use rustc_hash::FxHashMap;

use crate::class::ClassInfo;
use crate::lazy::{LazyBinding, MethodSlot};
use crate::rules::SynthesisRule;

/// Install a fresh binding in `namespace` for every behavior of `parent`
/// that the new class does not already define, and return the behaviors the
/// new class passes on.
///
/// A name already present in `namespace` is a hand-written method of the
/// new class; that behavior stops propagating below it.
pub(crate) fn rearm(
    parent: &ClassInfo,
    namespace: &mut FxHashMap<Name, MethodSlot>,
) -> Vec<(Name, SynthesisRule)> {
    let mut inherited = Vec::with_capacity(parent.behaviors().len());
    for &(name, rule) in parent.behaviors() {
        if namespace.contains_key(&name) {
            tracing::trace!(behavior = rule.name, "shadowed, not propagated");
            continue;
        }
        namespace.insert(name, MethodSlot::Lazy(Arc::new(LazyBinding::new(name, rule))));
        inherited.push((name, rule));
    }
    tracing::debug!(count = inherited.len(), "re-armed inherited behaviors");
    inherited
}
