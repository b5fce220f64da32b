//! Registry of declared classes.

use std::sync::Arc;

use clue_ir::{ClassId, Name, SharedInterner, TypeToken};
use clue_value::{FieldDecl, FieldDefault};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{ClassDecl, ClassInfo, DeclError};
use crate::lazy::{LazyBinding, MethodSlot};
use crate::propagate;

/// All classes declared in one runtime, indexed by `ClassId`.
///
/// Classes are never removed; a `ClassId` stays valid for the life of the
/// table.
pub struct ClassTable {
    interner: SharedInterner,
    classes: RwLock<Vec<Arc<ClassInfo>>>,
}

impl ClassTable {
    pub fn new(interner: SharedInterner) -> Self {
        ClassTable {
            interner,
            classes: RwLock::new(Vec::new()),
        }
    }

    pub fn get(&self, id: ClassId) -> Option<Arc<ClassInfo>> {
        self.classes.read().get(id.index()).cloned()
    }

    /// Find a class by name. Later declarations win.
    pub fn find(&self, name: &str) -> Option<Arc<ClassInfo>> {
        let name = self.interner.get(name)?;
        self.classes
            .read()
            .iter()
            .rev()
            .find(|class| class.name == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    /// Validate and register a class.
    ///
    /// Fails before anything is registered when the declaration is
    /// malformed. On success the new class already holds its own lazy
    /// bindings for every inherited behavior.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %decl.name))]
    pub fn declare(&self, decl: ClassDecl) -> Result<Arc<ClassInfo>, DeclError> {
        let parent = match decl.base {
            Some(base) => Some(self.get(base).ok_or_else(|| DeclError::UnknownBase {
                class: decl.name.clone(),
                base,
            })?),
            None => None,
        };

        if let Some(parent) = &parent {
            let base = || self.interner.lookup(parent.name).to_owned();
            if decl.slots.is_none() {
                return Err(DeclError::MissingStorageMarker {
                    class: decl.name.clone(),
                    base: base(),
                });
            }
            if decl.collector.is_some_and(|kind| kind != parent.collector) {
                return Err(DeclError::CollectorOnSubclass {
                    class: decl.name.clone(),
                    base: base(),
                });
            }
        }

        let fields = self.intern_fields(&decl)?;
        let slots = self.intern_slots(&decl, &fields)?;

        // Own methods and behaviors shadow whatever the parent would
        // propagate under the same name.
        let mut namespace = FxHashMap::default();
        for (name, func) in &decl.methods {
            namespace.insert(self.interner.intern(name), MethodSlot::Native(Arc::clone(func)));
        }
        let own_behaviors: Vec<_> = decl
            .behaviors
            .iter()
            .map(|rule| (self.interner.intern(rule.name), *rule))
            .collect();

        let mut behaviors = match &parent {
            Some(parent) => propagate::rearm(parent, &mut namespace),
            None => Vec::new(),
        };
        for &(name, rule) in &own_behaviors {
            behaviors.retain(|(inherited, _)| *inherited != name);
            namespace.insert(name, MethodSlot::Lazy(Arc::new(LazyBinding::new(name, rule))));
            behaviors.push((name, rule));
        }

        let ancestors = match &parent {
            Some(parent) => {
                let mut chain = parent.ancestors.clone();
                chain.push(Arc::clone(parent));
                chain
            }
            None => Vec::new(),
        };
        let fixed_layout =
            slots.is_some() && parent.as_ref().map_or(true, |p| p.fixed_layout);
        let collector = match &parent {
            Some(parent) => parent.collector,
            None => decl.collector.unwrap_or_default(),
        };
        let name = self.interner.intern(&decl.name);

        let mut classes = self.classes.write();
        let id = next_class_id(&decl.name, classes.len())?;
        let info = Arc::new(ClassInfo {
            id,
            name,
            base: parent.as_ref().map(|p| p.id),
            ancestors,
            fields,
            slots,
            fixed_layout,
            collector,
            behaviors,
            namespace: RwLock::new(namespace),
        });
        classes.push(Arc::clone(&info));
        tracing::debug!(id = %id, behaviors = info.behaviors.len(), "declared");
        Ok(info)
    }

    fn intern_fields(&self, decl: &ClassDecl) -> Result<Vec<FieldDecl>, DeclError> {
        let mut seen = FxHashSet::default();
        let mut fields = Vec::with_capacity(decl.fields.len());
        for spec in &decl.fields {
            let name = self.interner.intern(&spec.name);
            if !seen.insert(name) {
                return Err(DeclError::DuplicateField {
                    class: decl.name.clone(),
                    field: spec.name.clone(),
                });
            }
            let ty = TypeToken::new(self.interner.intern(&spec.ty));
            fields.push(match &spec.default {
                Some(value) => FieldDecl::with_default(name, ty, value.clone()),
                None => FieldDecl::new(name, ty),
            });
        }
        Ok(fields)
    }

    fn intern_slots(
        &self,
        decl: &ClassDecl,
        fields: &[FieldDecl],
    ) -> Result<Option<Vec<Name>>, DeclError> {
        let Some(specs) = &decl.slots else {
            return Ok(None);
        };
        let mut slots: Vec<Name> = Vec::with_capacity(specs.len());
        for spec in specs {
            let name = self.interner.intern(spec);
            if slots.contains(&name) {
                return Err(DeclError::DuplicateSlot {
                    class: decl.name.clone(),
                    slot: spec.clone(),
                });
            }
            let has_default = fields
                .iter()
                .any(|f| f.name == name && matches!(f.default, FieldDefault::Value(_)));
            if has_default {
                return Err(DeclError::SlotConflictsWithDefault {
                    class: decl.name.clone(),
                    field: spec.clone(),
                });
            }
            slots.push(name);
        }
        Ok(Some(slots))
    }
}

fn next_class_id(class: &str, count: usize) -> Result<ClassId, DeclError> {
    u32::try_from(count)
        .map(ClassId::from_raw)
        .map_err(|_| DeclError::TooManyClasses {
            class: class.to_owned(),
            count,
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_next_class_id() {
        assert_eq!(next_class_id("A", 0).unwrap(), ClassId::from_raw(0));
        assert_eq!(
            next_class_id("A", u32::MAX as usize).unwrap(),
            ClassId::from_raw(u32::MAX)
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_next_class_id_overflow() {
        let count = u32::MAX as usize + 1;
        assert_eq!(
            next_class_id("Late", count),
            Err(DeclError::TooManyClasses {
                class: "Late".to_owned(),
                count,
            })
        );
    }
}
