//! The runtime: class table, rule registry and protocol dispatch.
//!
//! # Method resolution
//!
//! A protocol call looks its behavior up in the receiver's runtime class,
//! then in each ancestor, nearest first. What it finds decides the path:
//!
//! - `Compiled` / `Native`: called directly.
//! - `Lazy`: resolved on the class that owns the binding, which installs the
//!   artifact there, then called. A class with no clues resolves to
//!   pass-through and the default object behavior applies.
//!
//! Propagation makes sure the first hit for an inherited behavior is always
//! the receiver class's own binding, never an ancestor's artifact.
//!
//! Protocol entry points live in `protocols.rs`.

mod builder;
mod protocols;

use std::sync::Arc;

use clue_ir::{ClassId, Name, SharedInterner};
use clue_value::{Args, ClueSet, EvalError, EvalResult, RecordValue, SynthesisError, Value};

use crate::class::{ClassDecl, ClassInfo, ClassTable, DeclError};
use crate::lazy::{Artifact, MethodSlot, Resolution};
use crate::names::BehaviorNames;
use crate::rules::{MethodFn, RuleRegistry};

pub use builder::{RuntimeBuilder, SynthesisMode};
pub use protocols::{Comparison, RecordFields};

/// Owns every declared class and dispatches the record protocols.
///
/// `Runtime` is `Send + Sync`; share it behind an `Arc` to use it from
/// several threads.
pub struct Runtime {
    interner: SharedInterner,
    classes: ClassTable,
    rules: RuleRegistry,
    names: BehaviorNames,
    mode: SynthesisMode,
}

/// A callable found by method resolution.
pub(crate) enum Target {
    Artifact(Arc<Artifact>),
    Native(MethodFn),
}

impl Target {
    fn call(&self, rt: &Runtime, this: &Value, args: &Args) -> EvalResult {
        match self {
            Target::Artifact(artifact) => artifact.call(rt, this, args),
            Target::Native(func) => func(rt, this, args),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// A lazy runtime with the standard rule set.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Intern a name.
    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    pub fn synthesis_mode(&self) -> SynthesisMode {
        self.mode
    }

    /// Declare a class.
    ///
    /// In eager mode every lazy binding of the new class is resolved before
    /// returning. A build failure there is logged and the binding stays
    /// lazy, so the error resurfaces on first call.
    pub fn declare(&self, decl: ClassDecl) -> Result<ClassId, DeclError> {
        let class = self.classes.declare(decl)?;
        if self.mode == SynthesisMode::Eager {
            self.resolve_all(&class);
        }
        Ok(class.id())
    }

    /// Declare a fixed-storage root carrying every registered rule.
    pub fn datum(&self, name: &str) -> Result<ClassId, DeclError> {
        self.declare(ClassDecl::datum(name, &self.rules))
    }

    fn resolve_all(&self, class: &ClassInfo) {
        for &(name, rule) in class.behaviors() {
            if let Some(MethodSlot::Lazy(binding)) = class.own_slot(name) {
                if let Err(e) = binding.resolve(self, class) {
                    tracing::warn!(
                        class = self.text(class.name()),
                        behavior = rule.name,
                        error = %e,
                        "eager synthesis failed"
                    );
                }
            }
        }
    }

    pub fn class(&self, id: ClassId) -> Result<Arc<ClassInfo>, EvalError> {
        self.classes
            .get(id)
            .ok_or_else(|| EvalError::UnknownClass(id.to_string()))
    }

    /// Name of a class, or the empty string for an unknown id.
    pub fn class_name(&self, id: ClassId) -> &'static str {
        self.classes
            .get(id)
            .map_or("", |class| self.interner.lookup(class.name()))
    }

    /// The merged clue set of a class, as synthesis would see it now.
    pub fn clues(&self, id: ClassId) -> Result<ClueSet, EvalError> {
        let class = self.class(id)?;
        Ok(class.collector().collect(&class))
    }

    /// The artifact cached on `id` itself for `behavior`, if synthesized.
    pub fn artifact(&self, id: ClassId, behavior: &str) -> Option<Arc<Artifact>> {
        let name = self.interner.get(behavior)?;
        match self.classes.get(id)?.own_slot(name)? {
            MethodSlot::Compiled(artifact) => Some(artifact),
            MethodSlot::Lazy(_) | MethodSlot::Native(_) => None,
        }
    }

    /// Whether `behavior` has been synthesized on `id` itself.
    pub fn is_resolved(&self, id: ClassId, behavior: &str) -> bool {
        self.artifact(id, behavior).is_some()
    }

    pub fn is_instance(&self, value: &Value, id: ClassId) -> bool {
        value
            .as_record()
            .and_then(|record| self.classes.get(record.class()))
            .is_some_and(|class| class.is_subclass_of(id))
    }

    /// Find and, if needed, synthesize `name` for `class`.
    ///
    /// `None` means the default object behavior applies: the name is not
    /// defined anywhere in the chain, or its binding passed through.
    pub(crate) fn resolve_method(
        &self,
        class: &ClassInfo,
        name: Name,
    ) -> Result<Option<Target>, SynthesisError> {
        let Some((owner, slot)) = class.lookup(name) else {
            return Ok(None);
        };
        Ok(match slot {
            MethodSlot::Compiled(artifact) => Some(Target::Artifact(artifact)),
            MethodSlot::Native(func) => Some(Target::Native(func)),
            MethodSlot::Lazy(binding) => match binding.resolve(self, owner)? {
                Resolution::Compiled(artifact) => Some(Target::Artifact(artifact)),
                Resolution::PassThrough => None,
            },
        })
    }

    /// Call any method by name on a record.
    pub fn call_method(&self, this: &Value, method: &str, args: &Args) -> EvalResult {
        let undefined = |type_name: &str| EvalError::UndefinedMethod {
            type_name: type_name.to_owned(),
            method: method.to_owned(),
        };
        let Some(record) = this.as_record() else {
            return Err(undefined(this.type_name()));
        };
        let class = self.class(record.class())?;
        let target = match self.interner.get(method) {
            Some(name) => self.resolve_method(&class, name)?,
            None => None,
        };
        match target {
            Some(target) => target.call(self, this, args),
            None => Err(undefined(self.text(class.name()))),
        }
    }

    /// Read a field: the instance value, else the nearest class default.
    pub fn read_field(&self, record: &RecordValue, field: Name) -> EvalResult {
        if let Some(value) = record.get(field) {
            return Ok(value);
        }
        self.classes
            .get(record.class())
            .and_then(|class| class.default_for(field))
            .ok_or_else(|| EvalError::UndefinedField {
                class: self.class_name(record.class()).to_owned(),
                field: self.text(field).to_owned(),
            })
    }

    pub fn get_field(&self, this: &Value, field: &str) -> EvalResult {
        let record = expect_record(this)?;
        match self.interner.get(field) {
            Some(name) => self.read_field(record, name),
            None => Err(EvalError::UndefinedField {
                class: self.class_name(record.class()).to_owned(),
                field: field.to_owned(),
            }),
        }
    }

    /// Assign a field.
    ///
    /// Instances of a fixed-layout class accept only names in the clue set
    /// or in a slot list along the chain.
    pub fn set_field(&self, this: &Value, field: &str, value: Value) -> Result<(), EvalError> {
        let record = expect_record(this)?;
        let class = self.class(record.class())?;
        let name = if class.has_fixed_layout() {
            // A name never interned cannot be a declared field or slot.
            match self.interner.get(field) {
                Some(name)
                    if class.has_slot(name) || class.collector().collect(&class).contains(name) =>
                {
                    name
                }
                _ => {
                    return Err(EvalError::NoSuchSlot {
                        class: self.text(class.name()).to_owned(),
                        field: field.to_owned(),
                    })
                }
            }
        } else {
            self.interner.intern(field)
        };
        record.set(name, value);
        Ok(())
    }
}

pub(crate) fn expect_record(value: &Value) -> Result<&RecordValue, EvalError> {
    value.as_record().ok_or_else(|| EvalError::NotARecord {
        type_name: value.type_name().to_owned(),
    })
}
