//! Lazy bindings and the artifacts they resolve to.
//!
//! Every behavior registered on a class starts as a [`MethodSlot::Lazy`]
//! entry in that class's own namespace. The first call through an instance
//! resolves it: the clue set is collected, the rule builds an [`Artifact`],
//! and the artifact replaces the binding in the same namespace. Later calls
//! find the compiled slot directly and never reach the binding again.
//!
//! Resolution of one binding is serialized by its guard, so a (class,
//! behavior) pair is built at most once even when first accessed from
//! several threads. A failed build installs nothing.

use std::fmt;
use std::sync::Arc;

use clue_ir::{ClassId, Name};
use clue_value::{Args, EvalResult, SynthesisError, Value};
use parking_lot::Mutex;

use crate::class::ClassInfo;
use crate::rules::{MethodFn, SynthesisContext, SynthesisRule};
use crate::Runtime;

/// A compiled behavior, owned by exactly one class.
pub struct Artifact {
    pub behavior: Name,
    pub class: ClassId,
    /// Size of the clue set the artifact was built from.
    pub field_count: usize,
    func: MethodFn,
}

impl Artifact {
    pub fn call(&self, rt: &Runtime, this: &Value, args: &Args) -> EvalResult {
        (self.func)(rt, this, args)
    }
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("behavior", &self.behavior)
            .field("class", &self.class)
            .field("field_count", &self.field_count)
            .finish_non_exhaustive()
    }
}

/// An entry in a class namespace.
#[derive(Clone)]
pub enum MethodSlot {
    /// Not yet synthesized for this class.
    Lazy(Arc<LazyBinding>),
    /// Synthesized and cached.
    Compiled(Arc<Artifact>),
    /// Hand-written method supplied at declaration.
    Native(MethodFn),
}

impl fmt::Debug for MethodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodSlot::Lazy(binding) => write!(f, "Lazy({:?})", binding.rule),
            MethodSlot::Compiled(artifact) => write!(f, "Compiled({artifact:?})"),
            MethodSlot::Native(_) => write!(f, "Native"),
        }
    }
}

/// Outcome of resolving a binding.
#[derive(Clone, Debug)]
pub enum Resolution {
    Compiled(Arc<Artifact>),
    /// The class has no clues; the default object behavior applies.
    PassThrough,
}

/// Unresolved behavior on one class.
///
/// Immutable apart from its guard. Propagation gives every subclass a fresh
/// binding instead of sharing the parent's.
pub struct LazyBinding {
    name: Name,
    rule: SynthesisRule,
    guard: Mutex<()>,
}

impl LazyBinding {
    pub fn new(name: Name, rule: SynthesisRule) -> Self {
        LazyBinding {
            name,
            rule,
            guard: Mutex::new(()),
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn rule(&self) -> SynthesisRule {
        self.rule
    }

    /// Synthesize this behavior for `class` and install it there.
    ///
    /// `class` must be the class whose namespace holds this binding.
    #[tracing::instrument(
        level = "debug",
        skip(self, rt, class),
        fields(class = %rt.class_name(class.id()), behavior = self.rule.name)
    )]
    pub(crate) fn resolve(
        &self,
        rt: &Runtime,
        class: &ClassInfo,
    ) -> Result<Resolution, SynthesisError> {
        let _guard = self.guard.lock();

        // Another thread may have installed the artifact while we waited.
        if let Some(MethodSlot::Compiled(artifact)) = class.own_slot(self.name) {
            tracing::trace!("already compiled");
            return Ok(Resolution::Compiled(artifact));
        }

        let clues = class.collector().collect(class);
        if clues.is_empty() {
            tracing::debug!("empty clue set, passing through");
            return Ok(Resolution::PassThrough);
        }

        let ctx = SynthesisContext::new(class, self.name, rt.interner());
        let func = (self.rule.build)(&ctx, &clues).inspect_err(|e| {
            tracing::debug!(error = %e, "synthesis failed");
        })?;

        let artifact = Arc::new(Artifact {
            behavior: self.name,
            class: class.id(),
            field_count: clues.len(),
            func,
        });
        class.install(self.name, MethodSlot::Compiled(Arc::clone(&artifact)));
        tracing::debug!(fields = clues.len(), "installed artifact");
        Ok(Resolution::Compiled(artifact))
    }
}

impl fmt::Debug for LazyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LazyBinding({:?}, {:?})", self.name, self.rule)
    }
}
