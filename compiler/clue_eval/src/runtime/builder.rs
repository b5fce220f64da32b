//! `RuntimeBuilder` for creating runtimes with various configurations.

use clue_ir::SharedInterner;

use super::Runtime;
use crate::class::ClassTable;
use crate::names::BehaviorNames;
use crate::rules::RuleRegistry;

/// When behaviors are synthesized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SynthesisMode {
    /// On first call through an instance.
    #[default]
    Lazy,
    /// Right after each class is declared.
    Eager,
}

/// Builder for creating `Runtime` instances.
///
/// Defaults: a fresh interner, the standard rule set and lazy synthesis.
#[derive(Default)]
pub struct RuntimeBuilder {
    interner: Option<SharedInterner>,
    rules: Option<RuleRegistry>,
    mode: SynthesisMode,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an existing interner.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Rules carried by roots declared with [`Runtime::datum`].
    #[must_use]
    pub fn rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = Some(rules);
        self
    }

    #[must_use]
    pub fn synthesis(mut self, mode: SynthesisMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> Runtime {
        let interner = self.interner.unwrap_or_default();
        let names = BehaviorNames::new(&interner);
        Runtime {
            classes: ClassTable::new(interner.clone()),
            rules: self.rules.unwrap_or_else(RuleRegistry::standard),
            names,
            mode: self.mode,
            interner,
        }
    }
}
