//! Synthesis rules: builders that turn a class's clue set into a callable.
//!
//! A rule is a plain function `(context, clues) -> MethodFn`. It runs once per
//! (class, behavior) pair, on first access. Everything that depends only on
//! the clue set (parameter lists, field order, `name=` prefixes) is computed
//! while building; the returned closure only reads field values.
//!
//! New behaviors plug in by registering another [`SynthesisRule`] under a
//! new name; collectors and propagation need no changes.

pub(crate) mod construct;
pub(crate) mod equals;
pub(crate) mod extras;
pub(crate) mod hash;
pub(crate) mod iterate;
pub(crate) mod represent;

use std::fmt;
use std::sync::Arc;

use clue_ir::{ClassId, Name, StringInterner};
use clue_value::{Args, ClueSet, EvalError, EvalResult, SynthesisError, Value};

use crate::behavior::Behavior;
use crate::class::ClassInfo;
pub(crate) use crate::runtime::expect_record;
use crate::Runtime;

/// A synthesized or hand-written method.
///
/// Called with the runtime, the receiver and the call arguments.
pub type MethodFn = Arc<dyn Fn(&Runtime, &Value, &Args) -> EvalResult + Send + Sync>;

/// Signature of a synthesis rule.
pub type BuildFn = fn(&SynthesisContext<'_>, &ClueSet) -> Result<MethodFn, SynthesisError>;

/// Wrap a closure as a [`MethodFn`].
pub fn method<F>(f: F) -> MethodFn
where
    F: Fn(&Runtime, &Value, &Args) -> EvalResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A named synthesis rule.
#[derive(Clone, Copy)]
pub struct SynthesisRule {
    /// Reserved method name the artifact is installed under.
    pub name: &'static str,
    pub build: BuildFn,
}

impl SynthesisRule {
    pub const fn new(name: &'static str, build: BuildFn) -> Self {
        SynthesisRule { name, build }
    }
}

impl fmt::Debug for SynthesisRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SynthesisRule({})", self.name)
    }
}

/// What a rule sees of the class it synthesizes for.
pub struct SynthesisContext<'a> {
    class: &'a ClassInfo,
    behavior: Name,
    interner: &'a StringInterner,
}

impl<'a> SynthesisContext<'a> {
    pub(crate) fn new(class: &'a ClassInfo, behavior: Name, interner: &'a StringInterner) -> Self {
        SynthesisContext {
            class,
            behavior,
            interner,
        }
    }

    pub fn class_id(&self) -> ClassId {
        self.class.id()
    }

    /// Name of the class being synthesized for. Artifacts that print a class
    /// name use the receiver's runtime class instead.
    pub fn class_name(&self) -> &'a str {
        self.interner.lookup(self.class.name())
    }

    pub fn behavior_name(&self) -> &'a str {
        self.interner.lookup(self.behavior)
    }

    pub fn text(&self, name: Name) -> &'a str {
        self.interner.lookup(name)
    }

    /// Text of a field name, rejecting names that cannot be used as
    /// parameters or attributes.
    pub fn field_name(&self, name: Name) -> Result<&'a str, SynthesisError> {
        let text = self.text(name);
        if is_identifier(text) {
            Ok(text)
        } else {
            Err(SynthesisError::InvalidFieldName {
                class: self.class_name().to_owned(),
                behavior: self.behavior_name().to_owned(),
                field: text.to_owned(),
            })
        }
    }

    /// Checked field names in clue order.
    pub fn field_names(&self, clues: &ClueSet) -> Result<Arc<[Name]>, SynthesisError> {
        clues
            .iter()
            .map(|clue| self.field_name(clue.name).map(|_| clue.name))
            .collect()
    }

    /// Build a `Rejected` error for this class and behavior.
    pub fn reject(&self, reason: impl Into<String>) -> SynthesisError {
        SynthesisError::Rejected {
            class: self.class_name().to_owned(),
            behavior: self.behavior_name().to_owned(),
            reason: reason.into(),
        }
    }
}

/// Reject arguments passed to a method that takes none.
pub(crate) fn no_args(method: &str, args: &Args) -> Result<(), EvalError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(EvalError::WrongArgCount {
            method: method.to_owned(),
            expected: 0,
            got: args.len(),
        })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Ordered registry of synthesis rules keyed by method name.
#[derive(Clone, Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<SynthesisRule>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five standard record behaviors.
    pub fn standard() -> Self {
        RuleRegistry {
            rules: Behavior::CORE.iter().map(|b| b.rule()).collect(),
        }
    }

    /// Standard behaviors plus `as-dict` and `match-args`.
    pub fn with_extras() -> Self {
        let mut registry = Self::standard();
        for behavior in Behavior::EXTRAS {
            registry.register(behavior.rule());
        }
        registry
    }

    /// Add a rule, replacing any rule registered under the same name.
    pub fn register(&mut self, rule: SynthesisRule) {
        if let Some(existing) = self.rules.iter_mut().find(|r| r.name == rule.name) {
            *existing = rule;
        } else {
            self.rules.push(rule);
        }
    }

    pub fn get(&self, name: &str) -> Option<SynthesisRule> {
        self.rules.iter().find(|r| r.name == name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = SynthesisRule> + '_ {
        self.rules.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests;
