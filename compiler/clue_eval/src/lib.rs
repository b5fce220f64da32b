//! Clue Eval - lazy synthesis of record behaviors.
//!
//! A record class declares its fields; this crate synthesizes construction,
//! representation, equality, field iteration and hashing from them the first
//! time each behavior is used, and caches the result on the class.
//!
//! # Pipeline
//!
//! ```text
//! ClassDecl --declare--> ClassInfo (lazy bindings, re-armed per subclass)
//!                            |
//!                 first call | ClueCollector -> ClueSet
//!                            v
//!                  SynthesisRule::build -> Artifact (installed on the class)
//! ```
//!
//! - [`ClassTable`] validates declarations and runs propagation.
//! - [`collector`] merges field declarations along the ancestor chain.
//! - [`rules`] holds the rule set and the [`RuleRegistry`].
//! - [`LazyBinding`] resolves once per (class, behavior) pair.
//! - [`Runtime`] dispatches the record protocols.

mod behavior;
mod class;
pub mod collector;
mod lazy;
mod names;
mod propagate;
pub mod rules;
mod runtime;
mod stack;

pub use behavior::Behavior;
pub use class::{ClassDecl, ClassInfo, ClassTable, DeclError};
pub use collector::{AnnotationCollector, ClueCollector, CollectorKind, SlotCollector};
pub use lazy::{Artifact, LazyBinding, MethodSlot, Resolution};
pub use rules::{method, BuildFn, MethodFn, RuleRegistry, SynthesisContext, SynthesisRule};
pub use runtime::{Comparison, RecordFields, Runtime, RuntimeBuilder, SynthesisMode};
pub use stack::ensure_sufficient_stack;

pub use clue_value::{
    Args, ClassId, ClueSet, EvalError, EvalResult, FieldDecl, FieldDefault, Name, SynthesisError,
    TypeToken, Value,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
///
/// ```text
/// RUST_LOG=clue_eval=debug   # declarations, synthesis, propagation
/// RUST_LOG=clue_eval=trace   # plus cache hits and every construct call
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
