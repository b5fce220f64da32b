//! Built-in behaviors and their registered method names.

use crate::rules::{self, BuildFn, SynthesisRule};

/// A behavior the engine knows how to synthesize.
///
/// The first five make up the standard record protocol set. `AsDict` and
/// `MatchArgs` are extensions registered through the same rule interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Object construction from positional and keyword arguments.
    Construct,
    /// `ClassName(field=repr, ...)` text.
    Represent,
    /// Same-class ordered field tuple equality.
    Equals,
    /// Restartable iteration over field values.
    IterateFields,
    /// Hash of the ordered field tuple.
    Hash,
    /// Ordered field-name to value mapping.
    AsDict,
    /// Field names usable for positional destructuring.
    MatchArgs,
}

impl Behavior {
    /// The standard record protocol set.
    pub const CORE: [Behavior; 5] = [
        Behavior::Construct,
        Behavior::Represent,
        Behavior::Equals,
        Behavior::IterateFields,
        Behavior::Hash,
    ];

    /// Behaviors outside the standard protocol set.
    pub const EXTRAS: [Behavior; 2] = [Behavior::AsDict, Behavior::MatchArgs];

    /// Parse a registered method name.
    pub fn from_name(s: &str) -> Option<Behavior> {
        match s {
            "construct" => Some(Behavior::Construct),
            "represent" => Some(Behavior::Represent),
            "equals" => Some(Behavior::Equals),
            "iterate-fields" => Some(Behavior::IterateFields),
            "hash" => Some(Behavior::Hash),
            "as-dict" => Some(Behavior::AsDict),
            "match-args" => Some(Behavior::MatchArgs),
            _ => None,
        }
    }

    /// The reserved method name the artifact is installed under.
    pub fn method_name(self) -> &'static str {
        match self {
            Behavior::Construct => "construct",
            Behavior::Represent => "represent",
            Behavior::Equals => "equals",
            Behavior::IterateFields => "iterate-fields",
            Behavior::Hash => "hash",
            Behavior::AsDict => "as-dict",
            Behavior::MatchArgs => "match-args",
        }
    }

    /// The synthesis rule implementing this behavior.
    pub fn rule(self) -> SynthesisRule {
        let build: BuildFn = match self {
            Behavior::Construct => rules::construct::build,
            Behavior::Represent => rules::represent::build,
            Behavior::Equals => rules::equals::build,
            Behavior::IterateFields => rules::iterate::build,
            Behavior::Hash => rules::hash::build,
            Behavior::AsDict => rules::extras::build_as_dict,
            Behavior::MatchArgs => rules::extras::build_match_args,
        };
        SynthesisRule::new(self.method_name(), build)
    }
}
