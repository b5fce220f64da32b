//! Call arguments.

use clue_ir::Name;
use smallvec::SmallVec;

use crate::Value;

/// Positional and keyword arguments for a method call.
///
/// Keywords keep their call-site order so duplicate detection and error
/// messages report the first offending keyword.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    positional: SmallVec<[Value; 4]>,
    keywords: SmallVec<[(Name, Value); 4]>,
}

impl Args {
    /// No arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional arguments only.
    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Args {
            positional: values.into_iter().collect(),
            keywords: SmallVec::new(),
        }
    }

    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append a keyword argument.
    #[must_use]
    pub fn kw(mut self, name: Name, value: impl Into<Value>) -> Self {
        self.keywords.push((name, value.into()));
        self
    }

    pub fn positional_args(&self) -> &[Value] {
        &self.positional
    }

    pub fn keyword_args(&self) -> &[(Name, Value)] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// The single positional argument of a binary method such as `equals`.
    pub fn single(&self) -> Option<&Value> {
        match (self.positional.as_slice(), self.keywords.is_empty()) {
            ([only], true) => Some(only),
            _ => None,
        }
    }
}
