use serde::{Deserialize, Serialize};
use std::fmt;

/// One alternative per system, positionally aligned with the owning
/// results' system names. Equality and hashing are component-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination(Vec<String>);

impl Combination {
    pub fn new<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(alternatives.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Alternative chosen for the system at `position`
    pub fn get(&self, position: usize) -> Option<&str> {
        self.0.get(position).map(String::as_str)
    }

    pub fn alternatives(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for Combination {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<String>> for Combination {
    fn from(alternatives: Vec<String>) -> Self {
        Self(alternatives)
    }
}
