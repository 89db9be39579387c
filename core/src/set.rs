//! Insertion-ordered identifier collections.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::identifier::Identifier;

/// An insertion-ordered set of identifiers. Duplicates collapse.
///
/// Sets are built once from a declaration and are read-only afterwards.
/// Declarations are small, so membership is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Identifier>", into = "Vec<Identifier>")]
pub struct IdentifierSet {
    items: Vec<Identifier>,
}

impl IdentifierSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse declaration strings, keeping first-seen order.
    pub fn parse<I, S>(declarations: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        declarations
            .into_iter()
            .map(|s| Identifier::parse(s.as_ref()))
            .collect()
    }

    /// Return this set, or a set holding only `fallback` if this one is empty.
    pub fn or_default_to(self, fallback: Identifier) -> Self {
        if self.is_empty() {
            std::iter::once(fallback).collect()
        } else {
            self
        }
    }

    fn insert(&mut self, identifier: Identifier) -> bool {
        if self.items.contains(&identifier) {
            return false;
        }
        self.items.push(identifier);
        true
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.items.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Identifier> {
        self.items.iter()
    }

    /// Members of this set that are not in `other`, in this set's order.
    pub fn difference(&self, other: &IdentifierSet) -> IdentifierSet {
        self.iter()
            .filter(|id| !other.contains(id))
            .cloned()
            .collect()
    }

    pub fn is_disjoint(&self, other: &IdentifierSet) -> bool {
        !self.iter().any(|id| other.contains(id))
    }

    pub fn as_slice(&self) -> &[Identifier] {
        &self.items
    }
}

impl FromIterator<Identifier> for IdentifierSet {
    fn from_iter<T: IntoIterator<Item = Identifier>>(iter: T) -> Self {
        let mut set = IdentifierSet::new();
        for identifier in iter {
            set.insert(identifier);
        }
        set
    }
}

impl From<Vec<Identifier>> for IdentifierSet {
    fn from(items: Vec<Identifier>) -> Self {
        items.into_iter().collect()
    }
}

impl From<IdentifierSet> for Vec<Identifier> {
    fn from(set: IdentifierSet) -> Self {
        set.items
    }
}

impl IntoIterator for IdentifierSet {
    type Item = Identifier;
    type IntoIter = std::vec::IntoIter<Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a IdentifierSet {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for IdentifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.items.iter().map(|id| id.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
