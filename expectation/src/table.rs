//! Per-identifier expectation table.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use idmatrix_core::{ConfigResult, Identifier, IdentifierSet};

use crate::error::ExpectationResult;
use crate::expectation::Expectation;
use crate::outcome::{FailureKind, Outcome};

/// Parse identifier declarations for [`ExpectationTable::when_called_with`].
pub fn any_of<I, S>(declarations: I) -> ConfigResult<IdentifierSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    IdentifierSet::parse(declarations)
}

/// Expected outcome of one call, per identifier, with a default fallback.
///
/// Built fresh for each test invocation and consumed by [`ExpectationTable::call`].
/// An identifier with no entry and no default must not fail.
#[must_use = "an expectation table does nothing until it is checked"]
pub struct ExpectationTable<T, K> {
    default_kind: K,
    entries: HashMap<Identifier, Expectation<T, K>>,
    default_entry: Option<Expectation<T, K>>,
}

impl<T, K: FailureKind> ExpectationTable<T, K> {
    /// Create an empty table. `default_kind` is the failure kind required by
    /// a bare [`Expectation::ToFail`].
    pub fn new(default_kind: K) -> Self {
        Self {
            default_kind,
            entries: HashMap::new(),
            default_entry: None,
        }
    }

    /// Start an entry for the given identifiers.
    pub fn when_called_with(self, identifiers: IdentifierSet) -> WhenThen<T, K> {
        WhenThen {
            table: self,
            identifiers,
        }
    }

    /// Expectation for identifiers without an entry.
    pub fn otherwise(mut self, expectation: Expectation<T, K>) -> Self {
        self.default_entry = Some(expectation);
        self
    }

    /// Alias for [`ExpectationTable::otherwise`].
    pub fn by_default(self, expectation: Expectation<T, K>) -> Self {
        self.otherwise(expectation)
    }

    /// The call must fail with the default kind for these identifiers.
    pub fn to_fail(self, identifiers: IdentifierSet) -> Self
    where
        T: Clone,
    {
        self.when_called_with(identifiers).then(Expectation::ToFail)
    }

    /// The call must fail with `kind` for these identifiers.
    pub fn to_fail_with(self, kind: K, identifiers: IdentifierSet) -> Self
    where
        T: Clone,
    {
        self.when_called_with(identifiers).then(Expectation::ToFailWith(kind))
    }

    /// The call must not fail for these identifiers.
    pub fn not_to_fail(self, identifiers: IdentifierSet) -> Self
    where
        T: Clone,
    {
        self.when_called_with(identifiers).then(Expectation::NotToFail)
    }

    pub fn default_kind(&self) -> &K {
        &self.default_kind
    }

    /// Expectation that applies to `identifier`, if any was declared.
    pub fn resolve(&self, identifier: &Identifier) -> Option<&Expectation<T, K>> {
        self.entries
            .get(identifier)
            .or(self.default_entry.as_ref())
    }
}

impl<T, K> ExpectationTable<T, K>
where
    T: PartialEq + fmt::Debug,
    K: FailureKind,
{
    /// Check an observed outcome for `identifier`.
    pub fn evaluate(&self, identifier: &Identifier, outcome: &Outcome<T, K>) -> ExpectationResult<()> {
        let expected = self.resolve(identifier);
        debug!(
            identifier = %identifier,
            expected = ?expected,
            success = outcome.is_ok(),
            "Evaluating expectation"
        );

        match expected {
            Some(expectation) => expectation.check(identifier, outcome, &self.default_kind),
            None => Expectation::NotToFail.check(identifier, outcome, &self.default_kind),
        }
    }

    /// Run the operation once and check its outcome for `identifier`.
    pub fn call<F>(self, identifier: &Identifier, operation: F) -> ExpectationResult<()>
    where
        F: FnOnce() -> Outcome<T, K>,
    {
        let outcome = operation();
        self.evaluate(identifier, &outcome)
    }
}

/// Pending entry created by [`ExpectationTable::when_called_with`].
#[must_use = "a pending entry does nothing until `then` is called and the table is checked"]
pub struct WhenThen<T, K> {
    table: ExpectationTable<T, K>,
    identifiers: IdentifierSet,
}

impl<T: Clone, K: FailureKind> WhenThen<T, K> {
    /// Set the expectation for the pending identifiers. Later entries replace
    /// earlier ones for the same identifier.
    pub fn then(self, expectation: Expectation<T, K>) -> ExpectationTable<T, K> {
        let WhenThen {
            mut table,
            identifiers,
        } = self;
        for identifier in identifiers {
            table.entries.insert(identifier, expectation.clone());
        }
        table
    }
}
