//! Single expectations and how they judge an outcome.

use std::fmt;
use std::sync::Arc;

use idmatrix_core::Identifier;

use crate::error::{ExpectationError, ExpectationResult};
use crate::outcome::{FailureKind, Outcome};

/// Whether an expectation requires the call to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailMode {
    MustFail,
    MustNotFail,
}

/// Custom check of a returned value.
pub type ValueAssertion<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Required outcome of a call for one identifier.
pub enum Expectation<T, K> {
    /// The call must not fail. The returned value is ignored.
    NotToFail,
    /// The call must fail with the table's default failure kind.
    ToFail,
    /// The call must fail with this kind or a refinement of it.
    ToFailWith(K),
    /// As [`Expectation::ToFailWith`], and the message must match the pattern.
    ToFailMatching(K, String),
    /// The call must return this value.
    Value(T),
    /// The call must return a value accepted by the assertion.
    AssertValue(ValueAssertion<T>),
}

impl<T, K> Expectation<T, K> {
    /// Wrap a closure as an [`Expectation::AssertValue`].
    pub fn assert_value<F>(assertion: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        Expectation::AssertValue(Arc::new(assertion))
    }

    pub fn mode(&self) -> FailMode {
        match self {
            Expectation::ToFail | Expectation::ToFailWith(_) | Expectation::ToFailMatching(..) => {
                FailMode::MustFail
            }
            Expectation::NotToFail | Expectation::Value(_) | Expectation::AssertValue(_) => {
                FailMode::MustNotFail
            }
        }
    }
}

impl<T, K> Expectation<T, K>
where
    T: PartialEq + fmt::Debug,
    K: FailureKind,
{
    /// Judge an outcome observed for `identifier`.
    pub(crate) fn check(
        &self,
        identifier: &Identifier,
        outcome: &Outcome<T, K>,
        default_kind: &K,
    ) -> ExpectationResult<()> {
        match (self, outcome) {
            (Expectation::NotToFail, Ok(_)) => Ok(()),
            (Expectation::Value(expected), Ok(actual)) => {
                if expected == actual {
                    Ok(())
                } else {
                    Err(ExpectationError::unexpected_value(
                        identifier,
                        format!("{:?}", expected),
                        format!("{:?}", actual),
                    ))
                }
            }
            (Expectation::AssertValue(assertion), Ok(actual)) => assertion(actual)
                .map_err(|message| ExpectationError::value_assertion_failed(identifier, message)),
            (_, Ok(_)) => Err(ExpectationError::expected_failure_but_succeeded(
                identifier,
                self.expected_kind(default_kind),
            )),
            (Expectation::ToFail, Err(failure)) => {
                expect_kind(identifier, default_kind, &failure.kind)
            }
            (Expectation::ToFailWith(kind), Err(failure)) => {
                expect_kind(identifier, kind, &failure.kind)
            }
            (Expectation::ToFailMatching(kind, pattern), Err(failure)) => {
                expect_kind(identifier, kind, &failure.kind)?;
                let re = regex_lite::Regex::new(pattern)
                    .map_err(|e| ExpectationError::invalid_pattern(pattern, e.to_string()))?;
                if re.is_match(&failure.message) {
                    Ok(())
                } else {
                    Err(ExpectationError::message_mismatch(
                        identifier,
                        pattern,
                        &failure.message,
                    ))
                }
            }
            (_, Err(failure)) => Err(ExpectationError::unexpected_failure(identifier, failure)),
        }
    }

    fn expected_kind<'k>(&'k self, default_kind: &'k K) -> &'k K {
        match self {
            Expectation::ToFailWith(kind) | Expectation::ToFailMatching(kind, _) => kind,
            _ => default_kind,
        }
    }
}

fn expect_kind<K: FailureKind>(identifier: &Identifier, expected: &K, actual: &K) -> ExpectationResult<()> {
    if actual.is_kind_of(expected) {
        Ok(())
    } else {
        Err(ExpectationError::wrong_failure_kind(identifier, expected, actual))
    }
}

impl<T: fmt::Debug, K: fmt::Debug> fmt::Debug for Expectation<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::NotToFail => f.write_str("NotToFail"),
            Expectation::ToFail => f.write_str("ToFail"),
            Expectation::ToFailWith(kind) => f.debug_tuple("ToFailWith").field(kind).finish(),
            Expectation::ToFailMatching(kind, pattern) => f
                .debug_tuple("ToFailMatching")
                .field(kind)
                .field(pattern)
                .finish(),
            Expectation::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Expectation::AssertValue(_) => f.write_str("AssertValue(<fn>)"),
        }
    }
}

impl<T: Clone, K: Clone> Clone for Expectation<T, K> {
    fn clone(&self) -> Self {
        match self {
            Expectation::NotToFail => Expectation::NotToFail,
            Expectation::ToFail => Expectation::ToFail,
            Expectation::ToFailWith(kind) => Expectation::ToFailWith(kind.clone()),
            Expectation::ToFailMatching(kind, pattern) => {
                Expectation::ToFailMatching(kind.clone(), pattern.clone())
            }
            Expectation::Value(value) => Expectation::Value(value.clone()),
            Expectation::AssertValue(assertion) => Expectation::AssertValue(Arc::clone(assertion)),
        }
    }
}
