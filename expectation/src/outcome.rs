//! Observed outcomes of an operation under test.

use std::fmt;

/// A failure classification supplied by the host.
///
/// `is_kind_of` is the "is-a" relation used when a failure is expected: an
/// observed failure satisfies an expectation for `expected` if it is that
/// kind or one of its refinements. The default is plain equality.
pub trait FailureKind: fmt::Debug + fmt::Display + Clone + PartialEq + Send + Sync + 'static {
    fn is_kind_of(&self, expected: &Self) -> bool {
        self == expected
    }
}

/// A classified failure with its message.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<K> {
    pub kind: K,
    pub message: String,
}

impl<K: FailureKind> Failure<K> {
    pub fn new(kind: K, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A failure with an empty message.
    pub fn of(kind: K) -> Self {
        Self::new(kind, "")
    }
}

impl<K: fmt::Display> fmt::Display for Failure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl<K: FailureKind> std::error::Error for Failure<K> {}

/// What an operation produced: a value, or a classified failure.
pub type Outcome<T, K> = Result<T, Failure<K>>;
