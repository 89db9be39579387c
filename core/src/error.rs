//! Configuration-time error types.
//!
//! Every error here is raised before any matrix cell executes.

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building a matrix configuration or resolving filter rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A declaration string did not match the identifier grammar.
    #[error("Malformed identifier '{input}': {reason}")]
    MalformedIdentifier { input: String, reason: String },

    /// The producer list of a class declaration was empty.
    #[error("No producers declared for '{class}'")]
    MissingProducers { class: String },

    /// A producer list contained a marker that only makes sense for consumers.
    #[error("Producer can't use {identifier} marker in '{class}'")]
    InvalidProducerRole { class: String, identifier: String },

    /// A method declared both an include and an exclude rule.
    #[error("Method '{method}' can only declare run_with or ignore_for, not both")]
    ConflictingFilterRule { method: String },
}

impl ConfigError {
    pub fn malformed_identifier(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_producers(class: impl Into<String>) -> Self {
        Self::MissingProducers {
            class: class.into(),
        }
    }

    pub fn invalid_producer_role(class: impl Into<String>, identifier: impl ToString) -> Self {
        Self::InvalidProducerRole {
            class: class.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn conflicting_filter_rule(method: impl Into<String>) -> Self {
        Self::ConflictingFilterRule {
            method: method.into(),
        }
    }
}
