//! Class-level declarations.

use serde::{Deserialize, Serialize};

use crate::config::RunnerSelector;

/// Raw class-level declaration: identifier strings plus an optional runner.
///
/// Strings are parsed when the declaration is turned into a
/// [`MatrixConfiguration`](crate::MatrixConfiguration).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    #[serde(default)]
    pub producers: Vec<String>,
    #[serde(default)]
    pub consumers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner: Option<RunnerSelector>,
}

impl Declaration {
    /// Create an empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the older creators/users declaration onto producers/consumers.
    pub fn creators_and_users<C, U, S>(creators: C, users: U) -> Self
    where
        C: IntoIterator<Item = S>,
        U: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().producers(creators).consumers(users)
    }

    /// Set the producer declaration strings.
    pub fn producers<I, S>(mut self, producers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.producers = producers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the consumer declaration strings.
    pub fn consumers<I, S>(mut self, consumers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumers = consumers.into_iter().map(Into::into).collect();
        self
    }

    /// Choose how cells are executed.
    pub fn runner(mut self, runner: RunnerSelector) -> Self {
        self.runner = Some(runner);
        self
    }
}
