//! Validated matrix configuration.

use serde::{Deserialize, Serialize};

use idmatrix_core::{ConfigError, ConfigResult, IdentifierKind, IdentifierSet};

use crate::declaration::Declaration;

/// How the cells of one class are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunnerSelector {
    /// One cell after another on the calling thread.
    #[default]
    Sequential,
    /// Cells spread over a fixed number of worker threads.
    Pool { workers: usize },
}

impl RunnerSelector {
    /// Number of threads this selector runs cells on.
    pub fn workers(&self) -> usize {
        match self {
            RunnerSelector::Sequential => 1,
            RunnerSelector::Pool { workers } => (*workers).max(1),
        }
    }
}

/// Producer and consumer sets of one test class, validated.
///
/// Built once per class and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixConfiguration {
    class: String,
    producers: IdentifierSet,
    consumers: IdentifierSet,
    runner: RunnerSelector,
}

impl MatrixConfiguration {
    /// Parse and validate a class declaration.
    ///
    /// Fails on the first malformed identifier, on an empty producer list, and
    /// on producers that refer to the producer itself (`PRODUCER`, `CREATOR`,
    /// `NEW_USER`, `CONSUMER`).
    pub fn build(class: impl Into<String>, declaration: &Declaration) -> ConfigResult<Self> {
        let class = class.into();
        let producers = IdentifierSet::parse(&declaration.producers)?;
        let consumers = IdentifierSet::parse(&declaration.consumers)?;

        if producers.is_empty() {
            return Err(ConfigError::missing_producers(class));
        }

        if let Some(invalid) = producers.iter().find(|id| is_producer_relative(id.kind())) {
            return Err(ConfigError::invalid_producer_role(class, invalid));
        }

        Ok(Self {
            class,
            producers,
            consumers,
            runner: declaration.runner.unwrap_or_default(),
        })
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn producers(&self) -> &IdentifierSet {
        &self.producers
    }

    /// Consumers as declared. May be empty; see [`MatrixExpander`](crate::MatrixExpander).
    pub fn consumers(&self) -> &IdentifierSet {
        &self.consumers
    }

    pub fn runner(&self) -> RunnerSelector {
        self.runner
    }
}

fn is_producer_relative(kind: IdentifierKind) -> bool {
    matches!(
        kind,
        IdentifierKind::NewUser
            | IdentifierKind::Creator
            | IdentifierKind::Producer
            | IdentifierKind::Consumer
    )
}
