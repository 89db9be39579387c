//! Cross-product expansion of a matrix configuration.

use std::fmt;

use serde::Serialize;
use tracing::info;

use idmatrix_core::Identifier;

use crate::config::MatrixConfiguration;

/// One (producer, consumer) pair of a class.
///
/// Cells share nothing but the configuration they were expanded from and can
/// run in any order or concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    index: usize,
    producer: Identifier,
    consumer: Identifier,
}

impl MatrixCell {
    pub fn new(index: usize, producer: Identifier, consumer: Identifier) -> Self {
        Self {
            index,
            producer,
            consumer,
        }
    }

    /// Position in producer-major order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn producer(&self) -> &Identifier {
        &self.producer
    }

    pub fn consumer(&self) -> &Identifier {
        &self.consumer
    }

    /// Label used by reports: `producer={..}, consumer={..}`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MatrixCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "producer={{{}}}, consumer={{{}}}", self.producer, self.consumer)
    }
}

/// Expands a configuration into its cells.
pub struct MatrixExpander;

impl MatrixExpander {
    /// Producers × consumers, producer-major. An empty consumer list expands
    /// as `{NEW_USER}`.
    pub fn expand(config: &MatrixConfiguration) -> Vec<MatrixCell> {
        let consumers = config
            .consumers()
            .clone()
            .or_default_to(Identifier::new_user());

        let cells: Vec<MatrixCell> = config
            .producers()
            .iter()
            .flat_map(|producer| consumers.iter().map(move |consumer| (producer, consumer)))
            .enumerate()
            .map(|(index, (producer, consumer))| {
                MatrixCell::new(index, producer.clone(), consumer.clone())
            })
            .collect();

        info!(
            class = %config.class(),
            producers = config.producers().len(),
            consumers = consumers.len(),
            cells = cells.len(),
            "Matrix expanded"
        );

        cells
    }
}
