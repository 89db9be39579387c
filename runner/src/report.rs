//! Run summaries and report generation

use std::fmt;

use serde::Serialize;

use idmatrix_core::Identifier;

/// Outcome of one (cell, method) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum MethodStatus {
    Passed,
    Failed(String),
    Ignored,
}

impl MethodStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, MethodStatus::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MethodStatus::Failed(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, MethodStatus::Ignored)
    }
}

impl fmt::Display for MethodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodStatus::Passed => f.pad("PASS"),
            MethodStatus::Failed(_) => f.pad("FAIL"),
            MethodStatus::Ignored => f.pad("IGNORED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodReport {
    pub method: String,
    #[serde(flatten)]
    pub status: MethodStatus,
    pub duration_us: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellReport {
    pub index: usize,
    pub label: String,
    pub producer: Identifier,
    pub consumer: Identifier,
    pub methods: Vec<MethodReport>,
}

impl CellReport {
    pub fn status_of(&self, method: &str) -> Option<&MethodStatus> {
        self.methods.iter().find(|m| m.method == method).map(|m| &m.status)
    }
}

/// Results of one class, cells in producer-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub class: String,
    /// Seed of the shuffled execution order, if shuffling was on
    pub seed: Option<u64>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub ignored: usize,
    pub total_duration_us: u64,
    pub cells: Vec<CellReport>,
}

impl RunSummary {
    pub fn new(class: impl Into<String>, seed: Option<u64>, mut cells: Vec<CellReport>) -> Self {
        cells.sort_by_key(|c| c.index);

        let statuses = || cells.iter().flat_map(|c| c.methods.iter());
        let total = statuses().count();
        let passed = statuses().filter(|m| m.status.is_passed()).count();
        let failed = statuses().filter(|m| m.status.is_failed()).count();
        let total_duration_us = statuses().fold(0u64, |acc, m| acc.saturating_add(m.duration_us));

        Self {
            class: class.into(),
            seed,
            total,
            passed,
            failed,
            ignored: total - passed - failed,
            total_duration_us,
            cells,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Look up a cell by its label.
    pub fn cell(&self, label: &str) -> Option<&CellReport> {
        self.cells.iter().find(|c| c.label == label)
    }

    /// Failed combinations as (cell, method).
    pub fn failures(&self) -> impl Iterator<Item = (&CellReport, &MethodReport)> {
        self.cells.iter().flat_map(|cell| {
            cell.methods
                .iter()
                .filter(|m| m.status.is_failed())
                .map(move |m| (cell, m))
        })
    }
}

/// Renders run summaries.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Human-readable report.
    pub fn generate(summary: &RunSummary) -> String {
        let mut lines = Vec::new();

        lines.push("══════════════════════════════════════════════════════════════".to_string());
        lines.push(format!("  Identity Matrix Report: {}", summary.class));
        lines.push("══════════════════════════════════════════════════════════════".to_string());
        lines.push(String::new());

        if let Some(seed) = summary.seed {
            lines.push(format!("Seed: {}", seed));
        }
        lines.push(format!("Cells: {}", summary.cells.len()));
        lines.push(String::new());

        for cell in &summary.cells {
            lines.push(format!("[{}] {}", cell.index, cell.label));
            for method in &cell.methods {
                match &method.status {
                    MethodStatus::Failed(message) => {
                        lines.push(format!("  {:7} {}: {}", method.status, method.method, message))
                    }
                    status => lines.push(format!("  {:7} {}", status, method.method)),
                }
            }
        }
        lines.push(String::new());

        let pass_rate = if summary.total > summary.ignored {
            (summary.passed as f64 / (summary.total - summary.ignored) as f64) * 100.0
        } else {
            0.0
        };

        lines.push(format!("Total:   {}", summary.total));
        lines.push(format!("Passed:  {} ({:.1}%)", summary.passed, pass_rate));
        lines.push(format!("Failed:  {}", summary.failed));
        lines.push(format!("Ignored: {}", summary.ignored));
        lines.push(format!(
            "Time:    {:.2}ms",
            summary.total_duration_us as f64 / 1000.0
        ));

        lines.join("\n")
    }

    /// JSON report for programmatic consumption.
    pub fn generate_json(summary: &RunSummary) -> String {
        use serde_json::json;

        let failures: Vec<_> = summary
            .failures()
            .map(|(cell, method)| {
                json!({
                    "cell": cell.label,
                    "method": method.method,
                    "status": method.status,
                })
            })
            .collect();

        let report = json!({
            "class": summary.class,
            "seed": summary.seed,
            "total": summary.total,
            "passed": summary.passed,
            "failed": summary.failed,
            "ignored": summary.ignored,
            "total_duration_us": summary.total_duration_us,
            "failures": failures,
            "cells": summary.cells,
        });

        serde_json::to_string_pretty(&report).unwrap_or_default()
    }
}
