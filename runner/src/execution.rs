//! Matrix execution

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use idmatrix_core::ConfigResult;
use idmatrix_expectation::FailureKind;
use idmatrix_filter::MethodRules;
use idmatrix_matrix::{MatrixCell, MatrixExpander};

use crate::config::RunnerConfig;
use crate::context::{Authenticator, CellContext, LoginRole};
use crate::error::{RunnerError, RunnerResult, TestFailure};
use crate::plan::Decision;
use crate::report::{CellReport, MethodReport, MethodStatus, RunSummary};
use crate::suite::{TestClass, TestMethod};

/// Runs test classes cell by cell.
#[derive(Debug, Clone, Default)]
pub struct MatrixRunner {
    config: RunnerConfig,
}

impl MatrixRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every applicable method of `class` in every cell.
    ///
    /// Fails only if a method declaration is malformed or a worker thread
    /// dies; failing combinations are recorded in the summary.
    pub fn run<F: Authenticator>(&self, class: &TestClass<F>) -> RunnerResult<RunSummary> {
        let rules = class
            .methods()
            .iter()
            .map(|m| MethodRules::resolve(m.declaration()))
            .collect::<ConfigResult<Vec<_>>>()?;

        let cells = MatrixExpander::expand(class.configuration());
        let mut order: Vec<&MatrixCell> = cells.iter().collect();
        if self.config.shuffle {
            let mut rng = StdRng::seed_from_u64(self.config.seed);
            order.shuffle(&mut rng);
        }

        let workers = self
            .config
            .workers
            .unwrap_or_else(|| class.configuration().runner().workers())
            .min(order.len())
            .max(1);

        info!(
            class = %class.name(),
            cells = cells.len(),
            methods = rules.len(),
            workers,
            "Running class"
        );

        let reports = if workers == 1 {
            order
                .iter()
                .map(|cell| self.run_cell(class, &rules, cell))
                .collect()
        } else {
            self.run_pool(class, &rules, &order, workers)?
        };

        let seed = self.config.shuffle.then_some(self.config.seed);
        let summary = RunSummary::new(class.name(), seed, reports);

        info!(
            class = %summary.class,
            passed = summary.passed,
            failed = summary.failed,
            ignored = summary.ignored,
            "Class finished"
        );
        Ok(summary)
    }

    /// Cells are striped over `workers` scoped threads.
    fn run_pool<F: Authenticator>(
        &self,
        class: &TestClass<F>,
        rules: &[MethodRules],
        order: &[&MatrixCell],
        workers: usize,
    ) -> RunnerResult<Vec<CellReport>> {
        thread::scope(|scope| -> RunnerResult<Vec<CellReport>> {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    scope.spawn(move || {
                        order
                            .iter()
                            .skip(worker)
                            .step_by(workers)
                            .map(|cell| self.run_cell(class, rules, cell))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut reports = Vec::with_capacity(order.len());
            for handle in handles {
                let chunk = handle
                    .join()
                    .map_err(|_| RunnerError::worker_panicked(class.name()))?;
                reports.extend(chunk);
            }
            Ok(reports)
        })
    }

    fn run_cell<F: Authenticator>(
        &self,
        class: &TestClass<F>,
        rules: &[MethodRules],
        cell: &MatrixCell,
    ) -> CellReport {
        info!(class = %class.name(), cell = %cell, "Cell started");

        let decisions = Decision::for_cell(cell, class.class_rule(), rules);
        if !decisions.iter().any(Decision::is_run) {
            warn!(class = %class.name(), cell = %cell, "No method selected, reporting all as ignored");
        }

        let methods = class
            .methods()
            .iter()
            .zip(decisions)
            .map(|(method, decision)| {
                let start = Instant::now();
                let status = match decision {
                    Decision::Invalid(reason) => MethodStatus::Failed(reason),
                    Decision::Skip => MethodStatus::Ignored,
                    Decision::Run if method.is_ignored() => MethodStatus::Ignored,
                    Decision::Run => match run_method(class, method, cell) {
                        Ok(()) => MethodStatus::Passed,
                        Err(failure) => MethodStatus::Failed(failure.to_string()),
                    },
                };
                self.log_status(class, cell, method.name(), &status);
                MethodReport {
                    method: method.name().to_string(),
                    status,
                    duration_us: micros(start.elapsed()),
                }
            })
            .collect();

        CellReport {
            index: cell.index(),
            label: cell.label(),
            producer: cell.producer().clone(),
            consumer: cell.consumer().clone(),
            methods,
        }
    }

    fn log_status<F: Authenticator>(
        &self,
        class: &TestClass<F>,
        cell: &MatrixCell,
        method: &str,
        status: &MethodStatus,
    ) {
        match status {
            MethodStatus::Failed(message) => warn!(
                class = %class.name(),
                cell = %cell,
                method,
                message = %message,
                "Combination failed"
            ),
            status if self.config.verbose => info!(
                class = %class.name(),
                cell = %cell,
                method,
                status = %status,
                "Combination finished"
            ),
            status => debug!(cell = %cell, method, status = %status, "Combination finished"),
        }
    }
}

/// setup → log in as producer → body → teardown. Teardown runs whenever
/// setup succeeded. A body that passes with unchecked expectation tables fails.
fn run_method<F: Authenticator>(
    class: &TestClass<F>,
    method: &TestMethod<F>,
    cell: &MatrixCell,
) -> Result<(), TestFailure<F::Kind>> {
    let mut fixture = guarded(|| class.setup(cell).map_err(TestFailure::Setup))?;

    let body = guarded(|| {
        let mut ctx = CellContext::new(cell, &mut fixture);
        ctx.log_in_as(LoginRole::Producer)?;
        (method.body())(&mut ctx)?;
        ctx.ensure_checked()
    });
    let body = match method.expected_failure() {
        Some(expected) => expect_failure(expected, body),
        None => body,
    };

    let teardown = guarded(|| class.teardown(&mut fixture).map_err(TestFailure::Teardown));
    body.and(teardown)
}

/// The body must end with an unhandled failure of the expected kind.
fn expect_failure<K: FailureKind>(
    expected: &K,
    body: Result<(), TestFailure<K>>,
) -> Result<(), TestFailure<K>> {
    match body {
        Err(TestFailure::Failure(failure)) if failure.kind.is_kind_of(expected) => Ok(()),
        Err(TestFailure::Failure(failure)) => Err(TestFailure::other(format!(
            "Expected failure {}, got {}",
            expected, failure
        ))),
        Ok(()) => Err(TestFailure::other(format!(
            "Expected failure {}, but the method completed",
            expected
        ))),
        Err(other) => Err(other),
    }
}

fn guarded<R, K: FailureKind>(
    f: impl FnOnce() -> Result<R, TestFailure<K>>,
) -> Result<R, TestFailure<K>> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(TestFailure::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Whole microseconds, saturating at `u64::MAX`.
fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
