//! # Runner Module / 运行器模块
//!
//! A runner executes the tests of one top-level test across every scenario of
//! the matrix it was bound to. Each `(scenario, test)` pair becomes one
//! parallel-eligible sub-test with its own fixture, and ends with exactly one
//! recorded status.
//!
//! 运行器针对所绑定矩阵的每个场景执行一个顶层测试中的测试。
//! 每个 `(场景, 测试)` 组合都成为一个可并行的子测试，拥有自己的夹具，并且最终恰好记录一个状态。

use colored::*;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::task::TaskTracker;

use crate::core::config::HarnessConfig;
use crate::core::fixture::Fixture;
use crate::core::matrix::Matrix;
use crate::core::models::{RunnerSummary, TestStatus};
use crate::core::scenario::Scenario;
use crate::infra::host::TestContext;
use crate::infra::{lock, t};

/// Sub-test names by lifecycle state. A name enters `started` on registration
/// and at most one of the terminal sets afterwards.
#[derive(Debug, Default)]
struct StatusBook {
    started: BTreeSet<String>,
    passed: BTreeSet<String>,
    skipped: BTreeSet<String>,
    failed: BTreeSet<String>,
}

/// Runs tests defined against a matrix, once per scenario.
/// Created by [`Supervisor::new_runner`](crate::core::supervisor::Supervisor::new_runner).
pub struct Runner {
    t: TestContext,
    matrix: Matrix,
    book: Mutex<StatusBook>,
    teardowns: TaskTracker,
    teardown_timeout: Duration,
    quiet: bool,
}

impl Runner {
    pub(crate) fn new(
        t: TestContext,
        matrix: Matrix,
        teardowns: TaskTracker,
        config: &HarnessConfig,
    ) -> Self {
        Self {
            t,
            matrix,
            book: Mutex::new(StatusBook::default()),
            teardowns,
            teardown_timeout: config.teardown_timeout(),
            quiet: config.quiet,
        }
    }

    /// Name of the top-level test this runner belongs to.
    pub fn name(&self) -> &str {
        self.t.name()
    }

    /// The matrix snapshot this runner iterates.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Runs `test` once for every scenario, as a sub-test named
    /// `<scenario path>/<name>` under the runner's top-level test.
    ///
    /// Each sub-test builds its fixture with `make_fixture`, passes it to
    /// `test`, then tears it down. Both closures run synchronously on the
    /// sub-test's own thread; sub-tests themselves may run concurrently.
    pub fn run<F, M, B>(self: &Arc<Self>, name: &str, make_fixture: M, test: B)
    where
        F: Fixture,
        M: Fn(&TestContext, &Scenario) -> F + Send + Sync + 'static,
        B: Fn(&TestContext, &F) + Send + Sync + 'static,
    {
        let make_fixture = Arc::new(make_fixture);
        let test = Arc::new(test);

        for scenario in self.matrix.scenarios() {
            let runner = Arc::clone(self);
            let make_fixture = Arc::clone(&make_fixture);
            let test = Arc::clone(&test);
            // Outstanding from declaration until the status is recorded, so a
            // summary never misses a sub-test still waiting for a job slot.
            let outstanding = self.teardowns.token();

            self.t.run_parallel(&sub_test_name(&scenario, name), move |t| {
                runner.run_scenario(t, &scenario, make_fixture.as_ref(), test.as_ref());
                drop(outstanding);
            });
        }
    }

    fn run_scenario<F, M, B>(&self, t: &TestContext, scenario: &Scenario, make_fixture: &M, test: &B)
    where
        F: Fixture,
        M: Fn(&TestContext, &Scenario) -> F,
        B: Fn(&TestContext, &F),
    {
        self.record_started(t);

        if let Some(fixture) = t.catch(|| make_fixture(t, scenario)) {
            t.catch(|| test(t, &fixture));
            self.teardown(t, fixture);
        }

        self.record_status(t);
    }

    /// Tears `fixture` down on its own blocking task, waiting at most the
    /// teardown timeout. An overrunning teardown is logged and left running.
    fn teardown<F: Fixture>(&self, t: &TestContext, mut fixture: F) {
        if fixture.as_teardown().is_none() {
            return;
        }

        let ctx = t.clone();
        let unit = t.runtime().spawn_blocking(move || {
            ctx.catch(|| {
                if let Some(teardown) = fixture.as_teardown() {
                    teardown.teardown(&ctx);
                }
            });
        });

        let timeout = self.teardown_timeout;
        let overran = t.runtime().block_on(async move {
            tokio::select! {
                _ = unit => false,
                _ = tokio::time::sleep(timeout) => true,
            }
        });

        if overran {
            // Whatever the teardown does from here on is no longer reported.
            t.abandon();
            eprintln!(
                "{}",
                t!(
                    "runner.teardown_overrun",
                    name = t.name(),
                    timeout = format!("{:?}", timeout)
                )
                .red()
            );
        }
    }

    pub(crate) fn record_started(&self, t: &TestContext) {
        let name = t.name();
        let inserted = lock(&self.book).started.insert(name.to_string());
        if !inserted {
            t.fatal(t!("runner.duplicate_test_name", name = name));
        }
    }

    pub(crate) fn record_status(&self, t: &TestContext) -> Option<TestStatus> {
        let name = t.name();
        let status = TestStatus::from_flags(t.failed(), t.skipped());

        {
            let mut book = lock(&self.book);
            if !book.started.contains(name) {
                drop(book);
                t.error(t!("runner.not_started", name = name));
                return None;
            }
            let set = match status {
                TestStatus::Passed => &mut book.passed,
                TestStatus::Skipped => &mut book.skipped,
                TestStatus::Failed => &mut book.failed,
            };
            set.insert(name.to_string());
        }

        if !self.quiet {
            eprintln!(
                "{}",
                t!("runner.finished", name = name, status = status.label())
            );
        }
        Some(status)
    }

    /// Snapshot of this runner's bookkeeping. `missing` lists started
    /// sub-tests that never recorded a terminal status.
    pub fn collect_summary(&self) -> RunnerSummary {
        let book = lock(&self.book);
        let missing = book
            .started
            .iter()
            .filter(|n| {
                !book.passed.contains(*n) && !book.skipped.contains(*n) && !book.failed.contains(*n)
            })
            .cloned()
            .collect();

        RunnerSummary {
            name: self.name().to_string(),
            started: book.started.iter().cloned().collect(),
            passed: book.passed.iter().cloned().collect(),
            skipped: book.skipped.iter().cloned().collect(),
            failed: book.failed.iter().cloned().collect(),
            missing,
        }
    }
}

/// `<scenario path>/<test name>`; just the test name for a matrix without dimensions.
fn sub_test_name(scenario: &Scenario, name: &str) -> String {
    if scenario.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", scenario.path(), name)
    }
}
