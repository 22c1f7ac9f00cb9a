//! # Supervisor Module / 监督器模块
//!
//! The supervisor owns every runner created during one process run and
//! collates their bookkeeping into the final summary.
//!
//! Exactly one supervisor must exist per process: several would split the
//! summary into partial, misleading reports. [`Supervisor::new`] therefore
//! refuses to create a second one.
//!
//! 监督器拥有一次进程运行期间创建的所有运行器，并将它们的记账信息汇总为最终摘要。
//!
//! 每个进程必须只存在一个监督器：多个监督器会把摘要拆分成不完整、具有误导性的报告。
//! 因此 [`Supervisor::new`] 会拒绝创建第二个监督器。

use anyhow::{bail, Result};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio_util::task::TaskTracker;

use crate::core::config::HarnessConfig;
use crate::core::matrix::Matrix;
use crate::core::models::Summary;
use crate::core::runner::Runner;
use crate::infra::host::TestContext;
use crate::infra::{lock, t};
use crate::reporting::console;

static SUPERVISOR_CREATED: OnceCell<()> = OnceCell::new();

/// Supervises a set of runners and collates their results.
pub struct Supervisor {
    config: HarnessConfig,
    runners: Mutex<BTreeMap<String, Arc<Runner>>>,
    /// Tracks sub-tests whose status is not recorded yet.
    teardowns: TaskTracker,
}

impl Supervisor {
    /// Creates the process-wide supervisor.
    ///
    /// Call this once, at process entry, and hand the returned `Arc` to every
    /// top-level test.
    ///
    /// # Errors
    /// Fails if a supervisor was already created in this process.
    pub fn new(config: HarnessConfig) -> Result<Arc<Self>> {
        if SUPERVISOR_CREATED.set(()).is_err() {
            bail!(t!("supervisor.already_created"));
        }
        Ok(Self::unguarded(config))
    }

    pub(crate) fn unguarded(config: HarnessConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            runners: Mutex::new(BTreeMap::new()),
            teardowns: TaskTracker::new(),
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns a runner for the top-level test `t`, bound to a snapshot of
    /// `matrix`. Call it once per top-level test; a second runner registered
    /// under the same name replaces the first in the summary.
    ///
    /// In dry-run mode this prints every `<test>/<scenario>` path and skips
    /// `t` instead, so no test body runs.
    pub fn new_runner(&self, t: &TestContext, matrix: &Matrix) -> Arc<Runner> {
        if self.config.list_scenarios {
            console::print_scenario_paths(t.name(), matrix);
            t.skip(t!("supervisor.listing_only"));
        }

        let runner = Arc::new(Runner::new(
            t.clone(),
            matrix.clone(),
            self.teardowns.clone(),
            &self.config,
        ));
        lock(&self.runners).insert(t.name().to_string(), Arc::clone(&runner));
        runner
    }

    /// Number of runners registered so far.
    pub fn test_count(&self) -> usize {
        lock(&self.runners).len()
    }

    pub fn runner(&self, name: &str) -> Option<Arc<Runner>> {
        lock(&self.runners).get(name).cloned()
    }

    /// Resolves once every started sub-test has recorded its status, that is
    /// once every teardown has either completed or timed out.
    pub async fn wait_for_teardowns(&self) {
        self.teardowns.close();
        self.teardowns.wait().await;
    }

    /// Waits for outstanding teardowns, then aggregates every runner's
    /// bookkeeping.
    pub fn summary(&self) -> Summary {
        futures::executor::block_on(self.wait_for_teardowns());

        let runners: Vec<Arc<Runner>> = lock(&self.runners).values().cloned().collect();
        Summary::from_runners(runners.iter().map(|r| r.collect_summary()).collect())
    }

    /// Prints a summary of the tests run, per top-level test and in total,
    /// listing failed tests and tests that never reported a status.
    /// Must be called after every test has run.
    pub fn print_summary(&self) -> Summary {
        let summary = self.summary();
        console::print_summary(&summary, self.config.quiet);
        summary
    }
}
