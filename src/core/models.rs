//! # Data Models Module / 数据模型模块
//!
//! This module defines the result data shared by the host, the runners and
//! the supervisor: the terminal status of a test, the bookkeeping snapshot of
//! one runner, and the aggregate summary of a whole run.
//!
//! 此模块定义宿主、运行器和监督器共享的结果数据：
//! 测试的最终状态、单个运行器的记账快照以及整次运行的汇总摘要。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::infra::t;

/// The terminal status of a test.
/// 测试的最终状态。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TestStatus {
    /// Neither failed nor skipped / 既未失败也未跳过
    Passed,
    /// Skipped and not failed / 已跳过且未失败
    Skipped,
    /// Failed; takes precedence over skipped / 已失败；优先于跳过
    Failed,
}

impl TestStatus {
    /// Decides the status from the host disposition flags.
    /// A failure wins over a skip; with neither flag the test passed.
    pub fn from_flags(failed: bool, skipped: bool) -> Self {
        if failed {
            TestStatus::Failed
        } else if skipped {
            TestStatus::Skipped
        } else {
            TestStatus::Passed
        }
    }

    /// Gets the localized label of this status.
    pub fn label(&self) -> String {
        match self {
            TestStatus::Passed => t!("status.passed").to_string(),
            TestStatus::Skipped => t!("status.skipped").to_string(),
            TestStatus::Failed => t!("status.failed").to_string(),
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The bookkeeping of one runner: every sub-test name it started, grouped by
/// terminal status. All name lists are sorted.
///
/// 单个运行器的记账信息：它启动的所有子测试名称，按最终状态分组。所有名称列表均已排序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunnerSummary {
    /// Name of the top-level test owning the runner / 拥有该运行器的顶层测试名称
    pub name: String,
    pub started: Vec<String>,
    pub passed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
    /// Started names that never reached a terminal status.
    /// Non-empty only when status recording was bypassed, which is a harness bug.
    ///
    /// 已启动但从未到达最终状态的名称。仅当状态记录被绕过时才非空，这表示测试工具自身的缺陷。
    pub missing: Vec<String>,
}

impl RunnerSummary {
    pub fn total(&self) -> usize {
        self.started.len()
    }
}

/// The aggregate result of every runner owned by a supervisor.
///
/// 监督器拥有的所有运行器的汇总结果。
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub runners: Vec<RunnerSummary>,
    pub total: usize,
    pub passed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub missing: usize,
    /// Names of failed sub-tests across all runners / 所有运行器中失败的子测试名称
    pub failed_names: Vec<String>,
    /// Names of sub-tests without status across all runners / 所有运行器中未报告状态的子测试名称
    pub missing_names: Vec<String>,
    pub generated_at: DateTime<Local>,
}

impl Summary {
    pub fn from_runners(runners: Vec<RunnerSummary>) -> Self {
        let failed_names: Vec<String> = runners.iter().flat_map(|r| r.failed.clone()).collect();
        let missing_names: Vec<String> = runners.iter().flat_map(|r| r.missing.clone()).collect();

        Self {
            total: runners.iter().map(RunnerSummary::total).sum(),
            passed: runners.iter().map(|r| r.passed.len()).sum(),
            skipped: runners.iter().map(|r| r.skipped.len()).sum(),
            failed: failed_names.len(),
            missing: missing_names.len(),
            failed_names,
            missing_names,
            runners,
            generated_at: Local::now(),
        }
    }

    /// `true` when nothing failed and every started test reported a status.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.missing == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            t!(
                "summary.totals",
                failed = self.failed,
                skipped = self.skipped,
                passed = self.passed,
                missing = self.missing,
                total = self.total
            )
        )
    }
}
