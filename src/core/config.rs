use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infra::t;

/// Default time a fixture teardown may take before the runner moves on.
pub const DEFAULT_TEARDOWN_TIMEOUT_MS: u64 = 10_000;

/// Process-wide harness settings, loaded from an optional TOML file and then
/// overridden by command-line flags. Read once at startup; the supervisor and
/// the host each keep an immutable copy.
///
/// 进程级测试工具设置，从可选的 TOML 文件加载，再由命令行参数覆盖。
/// 启动时读取一次；监督器和宿主各自保存一份不可变副本。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// The language for the harness output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 测试工具输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// Dry-run: list every `<top-level>/<scenario>` path instead of running test bodies.
    /// 试运行：列出每个 `<顶层测试>/<场景>` 路径而不执行测试体。
    #[serde(default)]
    pub list_scenarios: bool,

    /// Print the matrix dimensions and exit without running tests.
    /// 打印矩阵维度后退出，不运行测试。
    #[serde(default)]
    pub print_dimensions: bool,

    /// Suppress per-runner summary lines and per-test finish logs.
    /// 不输出每个运行器的摘要行和每个测试的完成日志。
    #[serde(default)]
    pub quiet: bool,

    /// Also print PASS and SKIP result lines; FAIL lines are always printed.
    /// 同时输出 PASS 和 SKIP 结果行；FAIL 行总是输出。
    #[serde(default)]
    pub verbose: bool,

    /// How long a fixture teardown may run before it is abandoned, in milliseconds.
    /// 夹具清理在被放弃前允许运行的时间（毫秒）。
    #[serde(default = "default_teardown_timeout_ms")]
    pub teardown_timeout_ms: u64,

    /// Maximum number of parallel sub-tests running at once. Defaults to the CPU count.
    /// 同时运行的并行子测试最大数量。默认为 CPU 数量。
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Optional path of an HTML summary report / 可选的 HTML 摘要报告路径
    #[serde(default)]
    pub html_report: Option<PathBuf>,

    /// Optional path of a JSON summary report / 可选的 JSON 摘要报告路径
    #[serde(default)]
    pub json_report: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            list_scenarios: false,
            print_dimensions: false,
            quiet: false,
            verbose: false,
            teardown_timeout_ms: default_teardown_timeout_ms(),
            jobs: None,
            html_report: None,
            json_report: None,
        }
    }
}

impl HarnessConfig {
    /// Loads settings from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| t!("config.read_failed", path = path.display()))?;
        toml::from_str(&content).with_context(|| t!("config.parse_failed", path = path.display()))
    }

    /// Returns `true` if tests should actually run, rather than only
    /// printing information about the matrix.
    pub fn should_run_tests(&self) -> bool {
        !self.print_dimensions
    }

    pub fn teardown_timeout(&self) -> Duration {
        Duration::from_millis(self.teardown_timeout_ms)
    }

    /// The effective parallelism limit, never less than one.
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(num_cpus::get).max(1)
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_teardown_timeout_ms() -> u64 {
    DEFAULT_TEARDOWN_TIMEOUT_MS
}
