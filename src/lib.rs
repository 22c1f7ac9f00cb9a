//! # Matrix Harness Library / Matrix Harness 库
//!
//! This library runs every test you write once for each combination of a set
//! of named test dimensions (implementations, environments, decorators, ...),
//! and collects the pass/fail/skip outcome of every generated sub-test into
//! one consolidated summary.
//!
//! 此库针对一组命名测试维度（实现、环境、装饰器等）的每一种组合运行一次你编写的测试，
//! 并将每个生成的子测试的通过/失败/跳过结果汇总为一份统一的摘要。
//!
//! ## Modules / 模块
//!
//! - `core` - Dimensions, the matrix engine, scenarios, runners and the supervisor
//! - `infra` - The host sub-test scheduler built on tokio
//! - `reporting` - Console, HTML and JSON summaries
//! - `cli` / `commands` - Command-line configuration and the suite entry point
//! - `demo` - The fibonacci example domain used by the `fib-matrix` binary
//!
//! - `core` - 维度、矩阵引擎、场景、运行器和监督器
//! - `infra` - 基于 tokio 的宿主子测试调度器
//! - `reporting` - 控制台、HTML 和 JSON 摘要
//! - `cli` / `commands` - 命令行配置和套件入口
//! - `demo` - `fib-matrix` 可执行文件使用的斐波那契示例领域

pub mod cli;
pub mod commands;
pub mod core;
pub mod demo;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config::HarnessConfig;
pub use crate::core::dimension::{Dimension, Value};
pub use crate::core::fixture::{Fixture, Teardown};
pub use crate::core::matrix::{DimensionInfo, Matrix};
pub use crate::core::models::{RunnerSummary, Summary, TestStatus};
pub use crate::core::runner::Runner;
pub use crate::core::scenario::{Binding, Scenario};
pub use crate::core::supervisor::Supervisor;
pub use crate::infra::host::{Host, HostReport, TestContext, TestOutcome};

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the harness output. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
