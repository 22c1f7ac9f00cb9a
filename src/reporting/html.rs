//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders the aggregate summary of a run as a standalone HTML page: total
//! counts, one row per top-level test, and the failed and missing test names.
//!
//! 将一次运行的汇总摘要渲染为独立的 HTML 页面：总数统计、每个顶层测试一行，以及失败和缺失的测试名称。

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::core::models::Summary;
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 2em; color: #222; }
.summary-container { display: flex; gap: 1.5em; margin-bottom: 2em; }
.summary-item { display: flex; flex-direction: column; align-items: center; }
.count { font-size: 2em; font-weight: bold; }
.passed-text { color: #2e7d32; }
.failed-text { color: #c62828; }
.skipped-text { color: #757575; }
.missing-text { color: #ef6c00; }
table { border-collapse: collapse; width: 100%; margin-bottom: 2em; }
th, td { border: 1px solid #ddd; padding: 0.4em 0.8em; text-align: left; }
th { background: #f5f5f5; }
code { font-size: 0.95em; }
"#;

/// Generates an HTML report of `summary` at `output_path`.
///
/// 在 `output_path` 生成 `summary` 的 HTML 报告。
///
/// # Errors / 错误
/// Fails if the file cannot be written.
/// 无法写入文件时返回错误。
pub fn generate_html_report(summary: &Summary, output_path: &Path) -> Result<()> {
    let page = render(summary);
    fs::write(output_path, page.into_string())
        .with_context(|| t!("report.write_failed", path = output_path.display()))?;
    Ok(())
}

fn render(summary: &Summary) -> Markup {
    let generated_at = summary.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title")) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header")) }
                p { (t!("html_report.generated_at", time = generated_at)) }

                div class="summary-container" {
                    (summary_item(summary.total, "", &t!("html_report.total")))
                    (summary_item(summary.passed, "passed-text", &t!("html_report.passed")))
                    (summary_item(summary.failed, "failed-text", &t!("html_report.failed")))
                    (summary_item(summary.skipped, "skipped-text", &t!("html_report.skipped")))
                    (summary_item(summary.missing, "missing-text", &t!("html_report.missing")))
                }

                table {
                    thead {
                        tr {
                            th { (t!("html_report.runner")) }
                            th { (t!("html_report.total")) }
                            th { (t!("html_report.passed")) }
                            th { (t!("html_report.failed")) }
                            th { (t!("html_report.skipped")) }
                            th { (t!("html_report.missing")) }
                        }
                    }
                    tbody {
                        @for runner in &summary.runners {
                            tr {
                                td { code { (runner.name) } }
                                td { (runner.total()) }
                                td class="passed-text" { (runner.passed.len()) }
                                td class="failed-text" { (runner.failed.len()) }
                                td class="skipped-text" { (runner.skipped.len()) }
                                td class="missing-text" { (runner.missing.len()) }
                            }
                        }
                    }
                }

                @if !summary.failed_names.is_empty() {
                    h2 class="failed-text" { (t!("html_report.failed_tests")) }
                    ul {
                        @for name in &summary.failed_names {
                            li { code { (name) } }
                        }
                    }
                }

                @if !summary.missing_names.is_empty() {
                    h2 class="missing-text" { (t!("html_report.missing_tests")) }
                    ul {
                        @for name in &summary.missing_names {
                            li { code { (name) } }
                        }
                    }
                }
            }
        }
    }
}

fn summary_item(count: usize, class: &str, label: &str) -> Markup {
    html! {
        div class="summary-item" {
            span class={ "count " (class) } { (count) }
            span class="label" { (label) }
        }
    }
}
