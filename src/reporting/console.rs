//! # Console Reporting Module / 控制台报告模块
//!
//! Prints summaries and matrix listings to the console, coloured and
//! localized.
//!
//! 在控制台打印彩色且本地化的摘要和矩阵列表。

use colored::*;

use crate::core::matrix::Matrix;
use crate::core::models::{RunnerSummary, Summary};
use crate::infra::t;

/// Prints the aggregate summary of a run.
///
/// # Output Format / 输出格式
/// ```text
/// TestFib summary: 1 failed; 0 skipped; 3 passed (total 4)
/// These tests failed:
/// FAILED> TestFib/recur/plain/sequence
/// These tests did not report status:
/// MISSING> TestFib/iter/plain/sequence
/// Summary: 1 failed; 0 skipped; 3 passed; 1 missing (total 4)
/// ```
///
/// Per-runner lines are left out when `quiet` is set.
pub fn print_summary(summary: &Summary, quiet: bool) {
    if !quiet {
        for runner in &summary.runners {
            println!("{}", runner_line(runner));
        }
    }

    if !summary.failed_names.is_empty() {
        println!("{}", t!("summary.failed_header").red().bold());
        for name in &summary.failed_names {
            println!("{}", format!("FAILED> {}", name).red());
        }
    }

    if !summary.missing_names.is_empty() {
        println!("{}", t!("summary.missing_header").yellow().bold());
        for name in &summary.missing_names {
            println!("{}", format!("MISSING> {}", name).yellow());
        }
    }

    let totals = summary.to_string();
    if summary.is_clean() {
        println!("{}", totals.green().bold());
    } else {
        println!("{}", totals.red().bold());
    }
}

fn runner_line(runner: &RunnerSummary) -> String {
    t!(
        "summary.runner_line",
        name = runner.name,
        failed = runner.failed.len(),
        skipped = runner.skipped.len(),
        passed = runner.passed.len(),
        total = runner.total()
    )
    .to_string()
}

/// Prints one `<test_name>/<scenario path>` line per scenario of `matrix`.
pub fn print_scenario_paths(test_name: &str, matrix: &Matrix) {
    for scenario in matrix.scenarios() {
        if scenario.is_empty() {
            println!("{}", test_name);
        } else {
            println!("{}/{}", test_name, scenario.path());
        }
    }
}

/// Prints each dimension with its description and sorted values, followed by
/// the dimension table.
///
/// # Output Format / 输出格式
/// ```text
/// Test matrix dimensions:
///   fib: fibonacci func
///     values: iter, recur
///   enhancement: which enhancement to use
///     values: memoized, plain
///
/// fib	enhancement
/// -	-
/// iter	memoized
/// recur	plain
/// ```
pub fn print_dimensions(matrix: &Matrix) {
    println!("{}", t!("matrix.dimensions_header").bold());
    for info in matrix.list_dimensions() {
        println!("  {}: {}", info.name.cyan(), info.description);
        println!(
            "    {}",
            t!("matrix.dimension_values", values = info.values.join(", "))
        );
    }
    println!();
    print!("{}", matrix);
}
