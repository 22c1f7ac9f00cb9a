use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

/// Runs the whole fibonacci demo suite. Every sub-test passes, so the
/// command succeeds and the summary reports no failures.
///
/// 运行完整的斐波那契演示套件。所有子测试都通过，因此命令成功且摘要报告没有失败。
#[test]
fn test_successful_run() {
    let mut cmd = Command::cargo_bin("fib-matrix").unwrap();
    cmd.arg("--lang").arg("en");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Summary: 0 failed; 0 skipped; 10 passed; 0 missing (total 10)",
        ))
        .stdout(predicate::str::contains("TestFibLarge summary"));
}

/// `--ls` prints every `<test>/<scenario>` path and runs nothing; the
/// dry run always exits successfully and prints no summary.
///
/// `--ls` 打印每个 `<测试>/<场景>` 路径且不运行任何测试；试运行总是成功退出且不打印摘要。
#[test]
fn test_list_scenarios() {
    let mut cmd = Command::cargo_bin("fib-matrix").unwrap();
    cmd.arg("--ls");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TestFib/iter/memoized\n"))
        .stdout(predicate::str::contains("TestFib/recur/plain\n"))
        .stdout(predicate::str::contains("TestFibLarge/iter/plain\n"))
        .stdout(predicate::str::contains("TestFibLarge/recur").not())
        .stdout(predicate::str::contains("Summary:").not());
}

/// `--dimensions` prints the matrix dimensions and the value table.
///
/// `--dimensions` 打印矩阵维度和取值表。
#[test]
fn test_print_dimensions() {
    let mut cmd = Command::cargo_bin("fib-matrix").unwrap();
    cmd.arg("--dimensions").arg("--lang").arg("en");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fibonacci func"))
        .stdout(predicate::str::contains("values: iter, recur"))
        .stdout(predicate::str::contains("fib\tenhancement\t\n-\t-\t\niter\tmemoized\t\nrecur\tplain\t\n"))
        .stdout(predicate::str::contains("Summary:").not());
}

/// Report files are written when asked for.
///
/// 按要求写入报告文件。
#[test]
fn test_reports_are_written() {
    let dir = tempdir().unwrap();
    let html = dir.path().join("report.html");
    let json = dir.path().join("report.json");

    let mut cmd = Command::cargo_bin("fib-matrix").unwrap();
    cmd.arg("-q").arg("--html").arg(&html).arg("--json").arg(&json);

    cmd.assert().success();

    assert!(html.exists());
    let summary = std::fs::read_to_string(&json).unwrap();
    assert!(summary.contains("\"passed\": 10"));
}

/// A missing configuration file is reported as an error.
///
/// 缺失的配置文件会被报告为错误。
#[test]
fn test_missing_config_file() {
    let mut cmd = Command::cargo_bin("fib-matrix").unwrap();
    cmd.arg("--config").arg("does/not/exist.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

/// An unknown flag is rejected by the argument parser.
///
/// 未知参数会被参数解析器拒绝。
#[test]
fn test_unknown_flag() {
    let mut cmd = Command::cargo_bin("fib-matrix").unwrap();
    cmd.arg("--no-such-flag");

    cmd.assert().failure();
}

/// A report that cannot be written is logged, and the run keeps its own
/// outcome.
///
/// 无法写入的报告只会被记录，运行结果保持不变。
#[test]
fn test_unwritable_report_is_logged() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("missing-dir").join("report.json");

    let mut cmd = Command::cargo_bin("fib-matrix").unwrap();
    cmd.arg("-q").arg("--lang").arg("en").arg("--json").arg(&json);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Failed to generate JSON report:"));
}
