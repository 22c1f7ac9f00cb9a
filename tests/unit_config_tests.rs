//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Tests loading `HarnessConfig` from TOML files and overriding it from the
//! command line.
//!
//! 测试从 TOML 文件加载 `HarnessConfig` 以及通过命令行覆盖配置。

use matrix_harness::cli::config_from_args;
use matrix_harness::core::config::DEFAULT_TEARDOWN_TIMEOUT_MS;
use matrix_harness::HarnessConfig;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

#[cfg(test)]
mod config_file_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();

        assert_eq!(config.language, "en");
        assert!(!config.list_scenarios);
        assert!(config.should_run_tests());
        assert_eq!(config.teardown_timeout(), Duration::from_secs(10));
        assert!(config.jobs() >= 1);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: HarnessConfig = toml::from_str("").unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("harness.toml");
        fs::write(
            &path,
            r#"
language = "zh-CN"
quiet = true
teardown_timeout_ms = 250
jobs = 3
json_report = "out/summary.json"
"#,
        )
        .unwrap();

        let config = HarnessConfig::load(&path).unwrap();

        assert_eq!(config.language, "zh-CN");
        assert!(config.quiet);
        assert!(!config.verbose);
        assert_eq!(config.teardown_timeout(), Duration::from_millis(250));
        assert_eq!(config.jobs(), 3);
        assert_eq!(config.json_report, Some(PathBuf::from("out/summary.json")));
        assert_eq!(config.html_report, None);
    }

    #[test]
    fn test_zero_jobs_still_allows_one() {
        let config = HarnessConfig {
            jobs: Some(0),
            ..HarnessConfig::default()
        };
        assert_eq!(config.jobs(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(HarnessConfig::load(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "jobs = \"many\"").unwrap();

        assert!(HarnessConfig::load(&path).is_err());
    }
}

#[cfg(test)]
mod command_line_tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_defaults() {
        let config = config_from_args(["fib-matrix"]).unwrap();

        assert!(!config.list_scenarios);
        assert!(!config.print_dimensions);
        assert_eq!(config.teardown_timeout_ms, DEFAULT_TEARDOWN_TIMEOUT_MS);
    }

    #[test]
    fn test_flags_are_applied() {
        let config = config_from_args([
            "fib-matrix",
            "--ls",
            "-q",
            "--jobs",
            "2",
            "--teardown-timeout-ms",
            "50",
            "--lang",
            "zh-CN",
            "--html",
            "report.html",
        ])
        .unwrap();

        assert!(config.list_scenarios);
        assert!(config.quiet);
        assert_eq!(config.jobs, Some(2));
        assert_eq!(config.teardown_timeout_ms, 50);
        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.html_report, Some(PathBuf::from("report.html")));
    }

    #[test]
    fn test_dimensions_flag_disables_running() {
        let config = config_from_args(["fib-matrix", "--dimensions"]).unwrap();
        assert!(!config.should_run_tests());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("harness.toml");
        fs::write(&path, "teardown_timeout_ms = 400\nverbose = true\n").unwrap();

        let config = config_from_args([
            "fib-matrix".into(),
            "--config".into(),
            path.into_os_string(),
            "--teardown-timeout-ms".into(),
            "20".into(),
        ])
        .unwrap();

        assert!(config.verbose);
        assert_eq!(config.teardown_timeout_ms, 20);
    }

    #[test]
    fn test_invalid_jobs_value_is_rejected() {
        let err = config_from_args(["fib-matrix", "--jobs", "lots"]).unwrap_err();
        assert!(err.downcast_ref::<clap::Error>().is_some());
    }
}
