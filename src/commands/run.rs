// src/commands/run.rs

use anyhow::Result;
use colored::*;
use std::process::ExitCode;
use std::sync::Arc;

use crate::{
    core::{config::HarnessConfig, matrix::Matrix, models::Summary, supervisor::Supervisor},
    infra::{host::Host, t},
    reporting::{generate_html_report, print_dimensions, write_json_report},
};

/// Runs a whole test suite and returns the process exit code.
///
/// `register` declares the suite's top-level tests on the host, each of which
/// should obtain its runner from the supervisor. It is only called when tests
/// are actually going to run, so it is also the place for one-off setup.
///
/// - With `print_dimensions` set, the dimensions of `matrix` are printed and
///   nothing runs.
/// - With `list_scenarios` set, every top-level test lists its scenario paths
///   and is skipped; no summary is printed.
/// - Otherwise the tests run, the summary is printed and the configured
///   reports are written.
///
/// The exit code is the host's own verdict: it fails exactly when a test
/// failed, and a dry run always succeeds.
///
/// # Errors
/// Fails if a supervisor already exists in this process, if the runtime
/// cannot start, or if `register` fails.
pub fn execute<R>(config: HarnessConfig, matrix: &Matrix, register: R) -> Result<ExitCode>
where
    R: FnOnce(&Arc<Supervisor>, &mut Host) -> Result<()>,
{
    rust_i18n::set_locale(&config.language);

    if !config.should_run_tests() {
        print_dimensions(matrix);
        return Ok(ExitCode::SUCCESS);
    }

    let supervisor = Supervisor::new(config.clone())?;
    let mut host = Host::new(&config)?;
    register(&supervisor, &mut host)?;

    let report = host.run();

    if !config.list_scenarios {
        let summary = supervisor.print_summary();
        write_reports(&summary, &config);
    }

    Ok(report.exit_code())
}

/// Report files are a convenience; failing to write one never changes the
/// outcome of the run.
fn write_reports(summary: &Summary, config: &HarnessConfig) {
    if let Some(path) = &config.html_report {
        match generate_html_report(summary, path) {
            Ok(()) => println!("{}", t!("report.html_written", path = path.display()).cyan()),
            Err(e) => eprintln!("{} {:#}", t!("report.html_failed").red(), e),
        }
    }

    if let Some(path) = &config.json_report {
        match write_json_report(summary, path) {
            Ok(()) => println!("{}", t!("report.json_written", path = path.display()).cyan()),
            Err(e) => eprintln!("{} {:#}", t!("report.json_failed").red(), e),
        }
    }
}
