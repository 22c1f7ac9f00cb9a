// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, ffi::OsString, path::PathBuf};

use crate::core::config::HarnessConfig;
use crate::infra::t;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language(args: &[OsString]) -> Option<String> {
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).and_then(|lang| lang.to_str()).map(str::to_string)
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("fib-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("ls")
                .long("ls")
                .help(t!("arg_ls", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dimensions")
                .long("dimensions")
                .help(t!("arg_dimensions", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help(t!("arg_quiet", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("arg_verbose", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("arg_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help(t!("arg_jobs", locale = locale).to_string())
                .value_name("JOBS")
                .value_parser(clap::value_parser!(usize))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("teardown-timeout-ms")
                .long("teardown-timeout-ms")
                .help(t!("arg_teardown_timeout", locale = locale).to_string())
                .value_name("MILLIS")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help(t!("arg_html", locale = locale).to_string())
                .value_name("HTML")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help(t!("arg_json", locale = locale).to_string())
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Builds the harness configuration from the process arguments.
pub fn parse_args() -> Result<HarnessConfig> {
    config_from_args(env::args_os())
}

/// Builds the harness configuration from `args` (program name first).
///
/// Settings come from the `--config` TOML file when given, or the defaults
/// otherwise; flags on the command line override them.
pub fn config_from_args<I, A>(args: I) -> Result<HarnessConfig>
where
    I: IntoIterator<Item = A>,
    A: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let locale = pre_parse_language(&args)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());

    let matches = build_cli(&locale).try_get_matches_from(args)?;
    apply_matches(&matches)
}

fn apply_matches(matches: &ArgMatches) -> Result<HarnessConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };

    if let Some(lang) = matches.get_one::<String>("lang") {
        config.language = lang.clone();
    }
    config.list_scenarios |= matches.get_flag("ls");
    config.print_dimensions |= matches.get_flag("dimensions");
    config.quiet |= matches.get_flag("quiet");
    config.verbose |= matches.get_flag("verbose");
    if let Some(jobs) = matches.get_one::<usize>("jobs") {
        config.jobs = Some(*jobs);
    }
    if let Some(timeout) = matches.get_one::<u64>("teardown-timeout-ms") {
        config.teardown_timeout_ms = *timeout;
    }
    if let Some(html) = matches.get_one::<PathBuf>("html") {
        config.html_report = Some(html.clone());
    }
    if let Some(json) = matches.get_one::<PathBuf>("json") {
        config.json_report = Some(json.clone());
    }

    Ok(config)
}
