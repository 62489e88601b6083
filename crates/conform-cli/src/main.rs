//! Conformance review CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};

use conform_cli::cli::{Cli, Command};
use conform_cli::commands::{
    run_comment, run_decide, run_discrepancies, run_export, run_import_matrix, run_list,
    run_set_status, run_summary,
};
use conform_cli::logging::{LogConfig, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Summary(args) => run_summary(args),
        Command::List(args) => run_list(args),
        Command::Discrepancies(args) => run_discrepancies(args),
        Command::Decide(args) => run_decide(args),
        Command::SetStatus(args) => run_set_status(args),
        Command::Comment(args) => run_comment(args),
        Command::ImportMatrix(args) => run_import_matrix(args),
        Command::Export(args) => run_export(args),
    };
    let exit_code = outcome.unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        1
    });
    std::process::exit(exit_code);
}

/// `--log-level` beats `-v`/`-q`; either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), Into::into);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        with_ansi,
        ..LogConfig::default()
    }
    .with_level_filter(level_filter)
    .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
    .with_format(cli.log_format.into())
    .with_log_file(cli.log_file.clone())
}
