//! Screener terminal CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use scan_cli::logging::{LogConfig, LogFormat, init_logging};
use scan_cli::session;

mod cli;
mod commands;
mod render;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_columns, run_dump, run_export, run_pin, run_status, run_view, run_watch,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = session::source_config(cli.csv.as_deref(), cli.folder.as_deref());
    let pins_file = cli.pins_file.as_deref();
    let exit_code = match &cli.command {
        Command::View(args) => run(|| run_view(args, &config, pins_file)),
        Command::Export(args) => run(|| run_export(args, &config, pins_file)),
        Command::Status => run(|| run_status(&config)),
        Command::Dump => run(|| run_dump(&config)),
        Command::Columns => run(run_columns),
        Command::Pin(args) => run(|| run_pin(&args.command, pins_file)),
        Command::Watch(args) => run(|| run_watch(args, &config, pins_file)),
    };
    std::process::exit(exit_code);
}

fn run(command: impl FnOnce() -> anyhow::Result<()>) -> i32 {
    match command() {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
