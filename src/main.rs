// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use dgproc::app_config::{Config, LogLevel};
use dgproc::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// dgproc - Divergloss glossary processor
///
/// Filters a Divergloss glossary and builds various outputs out of it.
/// Also fully validates the glossary, past what its structure alone can.
#[derive(Parser, Debug)]
#[command(name = "dgproc")]
#[command(version = "0.1.0")]
#[command(about = "Filter a glossary and build various outputs")]
#[command(long_about = "Filters a Divergloss glossary and builds various outputs out of it.
Also fully validates the glossary, past what its structure alone can.

EXAMPLES:
    dgproc gloss.json                                   # Only load and check
    dgproc gloss.json pass text-simple -w lang:sr       # Plain text listing
    dgproc gloss.json pass html-bidict -w olang:en -w tlang:sr -w file:dict.html
    dgproc gloss.json pass plrules -w olang:en -w tlang:sr -w file:term.rules
    dgproc -S                                           # List filters and views
    dgproc gloss.json pass html-bidict -H               # Help on a view

PARAMETERS:
    Parameters to filters (-f) and views (-w) are given as NAME for flags,
    NAME:VALUE for single values and NAME:V1,V2,... for lists, where ,,
    stands for a literal comma. Each parameter goes to every issued
    subcommand of its category which accepts it.

CONFIGURATION:
    Defaults may be read from a JSON configuration file given with --config.
    A missing configuration file means built-in defaults.")]
struct CommandLineOptions {
    /// Glossary file
    #[arg(value_name = "GLOSSARY", required_unless_present_any = ["list_subcmd", "completions"])]
    glossary: Option<PathBuf>,

    /// Comma-separated filters to apply
    #[arg(value_name = "FILTERS")]
    filters: Option<String>,

    /// Comma-separated views to build
    #[arg(value_name = "VIEWS")]
    views: Option<String>,

    /// Specify parameter to filters
    #[arg(short = 'f', long = "filter-par", value_name = "PARSPEC")]
    filter_par: Vec<String>,

    /// Specify parameter to views
    #[arg(short = 'w', long = "view-par", value_name = "PARSPEC")]
    view_par: Vec<String>,

    /// List available filters and views and exit
    #[arg(short = 'S', long = "list-subcmd")]
    list_subcmd: bool,

    /// Display help on filters and views and exit
    #[arg(short = 'H', long = "help-subcmd")]
    help_subcmd: bool,

    /// Do not check the glossary for validity
    #[arg(long = "no-check")]
    no_check: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH", env = "DGPROC_CONFIG")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print a completion script for the shell and exit
    #[arg(long, value_enum, value_name = "SHELL", hide = true)]
    completions: Option<Shell>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Records are filtered by the global max level, adjusted after config loading.
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("error:", "\x1B[1;31m"),
            Level::Warn => ("warning:", "\x1B[1;33m"),
            Level::Info => ("", "\x1B[1;32m"),
            Level::Debug => ("debug:", "\x1B[1;36m"),
            Level::Trace => ("trace:", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (tag, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

// Subcommand names from a comma-separated argument
fn split_names(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn run(cli: CommandLineOptions) -> Result<()> {
    if let Some(shell) = cli.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "dgproc", &mut std::io::stdout());
        return Ok(());
    }

    // Apply command line log level early, so config loading is logged too
    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_or_default(path)?,
        None => Config::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if cli.no_check {
        config.check = false;
    }
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config)?;

    if cli.list_subcmd {
        print!("{}", controller.list_subcmds());
        return Ok(());
    }

    let glossary = cli.glossary.ok_or_else(|| anyhow!("no file given"))?;
    let mut request = controller.request(glossary);
    if let Some(filters) = &cli.filters {
        request.filters = split_names(filters);
    }
    if let Some(views) = &cli.views {
        request.views = split_names(views);
    }
    request.filter_params = cli.filter_par;
    request.view_params = cli.view_par;

    if cli.help_subcmd {
        println!("{}", controller.help_subcmds(&request.filters, &request.views)?);
        return Ok(());
    }

    controller.run(&request)
}

fn main() -> ExitCode {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = CommandLineOptions::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
