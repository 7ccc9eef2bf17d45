//! Options and setup shared by the subcommands.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use membership_criteria::config::Config;
use membership_criteria::{CachedResolver, DirectoryResolver, Result};
use ohno::IntoAppError;
use std::{fs, io};

const LOG_TARGET: &str = "       cli";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Arguments shared by the subcommands that work with source names
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file [default: one of criteria.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Loaded configuration plus the source directory built from it
#[derive(Debug)]
pub struct Common {
    pub config: Config,
    pub warnings: Vec<String>,
    directory: DirectoryResolver,
}

impl Common {
    /// Initialize logging and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let base_dir = Utf8PathBuf::from(".");
        let (config, warnings) = Config::load(&base_dir, args.config.as_ref())?;
        match &args.config {
            Some(path) => log::info!(target: LOG_TARGET, "Loaded configuration from {path} with {} source(s)", config.sources.len()),
            None => log::info!(target: LOG_TARGET, "Using configuration with {} source(s)", config.sources.len()),
        }

        for warning in &warnings {
            log::warn!(target: LOG_TARGET, "{warning}");
        }

        let directory = DirectoryResolver::from_pairs(config.sources.iter().map(|(name, id)| (name.as_str(), id.as_str())));

        Ok(Self {
            config,
            warnings,
            directory,
        })
    }

    /// Resolver from source names to source ids
    pub fn name_to_id(&self) -> CachedResolver<DirectoryResolver> {
        CachedResolver::new(self.directory.clone())
    }

    /// Resolver from source ids back to source names
    pub fn id_to_name(&self) -> CachedResolver<DirectoryResolver> {
        CachedResolver::new(self.directory.inverted())
    }
}

pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}

/// Expression text from the command line, or from stdin when absent
pub fn read_expression(arg: Option<&str>) -> Result<String> {
    let text = match arg {
        Some(text) => text.to_string(),
        None => io::read_to_string(io::stdin()).into_app_err("reading expression from stdin")?,
    };

    Ok(text.trim().to_string())
}

/// File contents, or stdin when no path is given
pub fn read_input(path: Option<&Utf8Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).into_app_err_with(|| format!("reading {path}")),
        None => io::read_to_string(io::stdin()).into_app_err("reading stdin"),
    }
}

pub fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    eprintln!("Configuration validation warnings:");
    for warning in warnings {
        eprintln!("   {warning}");
    }
    eprintln!();
}
