//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::commands;

/// Wolfpack downloader and synchronizer
#[derive(Parser, Debug)]
#[command(name = "wolfpack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    sync: commands::sync::SyncArgs,

    /// Parse a config file and print its libraries without synchronizing
    #[arg(long, value_name = "PATH")]
    check_config: Option<PathBuf>,

    /// Print more info (same as --log-level debug)
    #[arg(short, long)]
    verbose: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        match self.check_config {
            Some(path) => commands::check_config::execute(&path, &self.color),
            None => commands::sync::execute(self.sync, &self.color),
        }
    }

    /// Installs the process logger. Only `main` gets here, once.
    fn init_logging(&self) {
        let result = self.logger_builder().try_init();
        debug_assert!(result.is_ok(), "logger initialized twice");
    }

    /// `RUST_LOG` is honoured unless `--verbose` forces debug output.
    fn logger_builder(&self) -> env_logger::Builder {
        let level = if self.verbose {
            "debug"
        } else {
            self.log_level.as_str()
        };

        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
        if self.verbose {
            builder.filter_level(LevelFilter::Debug);
        }
        builder.format_timestamp(None).format_target(false);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["wolfpack"]).unwrap();
        assert!(!cli.verbose);
        assert!(!cli.sync.pull_existing());
        assert_eq!(cli.log_level, "info");
        assert!(cli.check_config.is_none());
    }

    #[test]
    fn test_verbose_logger_enables_debug() {
        let cli = Cli::try_parse_from(["wolfpack", "-v", "--log-level", "error"]).unwrap();
        let logger = cli.logger_builder().build();
        assert!(logger.filter() >= LevelFilter::Debug);
    }

    #[test]
    fn test_pull_flags_last_one_wins() {
        let cli = Cli::try_parse_from(["wolfpack", "--pull"]).unwrap();
        assert!(cli.sync.pull_existing());

        let cli = Cli::try_parse_from(["wolfpack", "--pull", "--no-pull"]).unwrap();
        assert!(!cli.sync.pull_existing());

        let cli = Cli::try_parse_from(["wolfpack", "--no-pull", "--pull"]).unwrap();
        assert!(cli.sync.pull_existing());
    }

    #[test]
    fn test_verbose_and_check_config() {
        let cli =
            Cli::try_parse_from(["wolfpack", "-v", "--check-config", "wolfpack.json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.check_config, Some(PathBuf::from("wolfpack.json")));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["wolfpack", "--log-level", "loud"]).is_err());
    }
}
