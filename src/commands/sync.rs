//! Sync command implementation
//!
//! The default mode of `wolfpack`:
//! 1. Locate and parse the config file
//! 2. Check that git is available
//! 3. Prepare the cache directory
//! 4. Synchronize every library in parallel
//! 5. Print a per-library summary

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;

use wolfpack::cache::prepare_cache_root;
use wolfpack::config;
use wolfpack::defaults::{default_cache_root, find_config_file, CONFIG_FILE_NAMES};
use wolfpack::output::{emoji, outcome_line, OutputConfig};
use wolfpack::sync::Synchronizer;

/// Arguments for synchronizing libraries
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to config file (defaults to wolfpack.json, .yaml, .yml or .toml
    /// in the current directory)
    #[arg(short, long, value_name = "PATH", env = "WOLFPACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory libraries are cloned into (defaults to ./.wolfpack)
    #[arg(long, value_name = "PATH", env = "WOLFPACK_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Pull/update existing repos
    #[arg(long, overrides_with = "no_pull")]
    pub pull: bool,

    /// Leave existing repos as they are (default)
    #[arg(long, overrides_with = "pull")]
    pub no_pull: bool,
}

impl SyncArgs {
    pub fn pull_existing(&self) -> bool {
        self.pull && !self.no_pull
    }
}

/// Execute the sync command
pub fn execute(args: SyncArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    println!("{} Running wolfpack...", emoji(&out, "🐺", "[RUN]"));

    let project_dir = std::env::current_dir().context("Failed to get current directory")?;

    let config_path = match args.config.clone().or_else(|| find_config_file(&project_dir)) {
        Some(path) => path,
        None => {
            println!(
                "No wolfpack config file found ({}). Nothing to do.",
                CONFIG_FILE_NAMES.join(", ")
            );
            return Ok(());
        }
    };
    let cache_root = args
        .cache_dir
        .clone()
        .unwrap_or_else(|| default_cache_root(&project_dir));

    debug!("Input folder is: {}", project_dir.display());
    debug!("Config file is: {}", config_path.display());
    debug!("Output folder is: {}", cache_root.display());

    let libs = config::from_file(&config_path)?;
    if libs.is_empty() {
        println!("No libraries configured. Nothing to do.");
        return Ok(());
    }
    for lib in &libs {
        debug!("Will process library {} with tag '{}'...", lib.name(), lib.tag);
    }

    let synchronizer = Synchronizer::new(&cache_root).pull_existing(args.pull_existing());
    synchronizer.ensure_git_available()?;
    prepare_cache_root(&cache_root)?;

    let result = synchronizer.sync_all(&libs);

    println!();
    for outcome in result.outcomes() {
        println!("  {}", outcome_line(&out, outcome));
    }
    println!();

    let failed = result.failures().count();
    if failed > 0 {
        anyhow::bail!(
            "{} of {} libraries failed to synchronize",
            failed,
            result.outcomes().len()
        );
    }

    println!(
        "{} Synchronized {} libraries in {:.2}s",
        emoji(&out, "✅", "[OK]"),
        libs.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
