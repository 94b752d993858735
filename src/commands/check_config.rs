//! # Check Config Implementation
//!
//! `--check-config <PATH>` parses a config file with the same readers and
//! library validation the sync uses, then prints every library it would
//! synchronize. Nothing is cloned and git is not required.

use std::path::Path;

use anyhow::Result;

use wolfpack::config::{load_libraries, ConfigReaders};
use wolfpack::library::LibrarySpec;
use wolfpack::output::{emoji, OutputConfig};

/// Execute the check-config mode.
pub fn execute(path: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    let document = ConfigReaders::default().read_file(path)?;
    let libs = load_libraries(&document)?;

    println!(
        "{} Configuration {} is valid ({} libraries)",
        emoji(&out, "✅", "[OK]"),
        path.display(),
        libs.len()
    );
    for lib in &libs {
        println!("{}", describe(lib));
    }

    Ok(())
}

fn describe(lib: &LibrarySpec) -> String {
    format!("  {}  tag={}  url={}", lib.name(), lib.tag, lib.url)
}
