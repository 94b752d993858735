//! Default values for wolfpack configuration.
//!
//! This module provides centralized default values used by the CLI and the
//! library, ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Config file names looked up in the project directory, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "wolfpack.json",
    "wolfpack.yaml",
    "wolfpack.yml",
    "wolfpack.toml",
];

/// Name of the cache directory created inside the project directory.
pub const CACHE_DIR_NAME: &str = ".wolfpack";

/// Returns the default cache root for a project.
///
/// This can be overridden by the `--cache-dir` CLI flag or the
/// `WOLFPACK_CACHE_DIR` environment variable.
pub fn default_cache_root(project_dir: &Path) -> PathBuf {
    project_dir.join(CACHE_DIR_NAME)
}

/// Returns the first config file from [`CONFIG_FILE_NAMES`] that exists as a
/// regular file in `project_dir`.
pub fn find_config_file(project_dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.is_file())
}
