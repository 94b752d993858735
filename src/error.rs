//! # Error Handling
//!
//! This module defines the centralized error type for `wolfpack`. It uses
//! `thiserror` to build a single `Error` enum covering every anticipated
//! failure mode, each variant carrying enough context to diagnose the
//! problem without re-running in verbose mode.
//!
//! Variants fall into two groups:
//!
//! - **Fatal** errors (configuration and precondition problems) abort the
//!   whole run before any repository is touched.
//! - **Library-scoped** errors (unsupported paths, failing git commands,
//!   processes that cannot be spawned) only fail the library they belong
//!   to. The orchestrator turns them into a `SyncOutcome::Failed` value
//!   and keeps going with the other libraries.
//!
//! Use [`Error::is_fatal`] to tell the groups apart.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for wolfpack operations
#[derive(Error, Debug)]
pub enum Error {
    /// A configured library name is not of the `<author>/<repo_name>` form.
    #[error("Library name '{name}' does not have <author>/<repo_name> format")]
    MalformedName { name: String },

    /// The configuration file has no top-level `libs` key.
    #[error("No 'libs' key found in {}", path.display())]
    MissingLibsKey { path: PathBuf },

    /// No config reader is registered for the file extension.
    #[error("Failed to create reader for file type: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// The configuration file could not be read from disk.
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is syntactically or structurally invalid.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// The configuration declares a format version this build cannot read.
    #[error("Unsupported config version {version} (supported: {supported})")]
    UnsupportedVersion { version: i64, supported: i64 },

    /// `git` is missing or not runnable.
    #[error("Git is not installed! It is needed. ({message})")]
    GitUnavailable { message: String },

    /// The cache root cannot be created or is not a directory.
    #[error("Cache directory error for {}: {message}", path.display())]
    CacheRoot { path: PathBuf, message: String },

    /// A repository path contains characters the shell commands cannot
    /// carry unquoted.
    #[error("Folders with spaces are not supported yet, sorry: '{}'", path.display())]
    UnsupportedPath { path: PathBuf },

    /// A clone URL contains whitespace.
    #[error("Git url '{url}' cannot contain spaces!")]
    UnsupportedUrl { url: String },

    /// A git step exited with a non-zero status.
    #[error("{step}: shell command '{command}' failed with code {code}{}", format_output(output))]
    Command {
        step: String,
        command: String,
        code: i32,
        output: String,
    },

    /// The shell could not be started for a command.
    #[error("Failed to start process for '{command}': {message}")]
    Spawn { command: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for errors that abort the whole run.
    ///
    /// Library-scoped errors return `false`; they are reported per library
    /// once every library has finished.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::UnsupportedPath { .. }
                | Error::UnsupportedUrl { .. }
                | Error::Command { .. }
                | Error::Spawn { .. }
                | Error::Io(_)
        )
    }
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
