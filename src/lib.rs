//! # Wolfpack Library
//!
//! This library fetches the git dependencies listed in a `wolfpack` config
//! file into a local cache directory and checks out the requested tag of
//! each one. It backs the `wolfpack` command-line tool but can be used on its
//! own.
//!
//! ## Quick Example
//!
//! ```
//! use wolfpack::config::{load_libraries, ConfigReader, JsonConfigReader};
//!
//! let document = JsonConfigReader
//!     .parse(r#"{"libs": {"acme/widgets": {"tag": "v1.2.0"}}}"#)
//!     .unwrap();
//! let libs = load_libraries(&document).unwrap();
//!
//! assert_eq!(libs[0].author, "acme");
//! assert_eq!(libs[0].url, "https://github.com/acme/widgets");
//! assert_eq!(libs[0].tag, "v1.2.0");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: Format-pluggable readers (JSON, YAML,
//!   TOML) keyed by file extension.
//! - **Library specs (`library`)**: A validated `<author>/<repo_name>` entry
//!   with its clone URL and tag.
//! - **Command runner (`runner`)**: Runs one shell command and captures its
//!   combined output and exit code.
//! - **Synchronization (`sync`)**: Clones or updates every library in
//!   parallel, checks out its tag, and aggregates the per-library outcomes.
//! - **Cache layout (`cache`, `defaults`)**: Where working copies live.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod error;
pub mod library;
pub mod output;
pub mod runner;
pub mod sync;
