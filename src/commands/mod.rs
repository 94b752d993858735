//! # CLI Command Implementations
//!
//! Each mode of the `wolfpack` binary lives in its own module:
//!
//! - `sync`: the default mode, which clones or updates every configured
//!   library and checks out its tag.
//! - `check_config`: a dry run that parses a config file and prints the
//!   libraries it would synchronize.
//!
//! Each module exposes an `execute` function that calls into the `wolfpack`
//! library to do the actual work.

pub mod check_config;
pub mod sync;
