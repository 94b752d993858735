//! Cache directory layout
//!
//! Every library is checked out to `<cache_root>/<author>/<repo_name>`.
//! The cache root itself is prepared once before synchronization starts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::library::LibrarySpec;

/// Makes sure `cache_root` exists and is a directory.
///
/// # Errors
///
/// Returns [`Error::CacheRoot`] if the path has a file extension, cannot be
/// created, or exists but is not a directory.
pub fn prepare_cache_root(cache_root: &Path) -> Result<()> {
    if cache_root.extension().is_some() {
        return Err(Error::CacheRoot {
            path: cache_root.to_path_buf(),
            message: "needs to be a folder".to_string(),
        });
    }

    match fs::create_dir_all(cache_root) {
        Ok(()) => debug!("Output folder (clone directory) is: {}", cache_root.display()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => {
            return Err(Error::CacheRoot {
                path: cache_root.to_path_buf(),
                message: format!("failed to create folder: {}", e),
            })
        }
    }

    if !cache_root.is_dir() {
        return Err(Error::CacheRoot {
            path: cache_root.to_path_buf(),
            message: "exists but is not a directory".to_string(),
        });
    }

    Ok(())
}

/// Path of the working copy for `spec`.
pub fn library_path(cache_root: &Path, spec: &LibrarySpec) -> PathBuf {
    cache_root.join(&spec.author).join(&spec.repo_name)
}

/// Whether [`create_library_dir`] made a new directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    Created,
    AlreadyExisted,
}

/// Creates the parents of `path`, then `path` itself.
///
/// The leaf is created with a single `create_dir` call, so exactly one
/// caller can observe [`DirState::Created`] for a given path.
pub fn create_library_dir(path: &Path) -> io::Result<DirState> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    match fs::create_dir(path) {
        Ok(()) => Ok(DirState::Created),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(DirState::AlreadyExisted),
        Err(e) => Err(e),
    }
}
