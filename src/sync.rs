//! # Repository Synchronization
//!
//! The `Synchronizer` brings every configured library's working copy under
//! the cache root to the requested tag. Each library goes through the same
//! sequence of git commands:
//!
//! 1.  Refuse repository paths containing a space.
//! 2.  Create `<cache_root>/<author>/<repo_name>`. If the directory is new,
//!     shallow-clone the repository into it and fetch its tags. If it
//!     already existed, optionally pull the latest changes.
//! 3.  Check out the tag. If that fails, fetch tags once more and retry the
//!     checkout a single time.
//!
//! All libraries run in parallel on a dedicated rayon pool with one worker
//! per library. A failing library never stops the others: its error is
//! turned into a [`SyncOutcome::Failed`] and reported once every library has
//! finished.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::cache::{create_library_dir, library_path, DirState};
use crate::error::{Error, Result};
use crate::library::LibrarySpec;
use crate::runner::{CommandResult, CommandRunner, ShellRunner};

/// Result of synchronizing one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Ok,
    Failed(String),
}

impl SyncOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, SyncOutcome::Ok)
    }
}

/// A library name paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryOutcome {
    pub library: String,
    pub outcome: SyncOutcome,
}

/// Aggregate result of a [`Synchronizer::sync_all`] run.
///
/// Outcomes are kept in the same order as the specs that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    outcomes: Vec<LibraryOutcome>,
}

impl ProcessResult {
    pub fn outcomes(&self) -> &[LibraryOutcome] {
        &self.outcomes
    }

    /// `true` iff every library synchronized successfully.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.outcome.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &LibraryOutcome> {
        self.outcomes.iter().filter(|o| !o.outcome.is_ok())
    }

    /// Process exit code: `0` on success, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Checks that `git` can be run at all.
pub fn ensure_git_available(runner: &dyn CommandRunner) -> Result<()> {
    let result = runner
        .run("git --version")
        .map_err(|e| Error::GitUnavailable {
            message: e.to_string(),
        })?;

    if !result.succeeded() {
        return Err(Error::GitUnavailable {
            message: format!(
                "'{}' exited with code {}: {}",
                result.command_line,
                result.exit_code,
                result.output.trim_end()
            ),
        });
    }

    debug!("{}", result.output.trim_end());
    Ok(())
}

/// Synchronizes library working copies under a cache root.
pub struct Synchronizer {
    runner: Box<dyn CommandRunner>,
    cache_root: PathBuf,
    pull_existing: bool,
}

impl Synchronizer {
    /// Creates a synchronizer that runs git through the system shell.
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self::with_runner(Box::new(ShellRunner::new()), cache_root)
    }

    /// Creates a synchronizer with a custom `CommandRunner`.
    pub fn with_runner(runner: Box<dyn CommandRunner>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            cache_root: cache_root.into(),
            pull_existing: false,
        }
    }

    /// Whether libraries that are already cloned get pulled before checkout.
    pub fn pull_existing(mut self, pull: bool) -> Self {
        self.pull_existing = pull;
        self
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    pub fn ensure_git_available(&self) -> Result<()> {
        ensure_git_available(self.runner.as_ref())
    }

    /// Synchronizes every spec in parallel and waits for all of them.
    pub fn sync_all(&self, specs: &[LibrarySpec]) -> ProcessResult {
        let sync = |spec: &LibrarySpec| LibraryOutcome {
            library: spec.name(),
            outcome: match self.sync_library(spec) {
                Ok(()) => SyncOutcome::Ok,
                Err(e) => SyncOutcome::Failed(e.to_string()),
            },
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(specs.len().max(1))
            .thread_name(|i| format!("wolfpack-sync-{}", i))
            .build();

        let outcomes: Vec<LibraryOutcome> = match pool {
            Ok(pool) => pool.install(|| specs.par_iter().map(sync).collect()),
            Err(e) => {
                warn!("Failed to build sync thread pool, using the global one: {}", e);
                specs.par_iter().map(sync).collect()
            }
        };

        for failure in outcomes.iter().filter(|o| !o.outcome.is_ok()) {
            if let SyncOutcome::Failed(message) = &failure.outcome {
                error!("Task for {} failed with error: {}", failure.library, message);
            }
        }

        ProcessResult { outcomes }
    }

    /// Runs the full sequence for one library.
    pub fn sync_library(&self, spec: &LibrarySpec) -> Result<()> {
        let repo_path = library_path(&self.cache_root, spec);
        if repo_path.to_string_lossy().contains(' ') {
            return Err(Error::UnsupportedPath { path: repo_path });
        }

        match create_library_dir(&repo_path)? {
            DirState::Created => {
                debug!("Created directory {}", repo_path.display());
                if let Err(e) = self.clone_library(spec, &repo_path) {
                    // Leave no half-cloned directory behind so the next run
                    // starts from scratch.
                    if let Err(cleanup) = fs::remove_dir_all(&repo_path) {
                        warn!(
                            "Failed to remove {} after clone failure: {}",
                            repo_path.display(),
                            cleanup
                        );
                    }
                    return Err(e);
                }
            }
            DirState::AlreadyExisted if self.pull_existing => {
                self.pull_library(spec, &repo_path)?;
            }
            DirState::AlreadyExisted => {
                debug!("{} already present, not pulling", spec.name());
            }
        }

        self.checkout(spec, &repo_path)
    }

    fn clone_library(&self, spec: &LibrarySpec, repo_path: &Path) -> Result<()> {
        info!("Cloning repo {}...", spec.name());

        if spec.url.chars().any(char::is_whitespace) {
            return Err(Error::UnsupportedUrl {
                url: spec.url.clone(),
            });
        }

        let path = repo_path.display();
        self.run_step(
            &format!("git clone {} {} --depth 1 --recursive", spec.url, path),
            || format!("clone failed for '{}' into '{}'", spec.url, path),
        )?;
        self.run_step(&format!("git -C {} fetch --tags", path), || {
            format!("tag fetch failed for {}", spec.name())
        })
    }

    fn pull_library(&self, spec: &LibrarySpec, repo_path: &Path) -> Result<()> {
        info!("Pulling repo {}...", spec.name());

        let path = repo_path.display();
        self.run_step(&format!("git -C {} config pull.rebase false", path), || {
            format!("config failed for {}", spec.name())
        })?;
        self.run_step(&format!("git -C {} pull", path), || {
            format!("pull failed for {}", spec.name())
        })
    }

    fn checkout(&self, spec: &LibrarySpec, repo_path: &Path) -> Result<()> {
        let path = repo_path.display();
        let checkout = format!("git -C {} checkout {}", path, spec.tag);

        let first = self.run(&checkout)?;
        if first.succeeded() {
            return Ok(());
        }

        warn!(
            "Checkout of '{}' in {} failed with code {}, fetching tags and retrying",
            spec.tag,
            spec.name(),
            first.exit_code
        );
        self.run_step(&format!("git -C {} fetch --tags", path), || {
            format!("tag refetch failed for {}", spec.name())
        })?;
        self.run_step(&checkout, || {
            format!(
                "checkout failed for branch/tag {} in repo {}/{}",
                spec.tag, spec.author, spec.repo_name
            )
        })
    }

    fn run(&self, command_line: &str) -> Result<CommandResult> {
        let result = self.runner.run(command_line)?;
        if result.succeeded() && !result.output.trim().is_empty() {
            debug!("{}", result.output.trim_end());
        }
        Ok(result)
    }

    /// Runs `command_line` and turns a non-zero exit into `Error::Command`
    /// labelled by `step`.
    fn run_step(&self, command_line: &str, step: impl FnOnce() -> String) -> Result<()> {
        let result = self.run(command_line)?;
        if result.succeeded() {
            return Ok(());
        }
        Err(Error::Command {
            step: step(),
            command: result.command_line,
            code: result.exit_code,
            output: result.output,
        })
    }
}
