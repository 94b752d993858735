//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_config("wolfpack.json", configs::SINGLE_LIB);
//! fixture.command().arg("--check-config").arg("wolfpack.json").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::{git_available, GitRepo};
    pub use super::TestFixture;
}

/// Common configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// One library with an explicit tag.
    pub const SINGLE_LIB: &str = r#"{"libs": {"acme/widgets": {"tag": "v1.2.0"}}}"#;

    /// A config without the `libs` key.
    pub const NO_LIBS: &str = r#"{"version": 1}"#;

    /// A library name without an author.
    pub const MALFORMED_NAME: &str = r#"{"libs": {"widgets": {}}}"#;

    /// An empty library table.
    pub const EMPTY_LIBS: &str = r#"{"libs": {}}"#;

    /// The same library as `SINGLE_LIB`, as YAML.
    pub const SINGLE_LIB_YAML: &str = "libs:\n  acme/widgets:\n    tag: v1.2.0\n";
}

/// Returns `true` if a `git` binary can be run.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A temporary directory used as a project root.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a config file named `name` with the given content.
    pub fn with_config(self, name: &str, content: &str) -> Self {
        self.temp_dir
            .child(name)
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a `wolfpack` command running in this fixture's directory.
    ///
    /// Environment overrides from the calling shell are cleared so the
    /// fixture directory is the only source of configuration.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("wolfpack");
        cmd.current_dir(self.path())
            .env_remove("WOLFPACK_CONFIG")
            .env_remove("WOLFPACK_CACHE_DIR")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A throwaway git repository used as a clone source.
#[allow(dead_code)]
pub struct GitRepo {
    path: PathBuf,
}

#[allow(dead_code)]
impl GitRepo {
    /// Initializes an empty repository at `path`.
    pub fn init(path: &Path) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create repo directory");
        let repo = Self {
            path: path.to_path_buf(),
        };
        repo.git(&["init", "-q"]);
        repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `content` to `file` and commits it.
    pub fn commit_file(&self, file: &str, content: &str) {
        std::fs::write(self.path.join(file), content).expect("Failed to write file");
        self.git(&["add", file]);
        self.git(&["commit", "-q", "-m", &format!("update {}", file)]);
    }

    /// Creates a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args([
                "-c",
                "user.name=wolfpack",
                "-c",
                "user.email=wolfpack@example.com",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "tag.gpgsign=false",
            ])
            .arg("-C")
            .arg(&self.path)
            .args(args)
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::new().with_config("wolfpack.json", configs::SINGLE_LIB);
        assert!(fixture.path().join("wolfpack.json").exists());
    }

    #[test]
    fn test_configs_are_valid() {
        for config in [
            configs::SINGLE_LIB,
            configs::NO_LIBS,
            configs::MALFORMED_NAME,
            configs::EMPTY_LIBS,
        ] {
            serde_json::from_str::<serde_json::Value>(config).expect("Config should be valid JSON");
        }
    }
}
