//! Library specifications
//!
//! A [`LibrarySpec`] is one validated entry from the `libs` section of the
//! config file: the `<author>/<repo_name>` pair, the URL to clone from and
//! the tag or branch to check out.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Tag checked out when an entry does not name one.
pub const DEFAULT_TAG: &str = "master";

/// One dependency to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySpec {
    pub author: String,
    pub repo_name: String,
    pub url: String,
    pub tag: String,
}

impl LibrarySpec {
    /// Validates `name` and applies the `tag` and `url` options.
    ///
    /// The name is split on its first `/`. Other option keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedName`] unless `name` is exactly two
    /// non-empty path segments joined by one `/`. Neither segment may be
    /// `.` or `..` or contain `\`, so a library always lands directly
    /// under `<cache_root>/<author>/`.
    pub fn parse(name: &str, options: &BTreeMap<String, String>) -> Result<Self> {
        let malformed = || Error::MalformedName {
            name: name.to_string(),
        };

        let (author, repo_name) = name.split_once('/').ok_or_else(malformed)?;
        if !is_path_segment(author) || !is_path_segment(repo_name) {
            return Err(malformed());
        }

        let url = options
            .get("url")
            .cloned()
            .unwrap_or_else(|| default_url(author, repo_name));
        let tag = options
            .get("tag")
            .cloned()
            .unwrap_or_else(|| DEFAULT_TAG.to_string());

        Ok(Self {
            author: author.to_string(),
            repo_name: repo_name.to_string(),
            url,
            tag,
        })
    }

    /// The `<author>/<repo_name>` name this spec was configured under.
    pub fn name(&self) -> String {
        format!("{}/{}", self.author, self.repo_name)
    }
}

impl fmt::Display for LibrarySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.author, self.repo_name, self.tag)
    }
}

fn is_path_segment(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\'])
}

/// GitHub URL used when an entry has no `url` override.
pub fn default_url(author: &str, repo_name: &str) -> String {
    format!("https://github.com/{}/{}", author, repo_name)
}
