//! # Output Styling
//!
//! Controls whether the CLI decorates its progress and summary lines with
//! emoji, based on the `--color` flag and the terminal it writes to.
//!
//! In `auto` mode decoration is turned off when:
//! - `NO_COLOR` is set (any value, see https://no-color.org/)
//! - `CLICOLOR=0` is set
//! - `TERM=dumb` is set
//! - stdout is not a TTY, unless `CLICOLOR_FORCE` is set to a non-zero value
//!
//! ```rust,ignore
//! use wolfpack::output::{emoji, OutputConfig};
//!
//! let out = OutputConfig::from_env_and_flag("auto");
//! println!("{} Running wolfpack...", emoji(&out, "🐺", "[RUN]"));
//! ```

use std::env;

use crate::sync::{LibraryOutcome, SyncOutcome};

/// Output configuration for controlling emoji decoration.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Builds the configuration from the `--color` value (`always`, `never`
    /// or `auto`) and, in `auto` mode, the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when decoration is enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Summary entry for a synchronized library.
///
/// A failure is followed by its message, each line indented under the
/// library name, so the cause is shown whatever the log level.
pub fn outcome_line(config: &OutputConfig, outcome: &LibraryOutcome) -> String {
    match &outcome.outcome {
        SyncOutcome::Ok => format!("{} {}", emoji(config, "✅", "[OK]"), outcome.library),
        SyncOutcome::Failed(message) => {
            let mut line = format!("{} {}", emoji(config, "❌", "[FAILED]"), outcome.library);
            for detail in message.lines().filter(|l| !l.trim().is_empty()) {
                line.push_str("\n      ");
                line.push_str(detail.trim_end());
            }
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("NEVER");
        assert!(!config.use_color);
    }

    #[test]
    fn test_emoji_helper() {
        assert_eq!(emoji(&OutputConfig::with_color(), "✅", "[OK]"), "✅");
        assert_eq!(emoji(&OutputConfig::without_color(), "✅", "[OK]"), "[OK]");
    }

    #[test]
    fn test_outcome_line() {
        let ok = LibraryOutcome {
            library: "acme/widgets".to_string(),
            outcome: SyncOutcome::Ok,
        };
        let failed = LibraryOutcome {
            library: "acme/gadgets".to_string(),
            outcome: SyncOutcome::Failed("pull failed".to_string()),
        };

        let plain = OutputConfig::without_color();
        assert_eq!(outcome_line(&plain, &ok), "[OK] acme/widgets");
        assert_eq!(
            outcome_line(&plain, &failed),
            "[FAILED] acme/gadgets\n      pull failed"
        );
        assert_eq!(
            outcome_line(&OutputConfig::with_color(), &ok),
            "✅ acme/widgets"
        );
    }

    #[test]
    fn test_outcome_line_shows_command_output() {
        let failed = LibraryOutcome {
            library: "acme/widgets".to_string(),
            outcome: SyncOutcome::Failed(
                "clone failed: shell command 'git clone x' failed with code 128\n\
                 fatal: repository 'x' does not exist\n"
                    .to_string(),
            ),
        };

        assert_eq!(
            outcome_line(&OutputConfig::without_color(), &failed),
            "[FAILED] acme/widgets\n      \
             clone failed: shell command 'git clone x' failed with code 128\n      \
             fatal: repository 'x' does not exist"
        );
    }
}
