//! # Command Runner
//!
//! Runs a single shell command line and captures its combined
//! stdout/stderr together with the exit status.
//!
//! This uses the system shell and the system `git` command, which picks up
//! whatever credentials, SSH keys and `~/.gitconfig` settings the user has
//! configured. Callers are responsible for building command lines whose
//! arguments need no quoting; the runner performs no escaping.
//!
//! The [`CommandRunner`] trait is the seam the orchestrator is written
//! against, so tests can substitute a scripted implementation.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::error::{Error, Result};

/// Outcome of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit status of the process, `-1` when it was terminated by a signal.
    pub exit_code: i32,
    /// The exact command line handed to the shell, redirection included.
    pub command_line: String,
    /// Combined stdout and stderr.
    pub output: String,
}

impl CommandResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait for running shell commands - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Runs `command_line` to completion.
    ///
    /// A process that starts and exits non-zero is a successful call; only a
    /// failure to start the process at all is an `Err`.
    fn run(&self, command_line: &str) -> Result<CommandResult>;
}

/// Runs commands through the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    /// Starts `command_line` on its own thread.
    ///
    /// The returned handle can be waited on later, so several commands can
    /// be in flight at once.
    pub fn spawn(&self, command_line: &str) -> PendingCommand {
        let command_line = format!("{} 2>&1", command_line);
        let handle = thread::spawn(move || execute(command_line));
        PendingCommand { handle }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> Result<CommandResult> {
        self.spawn(command_line).wait()
    }
}

/// A command started by [`ShellRunner::spawn`] that has not been joined yet.
#[derive(Debug)]
pub struct PendingCommand {
    handle: JoinHandle<Result<CommandResult>>,
}

impl PendingCommand {
    /// Blocks until the command has exited.
    pub fn wait(self) -> Result<CommandResult> {
        self.handle.join().unwrap_or_else(|_| {
            Err(Error::Spawn {
                command: String::from("<unknown>"),
                message: "command thread panicked".to_string(),
            })
        })
    }
}

fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.args(["/C", command_line]);
        command
    } else {
        let mut command = Command::new("sh");
        command.args(["-c", command_line]);
        command
    }
}

fn execute(command_line: String) -> Result<CommandResult> {
    debug!("--> {}", command_line);

    let spawn_error = |e: std::io::Error| Error::Spawn {
        command: command_line.clone(),
        message: e.to_string(),
    };

    let mut child = shell_command(&command_line)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(spawn_error)?;

    // stderr is folded into stdout by the shell redirection, so draining
    // this one pipe cannot deadlock.
    let mut raw = Vec::new();
    let read_result = match child.stdout.take() {
        Some(mut stdout) => stdout.read_to_end(&mut raw).map(|_| ()),
        None => Ok(()),
    };

    let status = child.wait().map_err(spawn_error)?;
    read_result.map_err(|e| Error::Spawn {
        command: command_line.clone(),
        message: format!("Process read error occurred. {}", e),
    })?;

    Ok(CommandResult {
        exit_code: status.code().unwrap_or(-1),
        output: String::from_utf8_lossy(&raw).into_owned(),
        command_line,
    })
}
