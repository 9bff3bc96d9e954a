//! Structured command lines and the executor seam.
//!
//! Commands are built as argument token vectors and handed to
//! [`std::process::Command`] without going through a shell, so values with
//! embedded spaces stay single arguments by construction. The shell-quoted
//! string form exists only for logging and diagnostics.

use std::borrow::Cow;
use std::fmt;
use std::io;

use crate::error::LaunchError;

/// A program plus its argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new<T>(program: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<T>(mut self, arg: T) -> Self
    where
        T: Into<String>,
    {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The command as a single POSIX-shell string, each token quoted as
    /// needed. Suitable for logs and error messages, not for execution.
    pub fn rendered(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True if any token contains `needle`. Used by tests to assert on
    /// command contents without caring about token order.
    pub fn contains(&self, needle: &str) -> bool {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .any(|tok| tok.contains(needle))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered())
    }
}

/// Quote a token for POSIX `sh`: plain tokens pass through, everything else
/// gets single-quoted with embedded single quotes escaped as `'\''`.
fn shell_quote(token: &str) -> Cow<'_, str> {
    let plain = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"@%+=:,./-_".contains(&b));
    if plain {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(format!("'{}'", token.replace('\'', r"'\''")))
    }
}

/// Runs a command and reports its exit status. Injectable so the
/// configure-then-build sequencing is testable without spawning processes.
pub trait CommandExecutor {
    /// Run the command to completion and return its exit code.
    fn execute(&mut self, command: &CommandLine) -> io::Result<i32>;
}

/// The real executor: spawns the process with inherited stdio so the build
/// system's own output reaches the user unmodified, and blocks until it
/// terminates.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(&mut self, command: &CommandLine) -> io::Result<i32> {
        tracing::debug!(command = %command, "running");
        let status = std::process::Command::new(command.program())
            .args(command.args())
            .status()?;
        // Killed by a signal: no code, but still a failure.
        Ok(status.code().unwrap_or(1))
    }
}

pub(crate) fn spawn_error(command: &CommandLine, source: io::Error) -> LaunchError {
    LaunchError::Spawn {
        program: command.program().to_owned(),
        source,
    }
}
