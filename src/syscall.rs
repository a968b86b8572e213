// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! External command invocation.
//!
//! Every mutation sitesmith performs on the host goes through an external
//! collaborator: the package manager, the ACL tool, the Git client, or
//! Apache's control tools. All of those calls funnel through the
//! [`CommandRunner`] trait so the workflows stay testable without a live
//! system to mutate.
//!
//! # Progress Reporting
//!
//! The default runner, [`SpinnerRunner`], wraps each call in a spinner that
//! ticks on a background thread while the foreground blocks on the child
//! process. The foreground always collects the real exit status before
//! moving on; the spinner is a cosmetic side channel and never gates
//! correctness.

use indicatif::ProgressBar;
use std::{ffi::OsString, process::Command, time::Duration};
use tracing::debug;

/// Seam for invoking external collaborators.
pub trait CommandRunner {
    /// Run `program` with `args`, reporting `message` to the operator while
    /// the command executes.
    ///
    /// # Errors
    ///
    /// - Return [`SyscallError::Spawn`] if the program cannot be started.
    /// - Return [`SyscallError::Failed`] if the program exits non-zero.
    fn run(&self, message: &str, program: &str, args: &[OsString]) -> Result<String>;
}

/// Command runner that renders a ticking spinner per invocation.
pub struct SpinnerRunner;

impl CommandRunner for SpinnerRunner {
    fn run(&self, message: &str, program: &str, args: &[OsString]) -> Result<String> {
        let spinner = ProgressBar::new_spinner().with_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = syscall_non_interactive(program, args);
        match &result {
            Ok(_) => spinner.finish_with_message(format!("{message} ... done")),
            Err(_) => spinner.abandon_with_message(format!("{message} ... failed")),
        }

        result
    }
}

/// Run an external command to completion, capturing its output.
///
/// Blocks until the child exits and folds stdout and stderr into one
/// message. A non-zero exit status is an error carrying that message.
pub fn syscall_non_interactive(
    program: &str,
    args: impl IntoIterator<Item = impl Into<OsString>>,
) -> Result<String> {
    let args = args.into_iter().map(Into::into).collect::<Vec<_>>();
    debug!("syscall: {program} {args:?}");

    let output = Command::new(program)
        .args(&args)
        .output()
        .map_err(|source| SyscallError::Spawn {
            program: program.into(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(output.stdout.as_slice()).into_owned();
    let stderr = String::from_utf8_lossy(output.stderr.as_slice()).into_owned();
    let mut message = String::new();

    if !stdout.is_empty() {
        message.push_str(format!("stdout: {stdout}").as_str());
    }

    if !stderr.is_empty() {
        message.push_str(format!("stderr: {stderr}").as_str());
    }

    // INVARIANT: Chomp trailing newlines.
    let message = message
        .strip_suffix("\r\n")
        .or(message.strip_suffix('\n'))
        .map(ToString::to_string)
        .unwrap_or(message);

    if !output.status.success() {
        return Err(SyscallError::Failed {
            program: program.into(),
            message,
        });
    }

    Ok(message)
}

/// All possible error types for external command invocation.
#[derive(Debug, thiserror::Error)]
pub enum SyscallError {
    /// Program could not be started at all.
    #[error("command {program:?} could not be started")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Program started but exited non-zero.
    #[error("command {program:?} failed:\n{message}")]
    Failed { program: String, message: String },
}

/// Friendly result alias :3
pub type Result<T, E = SyscallError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn syscall_captures_stdout() -> anyhow::Result<()> {
        let message = syscall_non_interactive("echo", ["hello"])?;
        assert_eq!(message, "stdout: hello");
        Ok(())
    }

    #[test]
    fn syscall_surfaces_non_zero_exit() {
        let result = syscall_non_interactive("false", Vec::<OsString>::new());
        assert!(matches!(result, Err(SyscallError::Failed { .. })));
    }

    #[test]
    fn syscall_surfaces_unresolvable_program() {
        let result = syscall_non_interactive("definitely-not-a-real-binary", ["--version"]);
        assert!(matches!(result, Err(SyscallError::Spawn { .. })));
    }

    #[test]
    fn spinner_runner_checks_exit_status() {
        let result = SpinnerRunner.run("probing", "true", &[]);
        assert!(result.is_ok());

        let result = SpinnerRunner.run("probing", "false", &[]);
        assert!(matches!(result, Err(SyscallError::Failed { .. })));
    }
}
