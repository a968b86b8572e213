// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Source control checkout.

use crate::syscall::{CommandRunner, SyscallError};

use std::path::Path;

/// Clone a repository into a target directory.
///
/// Shells out to the Git client; the workflow ensures the client is
/// installed before calling this.
///
/// # Errors
///
/// - Return [`CloneError`] if the clone exits non-zero or Git cannot be
///   started.
pub fn clone(runner: &impl CommandRunner, url: &str, target: &Path) -> Result<()> {
    runner.run(
        &format!("cloning {url}"),
        "git",
        &["clone".into(), url.into(), target.into()],
    )?;

    Ok(())
}

/// Repository checkout failed.
#[derive(Debug, thiserror::Error)]
#[error("repository clone failed")]
pub struct CloneError(#[from] SyscallError);

/// Friendly result alias :3
pub type Result<T, E = CloneError> = std::result::Result<T, E>;
