// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Effective privilege checks.
//!
//! Provisioning rewrites files under `/etc` and changes ownership of project
//! trees, so the whole program is gated on administrative rights before any
//! menu is shown.

/// Verify the process runs with administrative rights.
///
/// Checked exactly once at startup. There is no retry path; an unprivileged
/// invocation is a fatal precondition failure.
///
/// # Errors
///
/// - Return [`NotElevated`] if the effective user is not root.
pub fn ensure_elevated() -> Result<()> {
    if effective_uid() != 0 {
        return Err(NotElevated);
    }

    Ok(())
}

fn effective_uid() -> u32 {
    // SAFETY: geteuid is always successful and touches no memory.
    unsafe { libc::geteuid() }
}

/// Process lacks administrative rights.
#[derive(Clone, Debug, thiserror::Error)]
#[error("administrative rights required, re-run with sudo")]
pub struct NotElevated;

/// Friendly result alias :3
pub type Result<T, E = NotElevated> = std::result::Result<T, E>;
