// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Idempotent OS package installation.
//!
//! Some provisioning steps lean on tools that may not be present on a fresh
//! host: `setfacl` from the `acl` package, or the Git client. Each workflow
//! declares what it needs up front and [`ensure_installed`] makes it so,
//! refreshing the package index and installing through the system package
//! manager only when the tool's binary does not already resolve on `PATH`.
//!
//! A successful install is trusted from the package manager's exit status;
//! the probe binary is deliberately not re-checked afterwards.

use crate::syscall::{CommandRunner, SyscallError};

use std::env;
use tracing::info;

/// Ensure an OS package is present, installing it if missing.
///
/// No-op when `probe` already resolves on `PATH`. Otherwise refreshes the
/// package index and installs `package` by name, both as checked subprocess
/// calls.
///
/// # Errors
///
/// - Return [`InstallError::Refresh`] if the package index refresh fails.
/// - Return [`InstallError::Install`] if the install itself fails.
pub fn ensure_installed(runner: &impl CommandRunner, package: &str, probe: &str) -> Result<()> {
    if resolves_on_path(probe) {
        info!("{package} already installed");
        return Ok(());
    }

    runner
        .run(
            "refreshing package index",
            "apt-get",
            &["update".into()],
        )
        .map_err(InstallError::Refresh)?;

    runner
        .run(
            &format!("installing {package}"),
            "apt-get",
            &["install".into(), "-y".into(), package.into()],
        )
        .map_err(InstallError::Install)?;

    Ok(())
}

/// Check whether a binary resolves on the current `PATH`.
pub fn resolves_on_path(binary: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(binary).is_file()))
        .unwrap_or(false)
}

/// All possible error types for package installation.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// Package index refresh exited non-zero.
    #[error("package index refresh failed")]
    Refresh(#[source] SyscallError),

    /// Package install exited non-zero.
    #[error("package install failed")]
    Install(#[source] SyscallError),
}

/// Friendly result alias :3
pub type Result<T, E = InstallError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use sealed_test::prelude::*;
    use std::ffi::OsString;

    struct PanicRunner;

    impl CommandRunner for PanicRunner {
        fn run(&self, _: &str, program: &str, _: &[OsString]) -> crate::syscall::Result<String> {
            panic!("unexpected syscall to {program}");
        }
    }

    struct FailingRunner;

    impl CommandRunner for FailingRunner {
        fn run(&self, _: &str, program: &str, _: &[OsString]) -> crate::syscall::Result<String> {
            Err(SyscallError::Failed {
                program: program.into(),
                message: "boom".into(),
            })
        }
    }

    #[test]
    fn present_probe_short_circuits_install() -> anyhow::Result<()> {
        // The shell is a safe bet to exist on any host running the tests.
        ensure_installed(&PanicRunner, "dash-or-friends", "sh")?;
        Ok(())
    }

    #[sealed_test(env = [("PATH", "/nonexistent")])]
    fn missing_probe_triggers_package_manager() {
        let result = ensure_installed(&FailingRunner, "acl", "setfacl");
        assert!(matches!(result, Err(InstallError::Refresh(_))));
    }

    #[test]
    fn resolves_on_path_finds_the_shell() {
        assert!(resolves_on_path("sh"));
    }

    #[sealed_test(env = [("PATH", "/nonexistent")])]
    fn resolves_on_path_respects_path_contents() {
        assert!(!resolves_on_path("sh"));
    }
}
