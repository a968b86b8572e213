// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Site activation protocol.
//!
//! Takes a freshly written virtual host file through Apache's activation
//! steps, each one gating the next:
//!
//! 1. `apachectl configtest` checks the aggregate server configuration,
//!    every enabled site included, not just the new one. Rejection is the
//!    one soft failure in the program: the new file stays on disk but
//!    disabled, the operator is told, and nothing else is touched.
//! 2. `a2ensite` enables the site.
//! 3. A `127.0.0.1   <name>.<tld>` line is appended to the hosts file.
//! 4. `systemctl reload apache2` picks the site up.
//!
//! As a state machine: Created → Validated (fail → Disabled, terminal) →
//! Enabled → HostMapped → Reloaded.

use crate::{
    config::ServerLayout,
    project::ProjectDescriptor,
    syscall::{CommandRunner, SyscallError},
};

use std::{fs::OpenOptions, io, io::Write, path::Path, path::PathBuf};
use tracing::{info, warn};

/// Terminal state of an activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Site enabled, hostname mapped, server reloaded.
    Activated { url: String },

    /// Apache rejected the aggregate configuration. The virtual host file
    /// remains written but the site was never enabled.
    ConfigRejected { detail: String },
}

/// Run the activation protocol for a provisioned project.
///
/// # Errors
///
/// - Return [`ActivateError::Syscall`] if enabling or reloading fails after
///   a successful configuration check.
/// - Return [`ActivateError::HostsFile`] if the hostname mapping cannot be
///   appended.
pub fn activate(
    runner: &impl CommandRunner,
    project: &ProjectDescriptor,
    layout: &ServerLayout,
) -> Result<Activation> {
    let name = project.name().as_str();

    match runner.run("validating apache configuration", "apachectl", &["configtest".into()]) {
        Ok(_) => {}
        Err(SyscallError::Failed { message, .. }) => {
            warn!("apache rejected the configuration, site left disabled");
            return Ok(Activation::ConfigRejected { detail: message });
        }
        Err(err) => return Err(err.into()),
    }

    runner.run(
        &format!("enabling site {name}"),
        "a2ensite",
        &[format!("{name}.conf").into()],
    )?;

    append_hosts_entry(&layout.hosts_file, &layout.hostname(name))?;

    runner.run(
        "reloading apache",
        "systemctl",
        &["reload".into(), "apache2".into()],
    )?;

    let url = layout.site_url(name);
    info!("site available at {url}");

    Ok(Activation::Activated { url })
}

/// Append a loopback hostname mapping to the hosts file.
pub fn append_hosts_entry(hosts_file: &Path, hostname: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(hosts_file)
        .map_err(|source| ActivateError::HostsFile {
            path: hosts_file.to_path_buf(),
            source,
        })?;

    writeln!(file, "127.0.0.1   {hostname}").map_err(|source| ActivateError::HostsFile {
        path: hosts_file.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// All possible error types for site activation.
#[derive(Debug, thiserror::Error)]
pub enum ActivateError {
    /// Enable or reload step failed after a successful configuration check.
    #[error(transparent)]
    Syscall(#[from] SyscallError),

    /// Hostname mapping could not be appended.
    #[error("cannot append hostname mapping to {path:?}")]
    HostsFile {
        path: PathBuf,
        source: io::Error,
    },
}

/// Friendly result alias :3
pub type Result<T, E = ActivateError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn hosts_entry_uses_loopback_and_three_spaces() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let hosts = temp.path().join("hosts");
        fs::write(&hosts, "127.0.0.1   localhost\n")?;

        append_hosts_entry(&hosts, "blog.test")?;

        assert_eq!(
            fs::read_to_string(&hosts)?,
            "127.0.0.1   localhost\n127.0.0.1   blog.test\n"
        );

        Ok(())
    }

    #[test]
    fn hosts_entry_creates_missing_file() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let hosts = temp.path().join("hosts");

        append_hosts_entry(&hosts, "blog.test")?;

        assert_eq!(fs::read_to_string(&hosts)?, "127.0.0.1   blog.test\n");

        Ok(())
    }
}
