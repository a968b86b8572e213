// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Writable-directory permission policy.
//!
//! Laravel-style projects need `storage/` and `bootstrap/cache/` writable by
//! the web server. How much work that takes depends on where the project
//! lives:
//!
//! - __Inside the default document root__: ownership and ACLs are assumed to
//!   already follow the server's scheme, so only the mode bits on the two
//!   writable subdirectories are set.
//! - __Outside the default document root__: the whole tree is re-grouped to
//!   the web server's group, the two writable subdirectories get mode `775`,
//!   and the web group is granted `rwx` through both an immediate and a
//!   default ACL entry so files created later inherit the grant. The ACL
//!   tooling is installed first if missing.
//!
//! Every step is a checked subprocess call. A failure here aborts the
//! workflow before the virtual host file is written, since a project left
//! with wrong ownership is a worse outcome than a failed provisioning run.

use crate::{
    config::ServerLayout,
    install::{self, InstallError},
    project::ProjectDescriptor,
    syscall::{CommandRunner, SyscallError},
};

use std::ffi::OsString;

/// Project subdirectories the web server must be able to write.
pub const WRITABLE_SUBDIRS: [&str; 2] = ["storage", "bootstrap/cache"];

/// Apply the permission policy for a project.
///
/// # Errors
///
/// - Return [`PermissionsError::Install`] if the ACL tooling cannot be
///   installed for an external project.
/// - Return [`PermissionsError::Syscall`] if any ownership, mode, or ACL
///   step exits non-zero.
pub fn apply(
    runner: &impl CommandRunner,
    project: &ProjectDescriptor,
    layout: &ServerLayout,
) -> Result<()> {
    if !project.inside_default_root() {
        install::ensure_installed(runner, "acl", "setfacl")?;
    }

    for step in plan(project, layout) {
        runner.run(&step.message, step.program, &step.args)?;
    }

    Ok(())
}

/// One external command of the permission policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionStep {
    pub program: &'static str,
    pub args: Vec<OsString>,
    pub message: String,
}

/// Lay out the external commands the policy requires, in order.
///
/// Split from [`apply`] so the branch on default-root membership stays
/// checkable without mutating a live system.
pub fn plan(project: &ProjectDescriptor, layout: &ServerLayout) -> Vec<PermissionStep> {
    let mut steps = Vec::new();
    let external = !project.inside_default_root();

    if external {
        steps.push(PermissionStep {
            program: "chgrp",
            args: vec![
                "-R".into(),
                layout.web_group.clone().into(),
                project.path().into(),
            ],
            message: format!("re-grouping project tree to {}", layout.web_group),
        });
    }

    for subdir in WRITABLE_SUBDIRS {
        let target = project.path().join(subdir);
        steps.push(PermissionStep {
            program: "chmod",
            args: vec!["-R".into(), "775".into(), target.into()],
            message: format!("setting mode 775 on {subdir}"),
        });
    }

    if external {
        let grant = format!("g:{}:rwx", layout.web_group);
        for subdir in WRITABLE_SUBDIRS {
            let target: OsString = project.path().join(subdir).into();
            steps.push(PermissionStep {
                program: "setfacl",
                args: vec!["-R".into(), "-m".into(), grant.clone().into(), target.clone()],
                message: format!("granting {grant} on {subdir}"),
            });
            steps.push(PermissionStep {
                program: "setfacl",
                args: vec![
                    "-dR".into(),
                    "-m".into(),
                    grant.clone().into(),
                    target,
                ],
                message: format!("granting default {grant} on {subdir}"),
            });
        }
    }

    steps
}

/// All possible error types for permission application.
#[derive(Debug, thiserror::Error)]
pub enum PermissionsError {
    /// ACL tooling could not be installed.
    #[error(transparent)]
    Install(#[from] InstallError),

    /// An ownership, mode, or ACL step failed.
    #[error(transparent)]
    Syscall(#[from] SyscallError),
}

/// Friendly result alias :3
pub type Result<T, E = PermissionsError> = std::result::Result<T, E>;
