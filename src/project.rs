// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Project domain representation.
//!
//! A __project__ is a web application living somewhere on the host file
//! system that the operator wants served as an Apache virtual host under a
//! local hostname. Sitesmith assumes the conventional Laravel-style layout:
//! the web-visible content sits in `public/`, while `storage/` and
//! `bootstrap/cache/` must stay writable by the web server.
//!
//! # Descriptor Lifecycle
//!
//! A [`ProjectDescriptor`] is built exactly once per workflow from validated
//! operator input and then passed through the provisioning steps immutably.
//! Nothing downstream re-reads operator input or ambient state; if it is not
//! in the descriptor or the [`ServerLayout`], a step cannot depend on it.
//!
//! # Validation Rules
//!
//! The project name doubles as the stem of the virtual host file and of the
//! local hostname, so it must be non-empty, contain no whitespace, and
//! collide with neither an existing `<name>.conf` under sites-available nor
//! an existing `<name>.<tld>` hosts file entry. Collisions are fatal aborts
//! caught before any mutation, never retried.

use crate::config::ServerLayout;

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io,
    path::{Path, PathBuf},
};

/// Validated project name.
///
/// Construction is the only way to obtain one, so holding a [`ProjectName`]
/// is proof the syntactic and collision checks already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a raw operator-supplied project name.
    ///
    /// # Errors
    ///
    /// - Return [`ProjectError::EmptyName`] if the name is empty.
    /// - Return [`ProjectError::WhitespaceName`] if the name contains any
    ///   whitespace character.
    /// - Return [`ProjectError::VhostCollision`] if a virtual host file for
    ///   the name already exists.
    /// - Return [`ProjectError::HostnameCollision`] if the hosts file
    ///   already maps the derived hostname.
    pub fn new(name: impl Into<String>, layout: &ServerLayout) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(ProjectError::EmptyName);
        }

        if name.chars().any(char::is_whitespace) {
            return Err(ProjectError::WhitespaceName { name });
        }

        let vhost_path = layout.vhost_path(&name);
        if vhost_path.exists() {
            return Err(ProjectError::VhostCollision { path: vhost_path });
        }

        let hostname = layout.hostname(&name);
        if hosts_file_contains(&layout.hosts_file, &hostname)? {
            return Err(ProjectError::HostnameCollision { hostname });
        }

        Ok(Self(name))
    }

    /// Treat project name as string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ProjectName {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_str())
    }
}

/// Immutable description of the project being provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    name: ProjectName,
    path: PathBuf,
    inside_default_root: bool,
}

impl ProjectDescriptor {
    /// Construct new project descriptor.
    ///
    /// Whether the project counts as living inside the web server's default
    /// document root is decided here, once, by path prefix.
    pub fn new(name: ProjectName, path: impl Into<PathBuf>, layout: &ServerLayout) -> Self {
        let path = path.into();
        let inside_default_root = path.starts_with(&layout.default_root);

        Self {
            name,
            path,
            inside_default_root,
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Directory Apache serves as the web-visible root.
    pub fn document_root(&self) -> PathBuf {
        self.path.join("public")
    }

    /// Whether the project lives under the server's default document root.
    pub fn inside_default_root(&self) -> bool {
        self.inside_default_root
    }
}

/// Validate a raw operator-supplied repository URL.
///
/// Only emptiness is rejected; no structural validation is attempted, the
/// Git client is the authority on what it can clone.
///
/// # Errors
///
/// - Return [`ProjectError::EmptyRepositoryUrl`] if the URL is blank.
pub fn validate_repository_url(url: impl Into<String>) -> Result<String> {
    let url = url.into();

    if url.trim().is_empty() {
        return Err(ProjectError::EmptyRepositoryUrl);
    }

    Ok(url)
}

fn hosts_file_contains(hosts_file: &Path, hostname: &str) -> Result<bool> {
    let contents = match std::fs::read_to_string(hosts_file) {
        Ok(contents) => contents,
        // INVARIANT: An absent hosts file cannot contain a mapping.
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => {
            return Err(ProjectError::HostsFile {
                path: hosts_file.to_path_buf(),
                source: err,
            })
        }
    };

    Ok(contents
        .lines()
        .any(|line| line.split_whitespace().any(|token| token == hostname)))
}

/// All possible error types for project validation.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project name was empty.
    #[error("project name cannot be empty")]
    EmptyName,

    /// Project name contained whitespace.
    #[error("project name {name:?} cannot contain whitespace")]
    WhitespaceName { name: String },

    /// Virtual host file for the name already exists.
    #[error("virtual host {path:?} already exists")]
    VhostCollision { path: PathBuf },

    /// Hosts file already maps the derived hostname.
    #[error("hostname {hostname:?} already registered in hosts file")]
    HostnameCollision { hostname: String },

    /// Repository URL was blank.
    #[error("repository URL cannot be empty")]
    EmptyRepositoryUrl,

    /// Hosts file exists but could not be read.
    #[error("cannot read hosts file {path:?}")]
    HostsFile {
        path: PathBuf,
        source: io::Error,
    },
}

/// Friendly result alias :3
pub type Result<T, E = ProjectError> = std::result::Result<T, E>;
