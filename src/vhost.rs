// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Virtual host file generation.
//!
//! Renders the Apache `<VirtualHost>` block for a project and places it
//! under sites-available. Rendering is a pure function of the project name
//! and path, so identical inputs always produce byte-identical output.
//!
//! The file is written with create-new semantics. Name collisions are
//! caught during validation, well before this point; create-new just keeps
//! a racing second invocation from clobbering a file that appeared in the
//! meantime.

use crate::{config::ServerLayout, project::ProjectDescriptor};

use minijinja::{context, Environment};
use std::{fs::OpenOptions, io, io::Write, path::PathBuf};
use tracing::info;

const VHOST_TEMPLATE: &str = "\
<VirtualHost *:80>
    ServerAdmin webmaster@localhost
    ServerName {{ server_name }}
    DocumentRoot {{ document_root }}

    <Directory {{ document_root }}>
        Options Indexes FollowSymLinks
        AllowOverride All
        Require all granted
    </Directory>

    ErrorLog ${APACHE_LOG_DIR}/error.log
    CustomLog ${APACHE_LOG_DIR}/access.log combined
</VirtualHost>
";

/// Render the virtual host block for a project.
///
/// # Errors
///
/// - Return [`VhostError::Render`] if template expansion fails.
pub fn render(project: &ProjectDescriptor, layout: &ServerLayout) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);

    let text = env
        .render_str(
            VHOST_TEMPLATE,
            context! {
                server_name => layout.hostname(project.name().as_str()),
                document_root => project.document_root().to_string_lossy(),
            },
        )
        .map_err(VhostError::Render)?;

    Ok(text)
}

/// Write rendered virtual host text under sites-available.
///
/// # Errors
///
/// - Return [`VhostError::AlreadyExists`] if a file for the name appeared
///   since validation.
/// - Return [`VhostError::Write`] if the file cannot be created or written.
pub fn write(project: &ProjectDescriptor, layout: &ServerLayout, text: &str) -> Result<PathBuf> {
    let path = layout.vhost_path(project.name().as_str());

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => VhostError::AlreadyExists { path: path.clone() },
            _ => VhostError::Write {
                path: path.clone(),
                source,
            },
        })?;

    file.write_all(text.as_bytes())
        .map_err(|source| VhostError::Write {
            path: path.clone(),
            source,
        })?;

    info!("wrote virtual host {}", path.display());

    Ok(path)
}

/// All possible error types for virtual host generation.
#[derive(Debug, thiserror::Error)]
pub enum VhostError {
    /// Template expansion failed.
    #[error(transparent)]
    Render(#[from] minijinja::Error),

    /// Virtual host file appeared between validation and write.
    #[error("virtual host {path:?} already exists")]
    AlreadyExists { path: PathBuf },

    /// Virtual host file could not be created or written.
    #[error("cannot write virtual host {path:?}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Friendly result alias :3
pub type Result<T, E = VhostError> = std::result::Result<T, E>;
