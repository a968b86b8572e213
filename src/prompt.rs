// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Operator prompts.
//!
//! Thin wrappers over [`inquire`] that fold Esc and Ctrl-C into a single
//! [`PromptError::Cancelled`] variant, so workflows can treat operator
//! cancellation as one uniform exit path instead of juggling inquire's
//! error surface everywhere.

use crate::path::{self, PathError};

use inquire::{InquireError, Select, Text};
use std::{
    fmt::Display,
    io,
    path::PathBuf,
};
use tracing::warn;

/// Upper bound on re-prompts for an existing project path.
const MAX_PATH_ATTEMPTS: u32 = 3;

/// Prompt for a raw project name.
pub fn project_name() -> Result<String> {
    let name = Text::new("Project name:").prompt().map_err(cancellable)?;
    Ok(name.trim().to_string())
}

/// Prompt for the path of an existing project directory.
///
/// Input is shell-expanded before the existence check. Re-prompts on a
/// nonexistent directory, bounded at [`MAX_PATH_ATTEMPTS`] so a
/// non-interactive harness can never wedge in the loop.
///
/// # Errors
///
/// - Return [`PromptError::NoSuchDirectory`] once the attempt budget runs
///   out.
pub fn existing_project_path() -> Result<PathBuf> {
    for _ in 0..MAX_PATH_ATTEMPTS {
        let raw = Text::new("Absolute path to the project:")
            .prompt()
            .map_err(cancellable)?;
        let path = path::expand(raw.trim())?;

        if path.is_dir() {
            return Ok(path);
        }

        warn!("{} is not an existing directory", path.display());
    }

    Err(PromptError::NoSuchDirectory {
        attempts: MAX_PATH_ATTEMPTS,
    })
}

/// Prompt for the directory to clone a new project into.
///
/// Input is shell-expanded and the directory is created if missing.
///
/// # Errors
///
/// - Return [`PromptError::CreateDirectory`] if a missing destination
///   cannot be created.
pub fn clone_destination() -> Result<PathBuf> {
    let raw = Text::new("Directory to clone the project into:")
        .prompt()
        .map_err(cancellable)?;
    let path = path::expand(raw.trim())?;

    mkdirp::mkdirp(&path).map_err(|source| PromptError::CreateDirectory {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Prompt for a repository URL.
pub fn repository_url() -> Result<String> {
    let url = Text::new("Repository URL to clone:")
        .prompt()
        .map_err(cancellable)?;
    Ok(url.trim().to_string())
}

/// Present a menu of options, returning the operator's pick.
pub fn select<T: Display>(message: &str, options: Vec<T>) -> Result<T> {
    Select::new(message, options).prompt().map_err(cancellable)
}

fn cancellable(err: InquireError) -> PromptError {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            PromptError::Cancelled
        }
        err => PromptError::Inquire(err),
    }
}

/// All possible error types for operator prompting.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Operator backed out of a prompt.
    #[error("cancelled by operator")]
    Cancelled,

    /// No existing directory given within the attempt budget.
    #[error("no existing directory given after {attempts} attempts")]
    NoSuchDirectory { attempts: u32 },

    /// Clone destination could not be created.
    #[error("cannot create directory {path:?}")]
    CreateDirectory {
        path: PathBuf,
        source: io::Error,
    },

    /// Shell expansion of operator input failed.
    #[error(transparent)]
    Expand(#[from] PathError),

    /// Prompt machinery itself failed.
    #[error(transparent)]
    Inquire(#[from] InquireError),
}

/// Friendly result alias :3
pub type Result<T, E = PromptError> = std::result::Result<T, E>;
