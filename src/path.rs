// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Operator input arrives as raw strings that may lean on shell conventions
//! like `~` or environment variables. Everything that touches the file system
//! goes through [`expand`] first so the rest of the crate only ever sees
//! absolute-ish, fully spelled out paths.

use std::path::PathBuf;

/// Determine absolute path to user's home directory.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if home directory path cannot be
///   determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(PathError::NoWayHome)
}

/// Perform shell expansion on a raw operator-supplied path.
///
/// Expands a leading `~` to the user's home directory and any `$VAR`
/// references to their environment values. Idempotent: expanding an already
/// expanded path returns it unchanged. Does not check if the path returned
/// actually exists.
///
/// # Errors
///
/// - Return [`PathError::Expand`] if an environment variable in the input
///   cannot be resolved.
pub fn expand(input: impl AsRef<str>) -> Result<PathBuf> {
    let expanded = shellexpand::full(input.as_ref()).map_err(PathError::Expand)?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// All possible error types for path resolution.
#[derive(Clone, Debug, thiserror::Error)]
pub enum PathError {
    /// No way to determine user's home directory.
    #[error("cannot determine absolute path to user's home directory")]
    NoWayHome,

    /// Failed to perform shell expansion on operator input.
    #[error(transparent)]
    Expand(#[from] shellexpand::LookupError<std::env::VarError>),
}

/// Friendly result alias :3
pub type Result<T, E = PathError> = std::result::Result<T, E>;
