// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Top-level provisioning workflows.
//!
//! Two workflows share the same provisioning tail. The existing-project
//! workflow points sitesmith at a directory already on disk; the clone
//! workflow fetches the project from a Git remote first. Both end in the
//! same sequence: permission policy, virtual host generation, site
//! activation.
//!
//! Operator input is gathered and validated up front into an immutable
//! [`ProjectDescriptor`] that flows through the provisioning steps. All
//! validation and collision failures abort before the first mutation;
//! cancelling at any prompt unwinds cleanly with nothing touched.

use crate::{
    activate::{self, ActivateError, Activation},
    config::ServerLayout,
    install::{self, InstallError},
    permissions::{self, PermissionsError},
    privilege::{self, NotElevated},
    project::{self, ProjectDescriptor, ProjectError, ProjectName},
    prompt::{self, PromptError},
    scm::{self, CloneError},
    syscall::CommandRunner,
    vhost::{self, VhostError},
};

use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::info;

/// How a full run of the program ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Project provisioned and reachable.
    Provisioned { url: String },

    /// Virtual host written, but Apache rejected the aggregate
    /// configuration so the site was left disabled.
    SiteDisabled { detail: String },

    /// Operator cancelled at a menu or prompt.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProjectKind {
    Laravel,
}

impl Display for ProjectKind {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Laravel => fmt.write_str("Laravel"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ExistingProject,
    CloneNewProject,
}

impl Display for Action {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ExistingProject => fmt.write_str("Configure an existing project"),
            Self::CloneNewProject => fmt.write_str("Clone a new project from a repository"),
        }
    }
}

/// Run the interactive provisioning session end to end.
///
/// # Errors
///
/// Any validation, collision, installation, clone, permission, or
/// activation failure surfaces here; cancellation and a rejected Apache
/// configuration are ordinary [`Outcome`] values, not errors.
pub fn run(runner: &impl CommandRunner, layout: &ServerLayout) -> Result<Outcome> {
    privilege::ensure_elevated()?;

    let Some(_kind) = choose(prompt::select("Project type:", vec![ProjectKind::Laravel]))? else {
        return Ok(Outcome::Cancelled);
    };

    let Some(action) = choose(prompt::select(
        "What would you like to do?",
        vec![Action::ExistingProject, Action::CloneNewProject],
    ))?
    else {
        return Ok(Outcome::Cancelled);
    };

    let project = match action {
        Action::ExistingProject => describe_existing(layout)?,
        Action::CloneNewProject => clone_new(runner, layout)?,
    };

    match project {
        Some(project) => provision(runner, &project, layout),
        None => Ok(Outcome::Cancelled),
    }
}

fn describe_existing(layout: &ServerLayout) -> Result<Option<ProjectDescriptor>> {
    let Some(raw_name) = choose(prompt::project_name())? else {
        return Ok(None);
    };
    let name = ProjectName::new(raw_name, layout)?;

    let Some(path) = choose(prompt::existing_project_path())? else {
        return Ok(None);
    };

    Ok(Some(ProjectDescriptor::new(name, path, layout)))
}

fn clone_new(
    runner: &impl CommandRunner,
    layout: &ServerLayout,
) -> Result<Option<ProjectDescriptor>> {
    install::ensure_installed(runner, "git", "git")?;

    let Some(raw_url) = choose(prompt::repository_url())? else {
        return Ok(None);
    };
    let url = project::validate_repository_url(raw_url)?;

    let Some(destination) = choose(prompt::clone_destination())? else {
        return Ok(None);
    };

    let Some(raw_name) = choose(prompt::project_name())? else {
        return Ok(None);
    };
    let name = ProjectName::new(raw_name, layout)?;

    let target = destination.join(name.as_str());
    scm::clone(runner, &url, &target)?;

    Ok(Some(ProjectDescriptor::new(name, target, layout)))
}

fn provision(
    runner: &impl CommandRunner,
    project: &ProjectDescriptor,
    layout: &ServerLayout,
) -> Result<Outcome> {
    permissions::apply(runner, project, layout)?;

    let text = vhost::render(project, layout)?;
    vhost::write(project, layout, &text)?;

    match activate::activate(runner, project, layout)? {
        Activation::Activated { url } => {
            info!("provisioned {} at {url}", project.name());
            Ok(Outcome::Provisioned { url })
        }
        Activation::ConfigRejected { detail } => Ok(Outcome::SiteDisabled { detail }),
    }
}

// Cancellation unwinds as Ok(None) so every caller keeps a straight-line
// happy path.
fn choose<T>(result: prompt::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(PromptError::Cancelled) => {
            info!("cancelled");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// All possible error types for a provisioning run.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Privilege(#[from] NotElevated),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Clone(#[from] CloneError),

    #[error(transparent)]
    Permissions(#[from] PermissionsError),

    #[error(transparent)]
    Vhost(#[from] VhostError),

    #[error(transparent)]
    Activate(#[from] ActivateError),
}

/// Friendly result alias :3
pub type Result<T, E = WorkflowError> = std::result::Result<T, E>;
