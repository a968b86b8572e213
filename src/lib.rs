// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Interactive Apache virtual host provisioner for local web projects.
//!
//! Sitesmith registers a project's document root as an Apache virtual host
//! reachable at `http://<name>.test`, optionally cloning the project from a
//! Git remote first. It is a single-operator, single-machine tool meant to
//! be run elevated; everything it creates is handed off to the host system
//! once a run completes.

pub mod activate;
pub mod config;
pub mod install;
pub mod path;
pub mod permissions;
pub mod privilege;
pub mod project;
pub mod prompt;
pub mod scm;
pub mod syscall;
pub mod vhost;
pub mod workflow;

pub use config::ServerLayout;
pub use project::{ProjectDescriptor, ProjectName};
pub use syscall::{CommandRunner, SpinnerRunner};
pub use workflow::Outcome;
