// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use sitesmith::{workflow, Outcome, ServerLayout, SpinnerRunner};

use anyhow::Result;
use clap::Parser;
use std::process::exit;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Interactive Apache virtual host provisioner for local web projects.
///
/// The surface is fully interactive; the only flags are --help and
/// --version.
#[derive(Debug, Clone, Parser)]
#[command(about, version)]
struct Cli {}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_timer(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    let _ = Cli::parse();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    let layout = ServerLayout::load()?;

    match workflow::run(&SpinnerRunner, &layout)? {
        Outcome::Provisioned { .. } | Outcome::Cancelled => {}
        Outcome::SiteDisabled { detail } => {
            warn!("site left disabled:\n{detail}");
        }
    }

    Ok(())
}
