// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::{LayoutFixture, RecordingRunner};

use sitesmith::{
    activate::{self, Activation},
    permissions, project,
    project::{ProjectError, ProjectName},
    vhost, ProjectDescriptor,
};

use anyhow::Result;
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn provisions_project_inside_default_root() -> Result<()> {
    let fixture = LayoutFixture::new()?;
    let layout = &fixture.layout;
    let runner = RecordingRunner::new();

    let path = fixture.seed_project(layout.default_root.join("blog"))?;
    let name = ProjectName::new("blog", layout)?;
    let project = ProjectDescriptor::new(name, path, layout);
    assert!(project.inside_default_root());

    permissions::apply(&runner, &project, layout)?;
    let text = vhost::render(&project, layout)?;
    vhost::write(&project, layout, &text)?;
    let activation = activate::activate(&runner, &project, layout)?;

    // Inside the default root no ownership or ACL step runs, only the two
    // mode changes, then the activation protocol.
    assert_eq!(
        runner.programs(),
        vec!["chmod", "chmod", "apachectl", "a2ensite", "systemctl"]
    );

    let written = fs::read_to_string(layout.vhost_path("blog"))?;
    assert!(written.contains("ServerName blog.test"));
    assert!(written.contains(&format!(
        "DocumentRoot {}/public",
        layout.default_root.join("blog").display()
    )));

    assert_eq!(
        fixture.hosts_contents()?,
        "127.0.0.1   localhost\n127.0.0.1   blog.test\n"
    );

    assert_eq!(
        activation,
        Activation::Activated {
            url: "http://blog.test".into()
        }
    );

    Ok(())
}

#[test]
fn external_project_gets_ownership_and_acl_treatment() -> Result<()> {
    let fixture = LayoutFixture::new()?;
    let layout = &fixture.layout;
    let runner = RecordingRunner::new();

    let path = fixture.seed_project(fixture.root_path().join("elsewhere/blog"))?;
    let name = ProjectName::new("blog", layout)?;
    let project = ProjectDescriptor::new(name, path, layout);
    assert!(!project.inside_default_root());

    permissions::apply(&runner, &project, layout)?;

    // Whether the ACL tooling is already present on the test host decides
    // if apt-get shows up first, so assert on everything after it.
    let programs: Vec<_> = runner
        .programs()
        .into_iter()
        .filter(|program| program != "apt-get")
        .collect();
    assert_eq!(
        programs,
        vec!["chgrp", "chmod", "chmod", "setfacl", "setfacl", "setfacl", "setfacl"]
    );
    assert_eq!(
        runner.calls_to("chgrp")[0][1],
        std::ffi::OsString::from("www-data")
    );

    Ok(())
}

#[test]
fn preexisting_vhost_aborts_before_any_mutation() -> Result<()> {
    let fixture = LayoutFixture::new()?;
    let layout = &fixture.layout;

    fs::write(layout.vhost_path("blog"), "already provisioned\n")?;
    let hosts_before = fixture.hosts_contents()?;

    let result = ProjectName::new("blog", layout);
    assert!(matches!(result, Err(ProjectError::VhostCollision { .. })));

    // Validation failed before anything was touched.
    assert_eq!(fs::read_to_string(layout.vhost_path("blog"))?, "already provisioned\n");
    assert_eq!(fixture.hosts_contents()?, hosts_before);

    Ok(())
}

#[test]
fn preexisting_hostname_mapping_aborts() -> Result<()> {
    let fixture = LayoutFixture::new()?;
    let layout = &fixture.layout;

    fs::write(&layout.hosts_file, "127.0.0.1   localhost\n127.0.0.1   blog.test\n")?;

    let result = ProjectName::new("blog", layout);
    assert!(matches!(result, Err(ProjectError::HostnameCollision { .. })));

    Ok(())
}

#[test]
fn empty_repository_url_aborts_before_clone() {
    let result = project::validate_repository_url("");
    assert!(matches!(result, Err(ProjectError::EmptyRepositoryUrl)));
}

#[test]
fn rejected_configuration_leaves_site_disabled() -> Result<()> {
    let fixture = LayoutFixture::new()?;
    let layout = &fixture.layout;
    let runner = RecordingRunner::failing_on(["apachectl"]);

    let path = fixture.seed_project(layout.default_root.join("blog"))?;
    let name = ProjectName::new("blog", layout)?;
    let project = ProjectDescriptor::new(name, path, layout);

    let text = vhost::render(&project, layout)?;
    vhost::write(&project, layout, &text)?;
    let hosts_before = fixture.hosts_contents()?;

    let activation = activate::activate(&runner, &project, layout)?;

    assert!(matches!(activation, Activation::ConfigRejected { .. }));

    // The site was never enabled, the hosts file never touched, apache
    // never reloaded. The written file stays on disk.
    assert_eq!(runner.programs(), vec!["apachectl"]);
    assert_eq!(fixture.hosts_contents()?, hosts_before);
    assert_eq!(fs::read_to_string(layout.vhost_path("blog"))?, text);

    Ok(())
}
