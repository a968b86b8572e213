// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Server layout configuration.
//!
//! Specify the layout of the host web server that sitesmith provisions
//! against. The layout pins down where Apache keeps its available sites,
//! which directory counts as the default document root, where the system
//! hosts file lives, which group the web server runs as, and the top-level
//! domain used for local hostnames.
//!
//! # Overrides
//!
//! The stock Debian/Ubuntu layout ships as the default. Hosts that deviate
//! from it can drop a TOML override at [`LAYOUT_OVERRIDE_PATH`]; a missing
//! override file silently falls back to the defaults, while a malformed one
//! is a hard error so a typo never silently re-targets system files.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Location of the optional server layout override file.
pub const LAYOUT_OVERRIDE_PATH: &str = "/etc/sitesmith.toml";

/// Host web server layout.
///
/// Describes every location and identity on the host that provisioning
/// reads or mutates. Built once at startup and treated as immutable for the
/// rest of the run.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerLayout {
    /// Directory Apache scans for available virtual host files.
    pub sites_available: PathBuf,

    /// Default document root prefix of the web server.
    pub default_root: PathBuf,

    /// System hosts file to register local hostnames in.
    pub hosts_file: PathBuf,

    /// Group identity the web server runs as.
    pub web_group: String,

    /// Top-level domain appended to project names for local hostnames.
    pub tld: String,
}

impl Default for ServerLayout {
    fn default() -> Self {
        Self {
            sites_available: PathBuf::from("/etc/apache2/sites-available"),
            default_root: PathBuf::from("/var/www/"),
            hosts_file: PathBuf::from("/etc/hosts"),
            web_group: "www-data".into(),
            tld: "test".into(),
        }
    }
}

impl ServerLayout {
    /// Load server layout, honoring the override file when present.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::Read`] if the override file exists but cannot
    ///   be read.
    /// - Return [`ConfigError::Deserialize`] if the override file is not
    ///   valid TOML.
    pub fn load() -> Result<Self> {
        Self::load_from(LAYOUT_OVERRIDE_PATH)
    }

    /// Load server layout from a specific override file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(data) => data.parse(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Read(err)),
        }
    }

    /// Path the virtual host file for `name` would occupy.
    pub fn vhost_path(&self, name: &str) -> PathBuf {
        self.sites_available.join(format!("{name}.conf"))
    }

    /// Local hostname derived from a project name.
    pub fn hostname(&self, name: &str) -> String {
        format!("{name}.{}", self.tld)
    }

    /// URL the provisioned site becomes reachable at.
    pub fn site_url(&self, name: &str) -> String {
        format!("http://{}", self.hostname(name))
    }
}

impl FromStr for ServerLayout {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut layout: ServerLayout = toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on every path field.
        layout.sites_available = expand_field(&layout.sites_available)?;
        layout.default_root = expand_field(&layout.default_root)?;
        layout.hosts_file = expand_field(&layout.hosts_file)?;

        Ok(layout)
    }
}

impl Display for ServerLayout {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

fn expand_field(path: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::full(path.to_string_lossy().as_ref())
        .map_err(ConfigError::ShellExpansion)?
        .into_owned();
    Ok(PathBuf::from(expanded))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read layout override file.
    #[error("cannot read server layout override")]
    Read(#[source] io::Error),

    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[sealed_test(env = [("SRV", "/srv/web")])]
    fn deserialize_server_layout() -> anyhow::Result<()> {
        let result: ServerLayout = r#"
            sites_available = "$SRV/sites-available"
            default_root = "$SRV/html"
            hosts_file = "/etc/hosts"
            web_group = "apache"
            tld = "localdev"
        "#
        .parse()?;

        let expect = ServerLayout {
            sites_available: PathBuf::from("/srv/web/sites-available"),
            default_root: PathBuf::from("/srv/web/html"),
            hosts_file: PathBuf::from("/etc/hosts"),
            web_group: "apache".into(),
            tld: "localdev".into(),
        };

        assert_eq!(result, expect);

        Ok(())
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() -> anyhow::Result<()> {
        let result: ServerLayout = r#"tld = "localdev""#.parse()?;

        assert_eq!(result.tld, "localdev");
        assert_eq!(result.web_group, "www-data");
        assert_eq!(result.default_root, PathBuf::from("/var/www/"));

        Ok(())
    }

    #[test]
    fn serialize_server_layout() {
        let result = ServerLayout::default().to_string();

        let expect = indoc! {r#"
            sites_available = "/etc/apache2/sites-available"
            default_root = "/var/www/"
            hosts_file = "/etc/hosts"
            web_group = "www-data"
            tld = "test"
        "#};

        assert_eq!(result, expect);
    }

    #[test]
    fn missing_override_file_falls_back_to_defaults() -> anyhow::Result<()> {
        let result = ServerLayout::load_from("/nonexistent/sitesmith.toml")?;
        assert_eq!(result, ServerLayout::default());
        Ok(())
    }

    #[test]
    fn derived_locations_follow_project_name() {
        let layout = ServerLayout::default();
        assert_eq!(
            layout.vhost_path("blog"),
            PathBuf::from("/etc/apache2/sites-available/blog.conf")
        );
        assert_eq!(layout.hostname("blog"), "blog.test");
        assert_eq!(layout.site_url("blog"), "http://blog.test");
    }
}
