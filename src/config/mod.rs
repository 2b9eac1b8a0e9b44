//! Configuration management for `gh-triage`.
//!
//! Configuration is loaded from YAML files with support for:
//! - User config (~/.config/triage/config.yaml)
//! - Workspace config (.triage/config.yaml)
//! - Environment variable overrides
//! - CLI flag overrides
//!
//! Later layers win.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use triage_lib::{AuthorAssociation, AuthorFilter, BootstrapOrder, Reconciler, snapshot};

use crate::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const WORKSPACE_CONFIG: &str = ".triage/config.yaml";

/// One configuration layer as written in YAML. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub org: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub bootstrap_order: Option<BootstrapOrder>,
    pub exclude_bots: Option<bool>,
    pub exclude_associations: Option<Vec<String>>,
    pub per_page: Option<u32>,
}

impl ConfigFile {
    /// Read a layer from disk. Missing files are an empty layer.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be read, or `Yaml` if it
    /// is not a valid config document.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let layer: Self = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config layer");
        Ok(layer)
    }
}

/// Overrides taken from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub org: Option<String>,
    pub cache_dir: Option<PathBuf>,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub org: Option<String>,
    pub cache_dir: PathBuf,
    pub api_url: String,
    pub token: Option<String>,
    pub bootstrap_order: BootstrapOrder,
    pub exclude_bots: bool,
    pub exclude_associations: Vec<AuthorAssociation>,
    pub per_page: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            org: None,
            cache_dir: PathBuf::from("."),
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            bootstrap_order: BootstrapOrder::default(),
            exclude_bots: true,
            exclude_associations: AuthorAssociation::elevated(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Config {
    /// Load configuration from the standard locations and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is unreadable or invalid.
    pub fn load(cli: &CliOverrides) -> Result<Self> {
        let user = user_config_path();
        let workspace = PathBuf::from(WORKSPACE_CONFIG);
        Self::load_from(
            user.as_deref(),
            Some(workspace.as_path()),
            |key| std::env::var(key).ok(),
            cli,
        )
    }

    /// Load configuration from explicit layers.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is unreadable or a value is invalid.
    pub fn load_from<F>(
        user: Option<&Path>,
        workspace: Option<&Path>,
        env: F,
        cli: &CliOverrides,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        for path in [user, workspace].into_iter().flatten() {
            config.merge(ConfigFile::read(path)?)?;
        }

        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        config.merge(ConfigFile {
            org: non_empty("TRIAGE_ORG"),
            cache_dir: non_empty("TRIAGE_CACHE_DIR").map(PathBuf::from),
            api_url: non_empty("TRIAGE_API_URL"),
            token: non_empty("GITHUB_TOKEN"),
            bootstrap_order: non_empty("TRIAGE_BOOTSTRAP_ORDER")
                .map(|raw| raw.parse().map_err(AppError::Config))
                .transpose()?,
            ..ConfigFile::default()
        })?;

        if let Some(org) = &cli.org {
            config.org = Some(org.clone());
        }
        if let Some(dir) = &cli.cache_dir {
            config.cache_dir.clone_from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    fn merge(&mut self, layer: ConfigFile) -> Result<()> {
        if let Some(org) = layer.org {
            self.org = Some(org);
        }
        if let Some(dir) = layer.cache_dir {
            self.cache_dir = dir;
        }
        if let Some(url) = layer.api_url {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(token) = layer.token {
            self.token = Some(token);
        }
        if let Some(order) = layer.bootstrap_order {
            self.bootstrap_order = order;
        }
        if let Some(flag) = layer.exclude_bots {
            self.exclude_bots = flag;
        }
        if let Some(assocs) = layer.exclude_associations {
            self.exclude_associations = assocs.iter().filter_map(|raw| raw.parse().ok()).collect();
        }
        if let Some(per_page) = layer.per_page {
            if !(1..=100).contains(&per_page) {
                return Err(AppError::config(format!(
                    "per_page must be 1-100, got {per_page}"
                )));
            }
            self.per_page = per_page;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Some(org) = &self.org {
            if org.trim().is_empty() || org.contains(char::is_whitespace) || org.contains('/') {
                return Err(AppError::config(format!("invalid organization name '{org}'")));
            }
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(AppError::config(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }

    /// The configured organization.
    ///
    /// # Errors
    ///
    /// Returns `MissingOrg` when none is configured.
    pub fn require_org(&self) -> Result<&str> {
        self.org.as_deref().ok_or(AppError::MissingOrg)
    }

    /// Snapshot file for the configured organization.
    ///
    /// # Errors
    ///
    /// Returns `MissingOrg` when no organization is configured.
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        let org = self.require_org()?;
        let path = snapshot::path_for(&self.cache_dir, org);
        Ok(dunce::simplified(&path).to_path_buf())
    }

    #[must_use]
    pub fn author_filter(&self) -> AuthorFilter {
        AuthorFilter {
            exclude_bots: self.exclude_bots,
            excluded_associations: self.exclude_associations.clone(),
        }
    }

    #[must_use]
    pub const fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.bootstrap_order)
    }
}

/// `$XDG_CONFIG_HOME/triage/config.yaml`, else `~/.config/triage/config.yaml`.
fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|base| base.join("triage").join("config.yaml"))
}
