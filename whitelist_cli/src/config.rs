// Configuration for the whitelist CLI
// JSON file first, then environment (.env honored), then command-line flags.

use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use whitelist_merkle::Address;

pub const DEFAULT_CONFIG_FILE: &str = "whitelist.config.json";
pub const DEFAULT_WHITELIST_FILE: &str = "whitelist.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CliConfig {
    #[serde(default = "default_whitelist_path")]
    pub whitelist_path: PathBuf,
    /// Drop repeated addresses before building the tree
    #[serde(default)]
    pub dedupe: bool,
    #[serde(default)]
    pub deploy: DeployConfig,
}

/// Constructor parameters of the collection contract, minus the root.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DeployConfig {
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub team_shares: Vec<u64>,
    #[serde(default)]
    pub base_uri: String,
}

fn default_whitelist_path() -> PathBuf {
    PathBuf::from(DEFAULT_WHITELIST_FILE)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            whitelist_path: default_whitelist_path(),
            dedupe: false,
            deploy: DeployConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load from `path`, or from the default file when present. An explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `WHITELIST_*` overrides through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("WHITELIST_PATH") {
            self.whitelist_path = PathBuf::from(path);
        }
        if let Some(dedupe) = lookup("WHITELIST_DEDUPE") {
            self.dedupe = matches!(dedupe.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(uri) = lookup("WHITELIST_BASE_URI") {
            self.deploy.base_uri = uri;
        }
        if let Some(team) = lookup("WHITELIST_TEAM") {
            self.deploy.team = split_list(&team);
        }
        if let Some(shares) = lookup("WHITELIST_TEAM_SHARES") {
            match split_list(&shares)
                .iter()
                .map(|s| s.parse::<u64>())
                .collect::<std::result::Result<Vec<_>, _>>()
            {
                Ok(parsed) => self.deploy.team_shares = parsed,
                Err(e) => warn!("ignoring WHITELIST_TEAM_SHARES: {}", e),
            }
        }
        self
    }

    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if !self.whitelist_path.exists() {
            validation.add_error(format!(
                "Whitelist file not found: {}",
                self.whitelist_path.display()
            ));
        }

        let deploy = &self.deploy;
        if deploy.team.len() != deploy.team_shares.len() {
            validation.add_warning(format!(
                "team has {} members but {} shares",
                deploy.team.len(),
                deploy.team_shares.len()
            ));
        }
        for member in &deploy.team {
            if Address::parse(member).is_err() {
                validation.add_warning(format!("team member is not an address: {}", member));
            }
        }

        validation
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Validation result for configuration checks
pub struct ConfigValidation {
    pub valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    fn new() -> Self {
        Self {
            valid: true,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn add_warning(&mut self, msg: String) {
        self.warnings.push(msg);
    }

    fn add_error(&mut self, msg: String) {
        self.errors.push(msg);
        self.valid = false;
    }

    pub fn print_summary(&self) {
        for w in &self.warnings {
            warn!("config: {}", w);
        }
        for e in &self.errors {
            error!("config: {}", e);
        }
    }
}
