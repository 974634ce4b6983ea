use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use whitelist_merkle::{Address, H256};

use crate::config::DeployConfig;

/// Constructor arguments for the collection contract:
/// `(team, teamShares, merkleRoot, baseURI)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployArgs {
    pub team: Vec<Address>,
    pub team_shares: Vec<u64>,
    pub merkle_root: H256,
    pub base_uri: String,
}

impl DeployArgs {
    pub fn from_config(config: &DeployConfig, merkle_root: H256) -> Result<Self> {
        if config.team.is_empty() {
            bail!("No team members configured");
        }
        if config.team.len() != config.team_shares.len() {
            bail!(
                "Team has {} members but {} shares",
                config.team.len(),
                config.team_shares.len()
            );
        }
        if let Some(pos) = config.team_shares.iter().position(|s| *s == 0) {
            bail!("Share for team member #{} must be positive", pos);
        }
        if config.base_uri.trim().is_empty() {
            bail!("Base URI is empty");
        }

        let team = config
            .team
            .iter()
            .map(|m| Address::parse(m).with_context(|| format!("Invalid team member {}", m)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            team,
            team_shares: config.team_shares.clone(),
            merkle_root,
            base_uri: config.base_uri.clone(),
        })
    }

    /// Positional argument list, in constructor order.
    pub fn to_json(&self) -> Value {
        json!([
            self.team,
            self.team_shares,
            self.merkle_root,
            self.base_uri,
        ])
    }
}
