use campaign_access_sdk::MintAccessTokenParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Campaign definition file read by `mint --config`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    #[serde(flatten)]
    pub params: MintAccessTokenParams,

    /// Pubkey or keypair path of the campaign authority (defaults to the payer)
    #[serde(default)]
    pub authority: Option<String>,

    /// Local copy of the document behind `metadata_uri`, validated before minting
    #[serde(default)]
    pub metadata_document: Option<PathBuf>,
}

impl CampaignConfig {
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: CampaignConfig = serde_yaml::from_str(&content)?;

        // Document paths are relative to the config file
        if let Some(document) = &config.metadata_document {
            if document.is_relative() {
                if let Some(dir) = path.parent() {
                    config.metadata_document = Some(dir.join(document));
                }
            }
        }

        Ok(config)
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct MintOverrides {
    pub campaign_id: Option<String>,
    pub display_name: Option<String>,
    pub symbol: Option<String>,
    pub metadata_uri: Option<String>,
    pub agent_count: Option<u32>,
    pub authority: Option<String>,
}

impl MintOverrides {
    /// Merges onto `base`, or builds the whole config from flags when there is no file.
    pub fn apply(self, base: Option<CampaignConfig>) -> CliResult<CampaignConfig> {
        let mut config = match base {
            Some(config) => config,
            None => CampaignConfig {
                params: MintAccessTokenParams {
                    campaign_id: require(self.campaign_id.clone(), "campaign_id")?,
                    display_name: require(self.display_name.clone(), "name")?,
                    symbol: require(self.symbol.clone(), "symbol")?,
                    metadata_uri: self.metadata_uri.clone().unwrap_or_default(),
                    agent_count: 0,
                },
                authority: None,
                metadata_document: None,
            },
        };

        if let Some(campaign_id) = self.campaign_id {
            config.params.campaign_id = campaign_id;
        }
        if let Some(display_name) = self.display_name {
            config.params.display_name = display_name;
        }
        if let Some(symbol) = self.symbol {
            config.params.symbol = symbol;
        }
        if let Some(metadata_uri) = self.metadata_uri {
            config.params.metadata_uri = metadata_uri;
        }
        if let Some(agent_count) = self.agent_count {
            config.params.agent_count = agent_count;
        }
        if self.authority.is_some() {
            config.authority = self.authority;
        }

        Ok(config)
    }
}

fn require(value: Option<String>, flag: &str) -> CliResult<String> {
    value.ok_or_else(|| {
        CliError::InvalidConfig(format!("--{} is required without --config", flag.replace('_', "-")))
    })
}
