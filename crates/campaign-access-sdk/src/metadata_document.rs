//! The off-chain JSON document a campaign's `metadata_uri` points at.
//!
//! Only the shape is defined here; hosting the document is up to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::SdkResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetadataDocument {
    pub name: String,
    pub platforms: Vec<String>,
    pub keywords: Vec<String>,
    pub alert_thresholds: AlertThresholds,

    /// Fields this crate does not know about are preserved.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub spam: f64,
    pub sentiment_drop: f64,
}

impl CampaignMetadataDocument {
    pub fn from_json(json: &str) -> SdkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> SdkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
