use campaign_access::{
    pda, validate_display_name, validate_metadata_uri, validate_symbol, CampaignPatch,
    MAX_DISPLAY_NAME_LEN, MAX_METADATA_URI_LEN, MAX_SYMBOL_LEN,
};
use serde::{Deserialize, Serialize};

use crate::{SdkError, SdkResult};

/// Checks a campaign id before it is used as a seed.
///
/// Ids over the seed limit must be caught here: the program derives the
/// campaign address before its own check runs and aborts on an oversized seed.
pub fn validate_campaign_id(campaign_id: &str) -> SdkResult<()> {
    pda::validate_campaign_id(campaign_id).map_err(|_| seed_length_error(campaign_id))
}

pub(crate) fn seed_length_error(campaign_id: &str) -> SdkError {
    SdkError::InvalidSeedLength {
        campaign_id: campaign_id.to_string(),
        len: campaign_id.len(),
    }
}

/// Everything needed to create a campaign and its access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintAccessTokenParams {
    pub campaign_id: String,
    pub display_name: String,
    pub symbol: String,
    pub metadata_uri: String,
    #[serde(default)]
    pub agent_count: u32,
}

impl MintAccessTokenParams {
    pub fn validate(&self) -> SdkResult<()> {
        validate_campaign_id(&self.campaign_id)?;
        validate_field(
            validate_display_name(&self.display_name),
            "display_name",
            MAX_DISPLAY_NAME_LEN,
        )?;
        validate_field(validate_symbol(&self.symbol), "symbol", MAX_SYMBOL_LEN)?;
        validate_field(
            validate_metadata_uri(&self.metadata_uri),
            "metadata_uri",
            MAX_METADATA_URI_LEN,
        )?;
        Ok(())
    }
}

pub(crate) fn validate_patch(patch: &CampaignPatch) -> SdkResult<()> {
    if patch.is_empty() {
        return Err(SdkError::InvalidInput(
            "patch must set at least one field".to_string(),
        ));
    }
    if let Some(display_name) = &patch.display_name {
        validate_field(
            validate_display_name(display_name),
            "display_name",
            MAX_DISPLAY_NAME_LEN,
        )?;
    }
    if let Some(symbol) = &patch.symbol {
        validate_field(validate_symbol(symbol), "symbol", MAX_SYMBOL_LEN)?;
    }
    if let Some(metadata_uri) = &patch.metadata_uri {
        validate_field(
            validate_metadata_uri(metadata_uri),
            "metadata_uri",
            MAX_METADATA_URI_LEN,
        )?;
    }
    Ok(())
}

fn validate_field(result: anchor_lang::Result<()>, field: &str, max_len: usize) -> SdkResult<()> {
    result.map_err(|_| SdkError::InvalidInput(format!("{field} exceeds {max_len} bytes")))
}
