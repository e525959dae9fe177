use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode, MAX_DISPLAY_NAME_LEN, MAX_METADATA_URI_LEN, MAX_SYMBOL_LEN,
};

#[account] // seed [CAMPAIGN_RECORD_V0_SEED_PREFIX, campaign_id]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct CampaignRecordV0 {
    /// Mint of the campaign's access token. Never changes after creation.
    pub mint: Pubkey,

    /// The only principal allowed to update the descriptive fields.
    pub authority: Pubkey,

    /// The campaign id this record was derived from.
    #[max_len(32)]
    pub campaign_id: String,

    #[max_len(32)]
    pub display_name: String,

    #[max_len(10)]
    pub symbol: String,

    /// Off-chain JSON document describing the campaign.
    #[max_len(200)]
    pub metadata_uri: String,

    /// Stored for off-chain orchestration; the program does not interpret it.
    pub agent_count: u32,

    pub created_at: i64,
    pub updated_at: i64,

    /// Bump seed for the campaign record PDA.
    pub bump: u8,
}

impl CampaignRecordV0 {
    /// A freshly allocated account deserializes to all zeroes; a bound record
    /// always carries a real mint.
    pub fn is_bound(&self) -> bool {
        self.mint != Pubkey::default()
    }

    /// Overwrites the descriptive fields present in `patch`.
    ///
    /// Returns whether any of the fields mirrored into token metadata changed.
    pub fn apply_patch(&mut self, patch: &CampaignPatch, now: i64) -> Result<bool> {
        require!(!patch.is_empty(), ErrorCode::EmptyPatch);
        patch.validate()?;

        let mut metadata_changed = false;

        if let Some(display_name) = &patch.display_name {
            metadata_changed |= self.display_name != *display_name;
            self.display_name = display_name.clone();
        }
        if let Some(symbol) = &patch.symbol {
            metadata_changed |= self.symbol != *symbol;
            self.symbol = symbol.clone();
        }
        if let Some(metadata_uri) = &patch.metadata_uri {
            metadata_changed |= self.metadata_uri != *metadata_uri;
            self.metadata_uri = metadata_uri.clone();
        }
        if let Some(agent_count) = patch.agent_count {
            self.agent_count = agent_count;
        }

        self.updated_at = now;

        Ok(metadata_changed)
    }
}

/// Partial update of a campaign record's descriptive fields.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignPatch {
    pub display_name: Option<String>,
    pub symbol: Option<String>,
    pub metadata_uri: Option<String>,
    pub agent_count: Option<u32>,
}

impl CampaignPatch {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.symbol.is_none()
            && self.metadata_uri.is_none()
            && self.agent_count.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(display_name) = &self.display_name {
            validate_display_name(display_name)?;
        }
        if let Some(symbol) = &self.symbol {
            validate_symbol(symbol)?;
        }
        if let Some(metadata_uri) = &self.metadata_uri {
            validate_metadata_uri(metadata_uri)?;
        }
        Ok(())
    }
}

pub fn validate_display_name(display_name: &str) -> Result<()> {
    require!(
        display_name.len() <= MAX_DISPLAY_NAME_LEN,
        ErrorCode::DisplayNameTooLong
    );
    Ok(())
}

pub fn validate_symbol(symbol: &str) -> Result<()> {
    require!(symbol.len() <= MAX_SYMBOL_LEN, ErrorCode::SymbolTooLong);
    Ok(())
}

pub fn validate_metadata_uri(metadata_uri: &str) -> Result<()> {
    require!(
        metadata_uri.len() <= MAX_METADATA_URI_LEN,
        ErrorCode::MetadataUriTooLong
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CampaignRecordV0 {
        CampaignRecordV0 {
            mint: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            campaign_id: "camp-1".to_string(),
            display_name: "Spring Launch".to_string(),
            symbol: "SPRG".to_string(),
            metadata_uri: "ipfs://bafy/spring.json".to_string(),
            agent_count: 3,
            created_at: 100,
            updated_at: 100,
            bump: 254,
        }
    }

    #[test]
    fn test_apply_patch_only_touches_patched_fields() {
        let mut campaign = record();
        let before = campaign.clone();

        let changed = campaign
            .apply_patch(
                &CampaignPatch {
                    agent_count: Some(9),
                    ..Default::default()
                },
                200,
            )
            .unwrap();

        assert!(!changed, "agent_count is not mirrored into token metadata");
        assert_eq!(campaign.agent_count, 9);
        assert_eq!(campaign.updated_at, 200);
        assert_eq!(campaign.display_name, before.display_name);
        assert_eq!(campaign.symbol, before.symbol);
        assert_eq!(campaign.metadata_uri, before.metadata_uri);
        assert_eq!(campaign.mint, before.mint);
        assert_eq!(campaign.authority, before.authority);
        assert_eq!(campaign.bump, before.bump);
        assert_eq!(campaign.created_at, before.created_at);
    }

    #[test]
    fn test_apply_patch_reports_metadata_changes() {
        let mut campaign = record();

        let changed = campaign
            .apply_patch(
                &CampaignPatch {
                    display_name: Some("Summer Launch".to_string()),
                    ..Default::default()
                },
                300,
            )
            .unwrap();
        assert!(changed);
        assert_eq!(campaign.display_name, "Summer Launch");

        // Same value again is not a metadata change
        let changed = campaign
            .apply_patch(
                &CampaignPatch {
                    display_name: Some("Summer Launch".to_string()),
                    ..Default::default()
                },
                301,
            )
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_apply_patch_rejects_empty_patch() {
        let mut campaign = record();
        let before = campaign.clone();
        let err = campaign
            .apply_patch(&CampaignPatch::default(), 200)
            .unwrap_err();
        assert_eq!(err, ErrorCode::EmptyPatch.into());
        assert_eq!(campaign, before);
    }

    #[test]
    fn test_apply_patch_rejects_oversized_fields_without_mutating() {
        let mut campaign = record();
        let before = campaign.clone();

        let err = campaign
            .apply_patch(
                &CampaignPatch {
                    display_name: Some("ok".to_string()),
                    metadata_uri: Some("u".repeat(MAX_METADATA_URI_LEN + 1)),
                    ..Default::default()
                },
                200,
            )
            .unwrap_err();

        assert_eq!(err, ErrorCode::MetadataUriTooLong.into());
        assert_eq!(campaign, before);
    }

    #[test]
    fn test_field_validators_accept_limits() {
        assert!(validate_display_name(&"n".repeat(MAX_DISPLAY_NAME_LEN)).is_ok());
        assert!(validate_display_name(&"n".repeat(MAX_DISPLAY_NAME_LEN + 1)).is_err());
        assert!(validate_symbol(&"S".repeat(MAX_SYMBOL_LEN)).is_ok());
        assert!(validate_symbol(&"S".repeat(MAX_SYMBOL_LEN + 1)).is_err());
        assert!(validate_metadata_uri(&"u".repeat(MAX_METADATA_URI_LEN)).is_ok());
    }

    #[test]
    fn test_zeroed_record_is_not_bound() {
        let mut campaign = record();
        assert!(campaign.is_bound());
        campaign.mint = Pubkey::default();
        assert!(!campaign.is_bound());
    }
}
