mod campaign_snapshot;
mod test_fixture;

pub use campaign_snapshot::CampaignSnapshot;
pub use test_fixture::{
    assert_program_error, custom_error_code, TestFixture, CAMPAIGN_ACCESS_SO_PATH,
    TOKEN_METADATA_SO_PATH,
};

use campaign_access_sdk::MintAccessTokenParams;

/// Lamports given to every funded test keypair
pub const TEST_FUNDING_LAMPORTS: u64 = 10_000_000_000; // 10 SOL

/// Mint parameters for `campaign_id` with valid, recognisable field values
pub fn test_mint_params(campaign_id: &str, agent_count: u32) -> MintAccessTokenParams {
    MintAccessTokenParams {
        campaign_id: campaign_id.to_string(),
        display_name: format!("Campaign {}", campaign_id),
        symbol: "CAMP".to_string(),
        metadata_uri: format!("https://example.com/campaigns/{}.json", campaign_id),
        agent_count,
    }
}
