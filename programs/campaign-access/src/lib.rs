pub mod access;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod pda;
pub mod state;

pub use access::*;
pub use constants::{
    ACCESS_TOKEN_DECIMALS, ACCESS_TOKEN_SUPPLY, CAMPAIGN_RECORD_V0_SEED_PREFIX,
    MAX_CAMPAIGN_ID_LEN, MAX_DISPLAY_NAME_LEN, MAX_METADATA_URI_LEN, MAX_SYMBOL_LEN,
    METADATA_SEED_PREFIX,
};
pub use instructions::*;
pub use state::*;

use anchor_lang::prelude::*;

declare_id!("FTLbhWadi2Ss4cUN8zJCRvfZ7D41jDrhz7ubRHRYNXDv");

#[program]
pub mod campaign_access {
    use super::instructions;
    use super::*;

    // creator
    pub fn mint_access_token_v0(
        ctx: Context<MintAccessTokenV0>,
        campaign_id: String,
        display_name: String,
        symbol: String,
        metadata_uri: String,
        agent_count: u32,
    ) -> Result<()> {
        instructions::handle_mint_access_token_v0(
            ctx,
            campaign_id,
            display_name,
            symbol,
            metadata_uri,
            agent_count,
        )
    }

    // authority
    pub fn update_campaign_v0(
        ctx: Context<UpdateCampaignV0>,
        campaign_id: String,
        patch: CampaignPatch,
    ) -> Result<()> {
        instructions::handle_update_campaign_v0(ctx, campaign_id, patch)
    }

    // token holder
    pub fn verify_access_v0(ctx: Context<VerifyAccessV0>, campaign_id: String) -> Result<()> {
        instructions::handle_verify_access_v0(ctx, campaign_id)
    }
}
