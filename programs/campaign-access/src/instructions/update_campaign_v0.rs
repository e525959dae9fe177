use anchor_lang::prelude::*;
use anchor_spl::metadata::{
    mpl_token_metadata::types::DataV2, update_metadata_accounts_v2, Metadata,
    UpdateMetadataAccountsV2,
};

use crate::{
    error::ErrorCode,
    state::{CampaignPatch, CampaignRecordV0},
    CAMPAIGN_RECORD_V0_SEED_PREFIX, METADATA_SEED_PREFIX,
};

#[derive(Accounts)]
#[instruction(campaign_id: String)]
pub struct UpdateCampaignV0<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [
            CAMPAIGN_RECORD_V0_SEED_PREFIX,
            campaign_id.as_bytes(),
        ],
        bump = campaign.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub campaign: Account<'info, CampaignRecordV0>,

    /// CHECK: Token metadata account of the campaign mint; address checked by seeds.
    #[account(
        mut,
        seeds = [
            METADATA_SEED_PREFIX,
            token_metadata_program.key().as_ref(),
            campaign.mint.as_ref(),
        ],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub metadata: UncheckedAccount<'info>,

    pub token_metadata_program: Program<'info, Metadata>,
}

#[event]
pub struct CampaignUpdated {
    pub campaign: Pubkey,
    pub authority: Pubkey,
    pub metadata_synced: bool,
    pub timestamp: i64,
}

pub fn handle_update_campaign_v0(
    ctx: Context<UpdateCampaignV0>,
    campaign_id: String,
    patch: CampaignPatch,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let campaign = &mut ctx.accounts.campaign;
    let metadata_changed = campaign.apply_patch(&patch, now)?;

    if metadata_changed {
        let campaign_seeds: &[&[u8]] = &[
            CAMPAIGN_RECORD_V0_SEED_PREFIX,
            campaign_id.as_bytes(),
            &[campaign.bump],
        ];

        update_metadata_accounts_v2(
            CpiContext::new_with_signer(
                ctx.accounts.token_metadata_program.to_account_info(),
                UpdateMetadataAccountsV2 {
                    metadata: ctx.accounts.metadata.to_account_info(),
                    update_authority: campaign.to_account_info(),
                },
                &[campaign_seeds],
            ),
            None,
            Some(DataV2 {
                name: campaign.display_name.clone(),
                symbol: campaign.symbol.clone(),
                uri: campaign.metadata_uri.clone(),
                seller_fee_basis_points: 0,
                creators: None,
                collection: None,
                uses: None,
            }),
            None,
            None,
        )?;
    }

    emit!(CampaignUpdated {
        campaign: campaign.key(),
        authority: ctx.accounts.authority.key(),
        metadata_synced: metadata_changed,
        timestamp: now,
    });

    msg!("Campaign {} updated", campaign_id);

    Ok(())
}
