use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount};

use crate::{
    access::{evaluate_access, AccessReason, TokenHolding},
    error::ErrorCode,
    pda::find_associated_token_address,
    state::CampaignRecordV0,
    CAMPAIGN_RECORD_V0_SEED_PREFIX,
};

/// Guard-only instruction: succeeds when the claimant holds the campaign's
/// access token and changes no state either way.
#[derive(Accounts)]
#[instruction(campaign_id: String)]
pub struct VerifyAccessV0<'info> {
    pub claimant: Signer<'info>,

    /// CHECK: May not exist yet; decoded in the handler so that a missing
    /// campaign surfaces as `CampaignNotFound`.
    #[account(
        seeds = [
            CAMPAIGN_RECORD_V0_SEED_PREFIX,
            campaign_id.as_bytes(),
        ],
        bump,
    )]
    pub campaign: UncheckedAccount<'info>,

    /// CHECK: Must be the claimant's associated token account for the campaign
    /// mint. May not exist.
    pub claimant_token_account: UncheckedAccount<'info>,
}

#[event]
pub struct AccessVerified {
    pub campaign: Pubkey,
    pub claimant: Pubkey,
    pub mint: Pubkey,
    pub timestamp: i64,
}

pub fn handle_verify_access_v0(ctx: Context<VerifyAccessV0>, campaign_id: String) -> Result<()> {
    let claimant = ctx.accounts.claimant.key();

    let campaign = load_campaign(&ctx.accounts.campaign)?;
    let Some(campaign) = campaign else {
        msg!("Access denied to {}: campaign not found", campaign_id);
        return err!(ErrorCode::CampaignNotFound);
    };

    require_keys_eq!(
        ctx.accounts.claimant_token_account.key(),
        find_associated_token_address(&claimant, &campaign.mint),
        ErrorCode::TokenAccountMismatch
    );

    let holding = load_holding(&ctx.accounts.claimant_token_account)?;
    let decision = evaluate_access(&claimant, Some(&campaign), holding.as_ref());

    match decision.reason {
        AccessReason::TokenHeld => {}
        AccessReason::CampaignNotFound => return err!(ErrorCode::CampaignNotFound),
        AccessReason::NoToken => {
            msg!("Access denied to {}: {} holds no token", campaign_id, claimant);
            return err!(ErrorCode::NoToken);
        }
    }

    emit!(AccessVerified {
        campaign: ctx.accounts.campaign.key(),
        claimant,
        mint: campaign.mint,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Access granted to {} for {}", claimant, campaign_id);

    Ok(())
}

fn load_campaign(account: &UncheckedAccount) -> Result<Option<CampaignRecordV0>> {
    if account.data_is_empty() || *account.owner != crate::ID {
        return Ok(None);
    }
    let data = account.try_borrow_data()?;
    let campaign = CampaignRecordV0::try_deserialize(&mut &data[..])?;
    Ok(campaign.is_bound().then_some(campaign))
}

fn load_holding(account: &UncheckedAccount) -> Result<Option<TokenHolding>> {
    if account.data_is_empty() || *account.owner != token::ID {
        return Ok(None);
    }
    let data = account.try_borrow_data()?;
    let token_account = TokenAccount::try_deserialize(&mut &data[..])?;
    Ok(Some(TokenHolding {
        mint: token_account.mint,
        owner: token_account.owner,
        amount: token_account.amount,
    }))
}
