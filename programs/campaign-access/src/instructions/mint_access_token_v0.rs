use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2, CreateMetadataAccountsV3,
        Metadata,
    },
    token::{
        self, spl_token::instruction::AuthorityType, Mint, MintTo, SetAuthority, Token,
        TokenAccount,
    },
};

use crate::{
    error::ErrorCode,
    pda::validate_campaign_id,
    state::{validate_display_name, validate_metadata_uri, validate_symbol, CampaignRecordV0},
    ACCESS_TOKEN_DECIMALS, ACCESS_TOKEN_SUPPLY, CAMPAIGN_RECORD_V0_SEED_PREFIX,
    METADATA_SEED_PREFIX,
};

#[derive(Accounts)]
#[instruction(campaign_id: String)]
pub struct MintAccessTokenV0<'info> {
    /// Funds the mint, token account, metadata and campaign record.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Recorded as the campaign authority and receives the access token.
    /// Any principal may be named; the payer chooses.
    pub authority: UncheckedAccount<'info>,

    /// `init_if_needed` so that a second mint for the same id reaches the
    /// handler and fails with `CampaignAlreadyExists` instead of a system
    /// program error.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + CampaignRecordV0::INIT_SPACE,
        seeds = [
            CAMPAIGN_RECORD_V0_SEED_PREFIX,
            campaign_id.as_bytes(),
        ],
        bump
    )]
    pub campaign: Box<Account<'info, CampaignRecordV0>>,

    /// Fresh keypair; the campaign PDA holds both authorities until the
    /// handler revokes them.
    #[account(
        init,
        payer = payer,
        mint::decimals = ACCESS_TOKEN_DECIMALS,
        mint::authority = campaign,
        mint::freeze_authority = campaign,
    )]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = authority,
    )]
    pub authority_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: Created by the token metadata program; address checked by seeds.
    #[account(
        mut,
        seeds = [
            METADATA_SEED_PREFIX,
            token_metadata_program.key().as_ref(),
            mint.key().as_ref(),
        ],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub metadata: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct CampaignMinted {
    pub campaign: Pubkey,
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub campaign_id: String,
    pub agent_count: u32,
    pub timestamp: i64,
}

pub fn handle_mint_access_token_v0(
    ctx: Context<MintAccessTokenV0>,
    campaign_id: String,
    display_name: String,
    symbol: String,
    metadata_uri: String,
    agent_count: u32,
) -> Result<()> {
    // Oversized ids already failed seed derivation; this catches the empty id
    validate_campaign_id(&campaign_id)?;
    validate_display_name(&display_name)?;
    validate_symbol(&symbol)?;
    validate_metadata_uri(&metadata_uri)?;

    require!(
        !ctx.accounts.campaign.is_bound(),
        ErrorCode::CampaignAlreadyExists
    );

    let campaign_bump = ctx.bumps.campaign;
    let campaign_seeds: &[&[u8]] = &[
        CAMPAIGN_RECORD_V0_SEED_PREFIX,
        campaign_id.as_bytes(),
        &[campaign_bump],
    ];
    let signer_seeds = &[campaign_seeds];

    let accounts = &ctx.accounts;
    let campaign_info = accounts.campaign.to_account_info();

    // 1. Mint the single access token to the authority
    token::mint_to(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            MintTo {
                mint: accounts.mint.to_account_info(),
                to: accounts.authority_token_account.to_account_info(),
                authority: campaign_info.clone(),
            },
            signer_seeds,
        ),
        ACCESS_TOKEN_SUPPLY,
    )?;

    // 2. Metadata must be created while the campaign PDA is still mint authority
    create_metadata_accounts_v3(
        CpiContext::new_with_signer(
            accounts.token_metadata_program.to_account_info(),
            CreateMetadataAccountsV3 {
                metadata: accounts.metadata.to_account_info(),
                mint: accounts.mint.to_account_info(),
                mint_authority: campaign_info.clone(),
                payer: accounts.payer.to_account_info(),
                update_authority: campaign_info.clone(),
                system_program: accounts.system_program.to_account_info(),
                rent: accounts.rent.to_account_info(),
            },
            signer_seeds,
        ),
        DataV2 {
            name: display_name.clone(),
            symbol: symbol.clone(),
            uri: metadata_uri.clone(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        },
        true, // is_mutable, descriptive fields can be updated by the authority
        true, // update_authority_is_signer
        None,
    )?;

    // 3. Drop mint and freeze authority so supply stays at one
    for authority_type in [AuthorityType::MintTokens, AuthorityType::FreezeAccount] {
        token::set_authority(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                SetAuthority {
                    current_authority: campaign_info.clone(),
                    account_or_mint: accounts.mint.to_account_info(),
                },
                signer_seeds,
            ),
            authority_type,
            None,
        )?;
    }

    // 4. Bind the campaign record
    let now = Clock::get()?.unix_timestamp;
    let mint = accounts.mint.key();
    let authority = accounts.authority.key();

    let campaign = &mut ctx.accounts.campaign;
    campaign.set_inner(CampaignRecordV0 {
        mint,
        authority,
        campaign_id: campaign_id.clone(),
        display_name,
        symbol,
        metadata_uri,
        agent_count,
        created_at: now,
        updated_at: now,
        bump: campaign_bump,
    });

    emit!(CampaignMinted {
        campaign: campaign.key(),
        mint,
        authority,
        campaign_id: campaign_id.clone(),
        agent_count,
        timestamp: now,
    });

    msg!(
        "Campaign {} bound to mint {} (authority {})",
        campaign_id,
        mint,
        authority
    );

    Ok(())
}
