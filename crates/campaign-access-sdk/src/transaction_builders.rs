/*!
# Transaction Builders

Unsigned transactions for each campaign access instruction. The caller signs
with the keys named in each builder's doc and sends; nothing here talks to RPC.
*/

use campaign_access::CampaignPatch;
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction, hash::Hash, message::Message, pubkey::Pubkey,
    transaction::Transaction,
};

use crate::{
    build_mint_access_token_v0_ix, build_update_campaign_v0_ix, build_verify_access_v0_ix,
    AddressFinder, MintAccessTokenParams, SdkResult,
};

/// The mint path runs four token and metadata CPIs.
pub const MINT_COMPUTE_UNIT_LIMIT: u32 = 300_000;

/// Signers: `payer` and the `mint` keypair (and nobody else).
pub fn build_mint_access_token_tx(
    address_finder: &AddressFinder,
    payer: &Pubkey,
    authority: &Pubkey,
    mint: &Pubkey,
    params: &MintAccessTokenParams,
    recent_blockhash: Hash,
) -> SdkResult<Transaction> {
    let (mint_ix, _, _) =
        build_mint_access_token_v0_ix(address_finder, payer, authority, mint, params)?;

    let message = Message::new_with_blockhash(
        &[
            ComputeBudgetInstruction::set_compute_unit_limit(MINT_COMPUTE_UNIT_LIMIT),
            mint_ix,
        ],
        Some(payer),
        &recent_blockhash,
    );

    Ok(Transaction::new_unsigned(message))
}

/// Signer: `authority`, which also pays the fee.
pub fn build_update_campaign_tx(
    address_finder: &AddressFinder,
    authority: &Pubkey,
    campaign_id: &str,
    mint: &Pubkey,
    patch: CampaignPatch,
    recent_blockhash: Hash,
) -> SdkResult<Transaction> {
    let (ix, _, _) = build_update_campaign_v0_ix(address_finder, authority, campaign_id, mint, patch)?;
    let message = Message::new_with_blockhash(&[ix], Some(authority), &recent_blockhash);
    Ok(Transaction::new_unsigned(message))
}

/// Signer: `claimant`, which also pays the fee.
pub fn build_verify_access_tx(
    address_finder: &AddressFinder,
    claimant: &Pubkey,
    campaign_id: &str,
    mint: Option<&Pubkey>,
    recent_blockhash: Hash,
) -> SdkResult<Transaction> {
    let (ix, _, _) = build_verify_access_v0_ix(address_finder, claimant, campaign_id, mint)?;
    let message = Message::new_with_blockhash(&[ix], Some(claimant), &recent_blockhash);
    Ok(Transaction::new_unsigned(message))
}
