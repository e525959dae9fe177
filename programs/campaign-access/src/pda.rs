//! Address derivation shared by the program and off-chain callers.
//!
//! Everything here is pure: the same inputs produce the same addresses on and
//! off the ledger.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::get_associated_token_address,
    metadata::mpl_token_metadata::ID as TOKEN_METADATA_PROGRAM_ID,
};

use crate::{
    error::ErrorCode, CAMPAIGN_RECORD_V0_SEED_PREFIX, MAX_CAMPAIGN_ID_LEN, METADATA_SEED_PREFIX,
};

/// Rejects campaign ids that cannot be used as a single PDA seed.
///
/// Ids are never truncated; an id that is too long is an input error. Inside
/// an instruction the seeds constraint derives the campaign address first, and
/// the runtime aborts on a seed over `MAX_CAMPAIGN_ID_LEN`, so on-chain only the
/// empty id reaches this check. Off-chain callers reject both cases here.
pub fn validate_campaign_id(campaign_id: &str) -> Result<()> {
    require!(
        !campaign_id.is_empty() && campaign_id.len() <= MAX_CAMPAIGN_ID_LEN,
        ErrorCode::InvalidSeedLength
    );
    Ok(())
}

pub fn find_campaign_address_with_program_id(
    campaign_id: &str,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    validate_campaign_id(campaign_id)?;
    Ok(Pubkey::find_program_address(
        &[CAMPAIGN_RECORD_V0_SEED_PREFIX, campaign_id.as_bytes()],
        program_id,
    ))
}

pub fn find_campaign_address(campaign_id: &str) -> Result<(Pubkey, u8)> {
    find_campaign_address_with_program_id(campaign_id, &crate::ID)
}

/// Metaplex metadata account for `mint`.
pub fn find_metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED_PREFIX,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

pub fn find_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_campaign_address_is_deterministic() {
        let first = find_campaign_address("launch-42").unwrap();
        let second = find_campaign_address("launch-42").unwrap();
        assert_eq!(first, second);

        let (address, bump) = first;
        let recreated = Pubkey::create_program_address(
            &[CAMPAIGN_RECORD_V0_SEED_PREFIX, b"launch-42", &[bump]],
            &crate::ID,
        )
        .unwrap();
        assert_eq!(address, recreated);
    }

    #[test]
    fn test_campaign_address_is_injective_over_distinct_ids() {
        let ids = [
            "a", "b", "ab", "ba", "camp-1", "camp-10", "camp-1 ", "CAMP-1", "launch-42",
            "launch-4", "0123456789abcdef0123456789abcdef",
        ];
        let addresses: HashSet<Pubkey> = ids
            .iter()
            .map(|id| find_campaign_address(id).unwrap().0)
            .collect();
        assert_eq!(addresses.len(), ids.len());
    }

    #[test]
    fn test_campaign_address_depends_on_program_id() {
        let other_program = Pubkey::new_unique();
        let (ours, _) = find_campaign_address("camp-1").unwrap();
        let (theirs, _) = find_campaign_address_with_program_id("camp-1", &other_program).unwrap();
        assert_ne!(ours, theirs);
    }

    #[test]
    fn test_campaign_id_length_limits() {
        let longest = "x".repeat(MAX_CAMPAIGN_ID_LEN);
        assert!(find_campaign_address(&longest).is_ok());

        let too_long = "x".repeat(MAX_CAMPAIGN_ID_LEN + 1);
        let err = find_campaign_address(&too_long).unwrap_err();
        assert_eq!(err, ErrorCode::InvalidSeedLength.into());

        let err = validate_campaign_id("").unwrap_err();
        assert_eq!(err, ErrorCode::InvalidSeedLength.into());
    }

    #[test]
    fn test_multibyte_campaign_id_counts_bytes() {
        // 11 three-byte characters = 33 bytes
        let id = "€".repeat(11);
        assert!(validate_campaign_id(&id).is_err());
        assert!(validate_campaign_id(&"€".repeat(10)).is_ok());
    }

    #[test]
    fn test_metadata_address_matches_token_metadata_program() {
        let mint = Pubkey::new_unique();
        let (address, bump) = find_metadata_address(&mint);
        let expected = anchor_spl::metadata::mpl_token_metadata::accounts::Metadata::find_pda(&mint);
        assert_eq!((address, bump), expected);
    }
}
