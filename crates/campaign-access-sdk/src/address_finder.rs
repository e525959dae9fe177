use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    system_program::ID as SYSTEM_PROGRAM_ID, sysvar::rent::ID as RENT_ID,
};
use anchor_spl::{
    associated_token::{get_associated_token_address_with_program_id, ID as ASSOCIATED_TOKEN_PROGRAM_ID},
    metadata::mpl_token_metadata::ID as TOKEN_METADATA_PROGRAM_ID,
    token::ID as TOKEN_PROGRAM_ID,
};
use campaign_access::{pda, ID as CAMPAIGN_ACCESS_PROGRAM_ID, METADATA_SEED_PREFIX};

use crate::{params::seed_length_error, SdkResult};

pub struct AddressFinder {
    pub program_id: Pubkey,

    pub associated_token_program_id: Pubkey,
    pub rent_id: Pubkey,
    pub system_program_id: Pubkey,
    pub token_program_id: Pubkey,
    pub token_metadata_program_id: Pubkey,
}

impl AddressFinder {
    pub fn new(
        program_id: Pubkey,
        associated_token_program_id: Pubkey,
        rent_id: Pubkey,
        system_program_id: Pubkey,
        token_program_id: Pubkey,
        token_metadata_program_id: Pubkey,
    ) -> Self {
        Self {
            program_id,
            associated_token_program_id,
            rent_id,
            system_program_id,
            token_program_id,
            token_metadata_program_id,
        }
    }

    /// Fails with `InvalidSeedLength` for ids that cannot be a single seed.
    pub fn find_campaign_address(&self, campaign_id: &str) -> SdkResult<(Pubkey, u8)> {
        pda::find_campaign_address_with_program_id(campaign_id, &self.program_id)
            .map_err(|_| seed_length_error(campaign_id))
    }

    pub fn find_metadata_address(&self, mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                METADATA_SEED_PREFIX,
                self.token_metadata_program_id.as_ref(),
                mint.as_ref(),
            ],
            &self.token_metadata_program_id,
        )
    }

    pub fn find_associated_token_address(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(owner, mint, &self.token_program_id)
    }
}

impl Default for AddressFinder {
    fn default() -> Self {
        Self::new(
            CAMPAIGN_ACCESS_PROGRAM_ID,
            ASSOCIATED_TOKEN_PROGRAM_ID,
            RENT_ID,
            SYSTEM_PROGRAM_ID,
            TOKEN_PROGRAM_ID,
            TOKEN_METADATA_PROGRAM_ID,
        )
    }
}
