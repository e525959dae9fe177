use anchor_lang::prelude::*;

/// Seed prefixes for PDA derivation
#[constant]
pub const CAMPAIGN_RECORD_V0_SEED_PREFIX: &[u8] = b"campaign_record_v0";

/// Seed prefix used by the token metadata program for metadata accounts.
pub const METADATA_SEED_PREFIX: &[u8] = b"metadata";

/// Campaign ids are used verbatim as a PDA seed, so they share the seed limit.
pub const MAX_CAMPAIGN_ID_LEN: usize = 32;

// Metaplex token metadata limits
pub const MAX_DISPLAY_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_METADATA_URI_LEN: usize = 200;

/// Access tokens are indivisible.
pub const ACCESS_TOKEN_DECIMALS: u8 = 0;

/// Exactly one access token is minted per campaign.
pub const ACCESS_TOKEN_SUPPLY: u64 = 1;
