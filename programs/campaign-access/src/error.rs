use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("A campaign record already exists for this campaign id.")]
    CampaignAlreadyExists,
    #[msg("No campaign record exists for this campaign id.")]
    CampaignNotFound,
    #[msg("Signer is not the campaign authority.")]
    Unauthorized,
    #[msg("Campaign id must be between 1 and 32 bytes.")]
    InvalidSeedLength,
    #[msg("Display name exceeds 32 bytes.")]
    DisplayNameTooLong,
    #[msg("Symbol exceeds 10 bytes.")]
    SymbolTooLong,
    #[msg("Metadata URI exceeds 200 bytes.")]
    MetadataUriTooLong,
    #[msg("Claimant does not hold the campaign access token.")]
    NoToken,
    #[msg("Token account is not the claimant's associated token account for the campaign mint.")]
    TokenAccountMismatch,
    #[msg("Campaign patch does not change any field.")]
    EmptyPatch,
}
