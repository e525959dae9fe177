mod address_finder;
mod error;
mod instruction_builders;
mod metadata_document;
mod params;
mod transaction_builders;

pub use address_finder::AddressFinder;
pub use error::{SdkError, SdkResult};
pub use instruction_builders::*;
pub use metadata_document::{AlertThresholds, CampaignMetadataDocument};
pub use params::{validate_campaign_id, MintAccessTokenParams};
pub use transaction_builders::*;

pub use campaign_access::access::*;
pub use campaign_access::error::ErrorCode;
pub use campaign_access::state::*;
pub use campaign_access::{
    CAMPAIGN_RECORD_V0_SEED_PREFIX, MAX_CAMPAIGN_ID_LEN, MAX_DISPLAY_NAME_LEN,
    MAX_METADATA_URI_LEN, MAX_SYMBOL_LEN,
};

// Re-export program ID
pub use campaign_access::ID as PROGRAM_ID;
