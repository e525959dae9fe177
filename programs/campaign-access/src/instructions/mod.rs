pub mod mint_access_token_v0;
pub mod update_campaign_v0;
pub mod verify_access_v0;

pub use mint_access_token_v0::*;
pub use update_campaign_v0::*;
pub use verify_access_v0::*;
