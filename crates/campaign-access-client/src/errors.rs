use campaign_access_sdk::SdkError;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("campaign {campaign_id:?} already exists")]
    AlreadyExists { campaign_id: String },

    #[error("campaign {campaign_id:?} not found")]
    NotFound { campaign_id: String },

    #[error("{signer} is not the authority of campaign {campaign_id:?}")]
    Unauthorized { campaign_id: String, signer: Pubkey },

    #[error("insufficient funds: need {required} lamports, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("campaign id {campaign_id:?} is {len} bytes; ids must be 1 to 32 bytes")]
    InvalidSeedLength { campaign_id: String, len: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{claimant} does not hold the access token for campaign {campaign_id:?}")]
    NoToken { campaign_id: String, claimant: Pubkey },

    #[error("transaction rejected by the ledger: {0}")]
    LedgerRejected(String),

    /// The transaction was sent but not confirmed in time. It may still land;
    /// look up `signature` before retrying.
    #[error("transaction {signature} was not confirmed in time")]
    Unconfirmed { signature: Signature },

    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("invalid account data: {0}")]
    InvalidAccountData(String),
}

impl From<SdkError> for ClientError {
    fn from(error: SdkError) -> Self {
        match error {
            SdkError::InvalidSeedLength { campaign_id, len } => {
                ClientError::InvalidSeedLength { campaign_id, len }
            }
            SdkError::InvalidInput(message) => ClientError::InvalidInput(message),
            SdkError::MetadataDocument(e) => ClientError::InvalidInput(e.to_string()),
        }
    }
}
