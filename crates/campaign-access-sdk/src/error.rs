use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("campaign id {campaign_id:?} is {len} bytes; ids must be 1 to 32 bytes")]
    InvalidSeedLength { campaign_id: String, len: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("metadata document error: {0}")]
    MetadataDocument(#[from] serde_json::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
