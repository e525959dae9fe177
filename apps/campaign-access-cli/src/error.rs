use campaign_access_client::ClientError;
use campaign_access_sdk::SdkError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read keypair from '{path}': {message}")]
    Keypair { path: String, message: String },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("Access denied: {0}")]
    AccessDenied(String),
}

impl CliError {
    /// Message shown to the operator, with a hint for the failures they can act on.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Client(ClientError::AlreadyExists { campaign_id }) => format!(
                "Campaign {campaign_id:?} already exists; choose a different campaign id"
            ),
            CliError::Client(ClientError::NotFound { campaign_id }) => format!(
                "Campaign {campaign_id:?} not found; check the id and the RPC cluster"
            ),
            CliError::Client(ClientError::Unauthorized {
                campaign_id,
                signer,
            }) => format!(
                "Access denied: {signer} is not the authority of campaign {campaign_id:?}"
            ),
            CliError::Client(ClientError::NoToken {
                campaign_id,
                claimant,
            }) => format!(
                "Access denied: {claimant} does not hold the access token for {campaign_id:?}"
            ),
            CliError::Client(ClientError::InsufficientFunds {
                required,
                available,
            }) => format!(
                "Insufficient funds: the payer needs {required} lamports and has {available}"
            ),
            CliError::Client(ClientError::Unconfirmed { signature }) => format!(
                "Transaction {signature} was sent but not confirmed in time; \
                 check its status before retrying"
            ),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{pubkey::Pubkey, signature::Signature};

    #[test]
    fn test_already_exists_suggests_new_id() {
        let error = CliError::from(ClientError::AlreadyExists {
            campaign_id: "launch-42".to_string(),
        });
        let message = error.user_message();
        assert!(message.contains("launch-42"));
        assert!(message.contains("choose a different campaign id"));
    }

    #[test]
    fn test_unauthorized_and_no_token_read_as_access_denied() {
        let unauthorized = CliError::from(ClientError::Unauthorized {
            campaign_id: "launch-42".to_string(),
            signer: Pubkey::new_unique(),
        });
        assert!(unauthorized.user_message().starts_with("Access denied"));

        let no_token = CliError::from(ClientError::NoToken {
            campaign_id: "launch-42".to_string(),
            claimant: Pubkey::new_unique(),
        });
        assert!(no_token.user_message().starts_with("Access denied"));
    }

    #[test]
    fn test_unconfirmed_warns_before_retry() {
        let error = CliError::from(ClientError::Unconfirmed {
            signature: Signature::default(),
        });
        assert!(error.user_message().contains("before retrying"));
    }

    #[test]
    fn test_other_errors_use_display() {
        let error = CliError::InvalidConfig("missing campaign_id".to_string());
        assert_eq!(
            error.user_message(),
            "Invalid configuration: missing campaign_id"
        );
    }
}
