use campaign_access_client::{CampaignAccessClient, ClientConfig};
use campaign_access_sdk::AddressFinder;
use clap::{Args, ValueEnum};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::error::{CliError, CliResult};

pub mod list;
pub mod mint;
pub mod show;
pub mod update;
pub mod verify;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// RPC endpoint
    #[arg(long, global = true, default_value = "http://127.0.0.1:8899")]
    pub rpc_url: String,

    #[arg(long, global = true, value_enum, default_value = "confirmed")]
    pub commitment: Commitment,

    /// Campaign access program id (defaults to the built-in id)
    #[arg(long, global = true)]
    pub program_id: Option<String>,
}

impl ConnectionArgs {
    pub fn client(&self) -> CliResult<CampaignAccessClient> {
        let mut address_finder = AddressFinder::default();
        if let Some(program_id) = &self.program_id {
            address_finder.program_id = Pubkey::from_str(program_id).map_err(|e| {
                CliError::InvalidConfig(format!("Invalid program id '{}': {}", program_id, e))
            })?;
        }

        debug!(
            "Connecting to {} ({:?}, program {})",
            self.rpc_url, self.commitment, address_finder.program_id
        );

        let config = ClientConfig {
            commitment: self.commitment.into(),
            ..ClientConfig::default()
        };
        let rpc_client = Arc::new(RpcClient::new_with_commitment(
            self.rpc_url.clone(),
            config.commitment,
        ));

        Ok(CampaignAccessClient::with_config(
            rpc_client,
            address_finder,
            config,
        ))
    }
}

pub fn load_keypair(path: &Path) -> CliResult<Keypair> {
    read_keypair_file(path).map_err(|e| CliError::Keypair {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Accepts a base58 pubkey or a path to a keypair file.
pub fn resolve_pubkey(value: &str) -> CliResult<Pubkey> {
    if let Ok(pubkey) = Pubkey::from_str(value) {
        return Ok(pubkey);
    }
    let keypair = load_keypair(Path::new(value))?;
    println!("🔑 {} -> {}", value, keypair.pubkey());
    Ok(keypair.pubkey())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::write_keypair_file;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_pubkey_accepts_base58() {
        let pubkey = Pubkey::new_unique();
        assert_eq!(resolve_pubkey(&pubkey.to_string()).unwrap(), pubkey);
    }

    #[test]
    fn test_resolve_pubkey_reads_keypair_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claimant.json");
        let keypair = Keypair::new();
        write_keypair_file(&keypair, &path).unwrap();

        assert_eq!(
            resolve_pubkey(path.to_str().unwrap()).unwrap(),
            keypair.pubkey()
        );
    }

    #[test]
    fn test_resolve_pubkey_reports_unreadable_path() {
        let err = resolve_pubkey("/nonexistent/claimant.json").unwrap_err();
        assert!(matches!(err, CliError::Keypair { .. }));
    }

    #[test]
    fn test_program_id_override() {
        let program_id = Pubkey::new_unique();
        let args = ConnectionArgs {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            commitment: Commitment::Finalized,
            program_id: Some(program_id.to_string()),
        };
        let client = args.client().unwrap();
        assert_eq!(client.address_finder().program_id, program_id);

        let bad = ConnectionArgs {
            program_id: Some("not-a-pubkey".to_string()),
            ..args
        };
        assert!(matches!(bad.client(), Err(CliError::InvalidConfig(_))));
    }
}
