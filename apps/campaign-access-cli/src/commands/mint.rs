use campaign_access_client::CampaignAccessClient;
use campaign_access_sdk::CampaignMetadataDocument;
use solana_sdk::signature::Signer;
use std::path::PathBuf;
use tracing::debug;

use super::{load_keypair, resolve_pubkey};
use crate::config::{CampaignConfig, MintOverrides};
use crate::error::CliResult;

pub async fn execute(
    client: &CampaignAccessClient,
    keypair: PathBuf,
    config: Option<PathBuf>,
    overrides: MintOverrides,
) -> CliResult<()> {
    let base = match &config {
        Some(path) => {
            println!("📋 Loading campaign config: {}", path.display());
            Some(CampaignConfig::load(path)?)
        }
        None => None,
    };
    let config = overrides.apply(base)?;
    debug!("Resolved campaign parameters: {:?}", config.params);
    let params = &config.params;
    params.validate()?;

    if let Some(path) = &config.metadata_document {
        println!("📄 Validating metadata document: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let document = CampaignMetadataDocument::from_json(&json)?;
        println!(
            "   {} ({} platforms, {} keywords)",
            document.name,
            document.platforms.len(),
            document.keywords.len()
        );
    }

    let payer = load_keypair(&keypair)?;
    let authority = match &config.authority {
        Some(value) => resolve_pubkey(value)?,
        None => payer.pubkey(),
    };

    let estimated_cost = client.estimate_mint_cost().await?;
    println!("🚀 Minting access token for campaign {}", params.campaign_id);
    println!("   Payer: {}", payer.pubkey());
    println!("   Authority: {}", authority);
    println!("   Estimated cost: {} lamports", estimated_cost);

    let receipt = client
        .mint_access_token(&payer, &authority, params)
        .await?;

    println!("✅ Campaign created");
    println!("   Campaign: {}", receipt.campaign);
    println!("   Mint: {}", receipt.mint);
    println!("   Token account: {}", receipt.authority_token_account);
    println!("   Signature: {}", receipt.signature);

    Ok(())
}
