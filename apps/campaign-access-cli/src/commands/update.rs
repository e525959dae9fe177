use campaign_access_client::{CampaignAccessClient, CampaignPatch};
use std::path::PathBuf;

use super::load_keypair;
use crate::error::{CliError, CliResult};

pub async fn execute(
    client: &CampaignAccessClient,
    keypair: PathBuf,
    campaign_id: String,
    display_name: Option<String>,
    symbol: Option<String>,
    metadata_uri: Option<String>,
    agent_count: Option<u32>,
) -> CliResult<()> {
    let patch = CampaignPatch {
        display_name,
        symbol,
        metadata_uri,
        agent_count,
    };
    if patch.is_empty() {
        return Err(CliError::InvalidConfig(
            "nothing to update; pass at least one of --name, --symbol, --uri, --agent-count"
                .to_string(),
        ));
    }

    let authority = load_keypair(&keypair)?;

    println!("✏️  Updating campaign {}", campaign_id);
    let signature = client
        .update_campaign_record(&authority, &campaign_id, patch)
        .await?;

    println!("✅ Campaign updated");
    println!("   Signature: {}", signature);

    Ok(())
}
