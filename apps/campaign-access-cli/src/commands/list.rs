use campaign_access_client::CampaignAccessClient;

use super::resolve_pubkey;
use crate::error::CliResult;

pub async fn execute(client: &CampaignAccessClient, owner: String) -> CliResult<()> {
    let owner = resolve_pubkey(&owner)?;
    println!("🔍 Scanning campaigns held by {}", owner);

    let campaigns = client.list_campaigns_for_owner(&owner).await?;
    if campaigns.is_empty() {
        println!("❌ {} holds no campaign access tokens", owner);
        return Ok(());
    }

    println!("✅ {} campaign(s):", campaigns.len());
    for (address, record) in campaigns {
        println!(
            "   {} ({}) {} [{}]",
            record.campaign_id, record.symbol, record.display_name, address
        );
    }

    Ok(())
}
