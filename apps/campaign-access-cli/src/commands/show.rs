use campaign_access_client::{CampaignAccessClient, CampaignRecordV0};
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// JSON view of a campaign record
#[derive(Debug, Serialize)]
struct CampaignView {
    address: String,
    campaign_id: String,
    mint: String,
    authority: String,
    display_name: String,
    symbol: String,
    metadata_uri: String,
    agent_count: u32,
    created_at: i64,
    updated_at: i64,
}

impl CampaignView {
    fn new(address: String, record: CampaignRecordV0) -> Self {
        Self {
            address,
            campaign_id: record.campaign_id,
            mint: record.mint.to_string(),
            authority: record.authority.to_string(),
            display_name: record.display_name,
            symbol: record.symbol,
            metadata_uri: record.metadata_uri,
            agent_count: record.agent_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub async fn execute(
    client: &CampaignAccessClient,
    campaign_id: String,
    json: bool,
) -> CliResult<()> {
    let (address, _) = client.address_finder().find_campaign_address(&campaign_id)?;
    let Some(record) = client.get_campaign_record_at(&address).await? else {
        return Err(CliError::Client(
            campaign_access_client::ClientError::NotFound { campaign_id },
        ));
    };

    let view = CampaignView::new(address.to_string(), record);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("📊 Campaign {}", view.campaign_id);
    println!("   Address: {}", view.address);
    println!("   Name: {}", view.display_name);
    println!("   Symbol: {}", view.symbol);
    println!("   Metadata URI: {}", view.metadata_uri);
    println!("   Mint: {}", view.mint);
    println!("   Authority: {}", view.authority);
    println!("   Agents: {}", view.agent_count);
    println!("   Created: {}", view.created_at);
    println!("   Updated: {}", view.updated_at);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn test_campaign_view_json_uses_base58_keys() {
        let mint = Pubkey::new_unique();
        let record = CampaignRecordV0 {
            mint,
            authority: Pubkey::new_unique(),
            campaign_id: "launch-42".to_string(),
            display_name: "Launch 42".to_string(),
            symbol: "L42".to_string(),
            metadata_uri: "https://example.com/launch-42.json".to_string(),
            agent_count: 5,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_060,
            bump: 254,
        };

        let view = CampaignView::new("addr".to_string(), record);
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["mint"], mint.to_string());
        assert_eq!(value["campaign_id"], "launch-42");
        assert_eq!(value["agent_count"], 5);
        assert_eq!(value["updated_at"], 1_700_000_060);
        assert!(value.get("bump").is_none());
    }
}
