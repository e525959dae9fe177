/*!
# Campaign Access Client

Async client over the campaign access program.

- **Reads**: campaign records, token balances, off-ledger access checks and the
  owner scan behind `list_campaigns_for_owner`
- **Submissions**: mint, update and on-chain verification with retry on
  transient failures and bounded confirmation waits

## Usage

```no_run
use campaign_access_client::{CampaignAccessClient, ClientResult};
use solana_sdk::pubkey::Pubkey;

async fn example(claimant: Pubkey) -> ClientResult<()> {
    let client = CampaignAccessClient::new("http://127.0.0.1:8899".to_string());

    let decision = client.check_access(&claimant, "launch-42").await?;
    if decision.granted {
        println!("{} may access launch-42", claimant);
    }

    Ok(())
}
```
*/

pub mod client;
pub mod config;
pub mod errors;
pub mod query;
pub mod types;

pub use client::CampaignAccessClient;
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult};
pub use types::{MintReceipt, SimulationResult};

pub use campaign_access_sdk::{AccessDecision, AccessReason, CampaignPatch, CampaignRecordV0};
