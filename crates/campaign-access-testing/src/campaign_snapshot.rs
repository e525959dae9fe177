use std::collections::HashMap;

use solana_pubkey::Pubkey;

use crate::TestFixture;

/// Raw on-ledger state of one campaign, for before/after comparisons.
///
/// Byte-level so that "unchanged" means unchanged, including fields a decoder
/// would ignore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignSnapshot {
    pub campaign_data: Option<Vec<u8>>,
    pub metadata_data: Option<Vec<u8>>,
    pub mint_data: Option<Vec<u8>>,
    /// Access token balances of the tracked principals
    pub balances: HashMap<Pubkey, u64>,
}

impl CampaignSnapshot {
    pub fn capture(test: &TestFixture, campaign_id: &str) -> Self {
        Self::capture_with_holders(test, campaign_id, &[])
    }

    pub fn capture_with_holders(test: &TestFixture, campaign_id: &str, holders: &[Pubkey]) -> Self {
        let record = test.fetch_campaign_record(campaign_id);
        let mint = record.as_ref().map(|record| record.mint);

        let metadata_data = mint.and_then(|mint| {
            let (metadata_address, _) = test.address_finder.find_metadata_address(&mint);
            test.fetch_account(&metadata_address).map(|a| a.data)
        });
        let mint_data = mint.and_then(|mint| test.fetch_account(&mint).map(|a| a.data));

        let balances = holders
            .iter()
            .map(|holder| {
                let balance = mint
                    .map(|mint| test.token_balance(holder, &mint))
                    .unwrap_or(0);
                (*holder, balance)
            })
            .collect();

        Self {
            campaign_data: test.fetch_campaign_data(campaign_id),
            metadata_data,
            mint_data,
            balances,
        }
    }
}
