use anchor_lang::prelude::*;

use crate::state::CampaignRecordV0;

/// Why access was granted or denied.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessReason {
    TokenHeld,
    CampaignNotFound,
    NoToken,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessDecision {
    pub granted: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    pub fn granted() -> Self {
        Self {
            granted: true,
            reason: AccessReason::TokenHeld,
        }
    }

    pub fn denied(reason: AccessReason) -> Self {
        Self {
            granted: false,
            reason,
        }
    }
}

/// The parts of a token account that matter for an access decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenHolding {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Decides whether `claimant` may access the campaign.
///
/// `campaign` is `None` when no record exists for the id, `holding` is `None`
/// when the claimant's associated token account does not exist.
pub fn evaluate_access(
    claimant: &Pubkey,
    campaign: Option<&CampaignRecordV0>,
    holding: Option<&TokenHolding>,
) -> AccessDecision {
    let Some(campaign) = campaign else {
        return AccessDecision::denied(AccessReason::CampaignNotFound);
    };

    match holding {
        Some(holding)
            if holding.mint == campaign.mint
                && holding.owner == *claimant
                && holding.amount >= 1 =>
        {
            AccessDecision::granted()
        }
        _ => AccessDecision::denied(AccessReason::NoToken),
    }
}
