use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{prelude::*, InstructionData as _};
use campaign_access::CampaignPatch;

use crate::params::validate_patch;
use crate::{validate_campaign_id, AddressFinder, MintAccessTokenParams, SdkResult};

/// `mint` is the address of a fresh keypair that must also sign.
pub fn build_mint_access_token_v0_ix(
    address_finder: &AddressFinder,
    payer: &Pubkey,
    authority: &Pubkey,
    mint: &Pubkey,
    params: &MintAccessTokenParams,
) -> SdkResult<(
    Instruction,
    campaign_access::accounts::MintAccessTokenV0,
    campaign_access::instruction::MintAccessTokenV0,
)> {
    params.validate()?;

    let (campaign, _) = address_finder.find_campaign_address(&params.campaign_id)?;
    let (metadata, _) = address_finder.find_metadata_address(mint);

    let ix_accounts = campaign_access::accounts::MintAccessTokenV0 {
        payer: *payer,
        authority: *authority,
        campaign,
        mint: *mint,
        authority_token_account: address_finder.find_associated_token_address(authority, mint),
        metadata,
        token_program: address_finder.token_program_id,
        associated_token_program: address_finder.associated_token_program_id,
        token_metadata_program: address_finder.token_metadata_program_id,
        system_program: address_finder.system_program_id,
        rent: address_finder.rent_id,
    };

    let ix_data = campaign_access::instruction::MintAccessTokenV0 {
        campaign_id: params.campaign_id.clone(),
        display_name: params.display_name.clone(),
        symbol: params.symbol.clone(),
        metadata_uri: params.metadata_uri.clone(),
        agent_count: params.agent_count,
    };

    // The mint is created from a keypair, so it must sign
    let mut account_metas = ix_accounts.to_account_metas(None);
    for meta in account_metas.iter_mut().filter(|meta| meta.pubkey == *mint) {
        meta.is_signer = true;
    }

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: account_metas,
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

/// `mint` is the campaign's recorded mint, used to locate its metadata account.
pub fn build_update_campaign_v0_ix(
    address_finder: &AddressFinder,
    authority: &Pubkey,
    campaign_id: &str,
    mint: &Pubkey,
    patch: CampaignPatch,
) -> SdkResult<(
    Instruction,
    campaign_access::accounts::UpdateCampaignV0,
    campaign_access::instruction::UpdateCampaignV0,
)> {
    validate_patch(&patch)?;

    let (campaign, _) = address_finder.find_campaign_address(campaign_id)?;
    let (metadata, _) = address_finder.find_metadata_address(mint);

    let ix_accounts = campaign_access::accounts::UpdateCampaignV0 {
        authority: *authority,
        campaign,
        metadata,
        token_metadata_program: address_finder.token_metadata_program_id,
    };

    let ix_data = campaign_access::instruction::UpdateCampaignV0 {
        campaign_id: campaign_id.to_string(),
        patch,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

/// `mint` is `None` when the campaign is not known to exist; the program then
/// rejects with `CampaignNotFound` before looking at the token account.
pub fn build_verify_access_v0_ix(
    address_finder: &AddressFinder,
    claimant: &Pubkey,
    campaign_id: &str,
    mint: Option<&Pubkey>,
) -> SdkResult<(
    Instruction,
    campaign_access::accounts::VerifyAccessV0,
    campaign_access::instruction::VerifyAccessV0,
)> {
    validate_campaign_id(campaign_id)?;

    let (campaign, _) = address_finder.find_campaign_address(campaign_id)?;
    let mint = mint.copied().unwrap_or_default();

    let ix_accounts = campaign_access::accounts::VerifyAccessV0 {
        claimant: *claimant,
        campaign,
        claimant_token_account: address_finder.find_associated_token_address(claimant, &mint),
    };

    let ix_data = campaign_access::instruction::VerifyAccessV0 {
        campaign_id: campaign_id.to_string(),
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SdkError;
    use anchor_lang::Discriminator;

    fn params() -> MintAccessTokenParams {
        MintAccessTokenParams {
            campaign_id: "launch-42".to_string(),
            display_name: "Launch 42".to_string(),
            symbol: "L42".to_string(),
            metadata_uri: "https://example.com/launch-42.json".to_string(),
            agent_count: 4,
        }
    }

    #[test]
    fn test_mint_ix_signers_and_writables() {
        let finder = AddressFinder::default();
        let payer = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let (ix, accounts, _) =
            build_mint_access_token_v0_ix(&finder, &payer, &authority, &mint, &params()).unwrap();

        assert_eq!(ix.program_id, campaign_access::ID);
        assert!(ix.data.starts_with(campaign_access::instruction::MintAccessTokenV0::DISCRIMINATOR));

        let signers: Vec<Pubkey> = ix
            .accounts
            .iter()
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect();
        assert_eq!(signers, vec![payer, mint]);

        let writable = |key: &Pubkey| {
            ix.accounts
                .iter()
                .any(|meta| meta.pubkey == *key && meta.is_writable)
        };
        assert!(writable(&accounts.campaign));
        assert!(writable(&accounts.metadata));
        assert!(writable(&accounts.authority_token_account));
        assert_eq!(
            accounts.authority_token_account,
            finder.find_associated_token_address(&authority, &mint)
        );
    }

    #[test]
    fn test_mint_ix_rejects_invalid_params() {
        let finder = AddressFinder::default();
        let key = Pubkey::new_unique();
        let mut params = params();
        params.campaign_id = "c".repeat(40);

        let result = build_mint_access_token_v0_ix(&finder, &key, &key, &key, &params);
        assert!(matches!(result, Err(SdkError::InvalidSeedLength { len: 40, .. })));
    }

    #[test]
    fn test_update_ix_rejects_empty_patch() {
        let finder = AddressFinder::default();
        let key = Pubkey::new_unique();
        let result =
            build_update_campaign_v0_ix(&finder, &key, "launch-42", &key, CampaignPatch::default());
        assert!(matches!(result, Err(SdkError::InvalidInput(_))));
    }

    #[test]
    fn test_update_ix_targets_campaign_metadata() {
        let finder = AddressFinder::default();
        let authority = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let (ix, accounts, data) = build_update_campaign_v0_ix(
            &finder,
            &authority,
            "launch-42",
            &mint,
            CampaignPatch {
                agent_count: Some(7),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(accounts.metadata, finder.find_metadata_address(&mint).0);
        assert_eq!(data.patch.agent_count, Some(7));
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[0].pubkey, authority);
    }

    #[test]
    fn test_verify_ix_uses_claimant_ata() {
        let finder = AddressFinder::default();
        let claimant = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let (ix, accounts, _) =
            build_verify_access_v0_ix(&finder, &claimant, "launch-42", Some(&mint)).unwrap();

        assert_eq!(
            accounts.claimant_token_account,
            finder.find_associated_token_address(&claimant, &mint)
        );
        assert!(ix.accounts.iter().all(|meta| !meta.is_writable));
    }
}
