#![cfg(feature = "test-sbf")]

use campaign_access::{error::ErrorCode, AccessReason};
use campaign_access_sdk::build_verify_access_v0_ix;
use campaign_access_testing::{
    assert_program_error, test_mint_params, CampaignSnapshot, TestFixture,
};
use solana_pubkey::Pubkey;
use solana_signer::Signer;

#[test]
fn test_holder_is_granted_and_verification_changes_nothing() {
    let mut test = TestFixture::new();
    let creator = test.funded_keypair();
    test.try_mint_access_token(&creator, &creator.pubkey(), &test_mint_params("camp-1", 1))
        .unwrap();

    let decision = test.check_access(&creator.pubkey(), "camp-1");
    assert!(decision.granted);
    assert_eq!(decision.reason, AccessReason::TokenHeld);

    let before = CampaignSnapshot::capture_with_holders(&test, "camp-1", &[creator.pubkey()]);
    test.try_verify_access(&creator, "camp-1")
        .expect("Holder should be granted");
    let after = CampaignSnapshot::capture_with_holders(&test, "camp-1", &[creator.pubkey()]);

    assert_eq!(before, after);

    // Verifying again is fine; it is a read
    test.try_verify_access(&creator, "camp-1")
        .expect("Repeat verification should be granted");
}

#[test]
fn test_non_holder_gets_no_token() {
    let mut test = TestFixture::new();
    let creator = test.funded_keypair();
    let stranger = test.funded_keypair();
    test.try_mint_access_token(&creator, &creator.pubkey(), &test_mint_params("camp-1", 1))
        .unwrap();

    let decision = test.check_access(&stranger.pubkey(), "camp-1");
    assert!(!decision.granted);
    assert_eq!(decision.reason, AccessReason::NoToken);

    let result = test.try_verify_access(&stranger, "camp-1");
    assert_program_error(result, ErrorCode::NoToken);
}

#[test]
fn test_nonexistent_campaign_is_not_found() {
    let mut test = TestFixture::new();
    let claimant = test.funded_keypair();

    // Off-ledger: a denial, not an error
    let decision = test.check_access(&claimant.pubkey(), "nonexistent");
    assert!(!decision.granted);
    assert_eq!(decision.reason, AccessReason::CampaignNotFound);

    let result = test.try_verify_access(&claimant, "nonexistent");
    assert_program_error(result, ErrorCode::CampaignNotFound);
}

/// The token account passed must be the claimant's ATA for the campaign mint
#[test]
fn test_foreign_token_account_is_rejected() {
    let mut test = TestFixture::new();
    let creator = test.funded_keypair();
    test.try_mint_access_token(&creator, &creator.pubkey(), &test_mint_params("camp-1", 1))
        .unwrap();

    let wrong_mint = Pubkey::new_unique();
    let (ix, _, _) = build_verify_access_v0_ix(
        &test.address_finder,
        &creator.pubkey(),
        "camp-1",
        Some(&wrong_mint),
    )
    .unwrap();

    let result = test.send_instructions(&[ix], &[&creator]);
    assert_program_error(result, ErrorCode::TokenAccountMismatch);
}

/// Access follows the token, not the original recipient
#[test]
fn test_access_moves_with_the_token() {
    let mut test = TestFixture::new();
    let creator = test.funded_keypair();
    let successor = test.funded_keypair();
    let mint = test
        .try_mint_access_token(&creator, &creator.pubkey(), &test_mint_params("camp-1", 1))
        .unwrap();

    test.transfer_access_token(&creator, &successor.pubkey(), &mint)
        .expect("Transfer should succeed");

    assert_eq!(test.token_balance(&successor.pubkey(), &mint), 1);
    assert_eq!(test.token_balance(&creator.pubkey(), &mint), 0);

    test.try_verify_access(&successor, "camp-1")
        .expect("New holder should be granted");

    // The creator keeps an empty token account
    let decision = test.check_access(&creator.pubkey(), "camp-1");
    assert_eq!(decision.reason, AccessReason::NoToken);
    assert_program_error(test.try_verify_access(&creator, "camp-1"), ErrorCode::NoToken);

    // Authority is unaffected by where the token went
    let record = test.fetch_campaign_record("camp-1").unwrap();
    assert_eq!(record.authority, creator.pubkey());
}
