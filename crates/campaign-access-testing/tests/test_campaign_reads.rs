#![cfg(feature = "test-sbf")]

use campaign_access::CAMPAIGN_RECORD_V0_SEED_PREFIX;
use campaign_access_testing::{test_mint_params, TestFixture};
use solana_pubkey::Pubkey;
use solana_signer::Signer;

#[test]
fn test_repeated_reads_are_byte_identical() {
    let mut test = TestFixture::new();
    let creator = test.funded_keypair();
    test.try_mint_access_token(&creator, &creator.pubkey(), &test_mint_params("camp-1", 4))
        .unwrap();

    let first = test.fetch_campaign_data("camp-1").unwrap();
    let second = test.fetch_campaign_data("camp-1").unwrap();
    assert_eq!(first, second);

    // A verification in between is not a mutation
    test.try_verify_access(&creator, "camp-1").unwrap();
    assert_eq!(test.fetch_campaign_data("camp-1").unwrap(), first);
}

#[test]
fn test_record_lives_at_the_derived_address() {
    let mut test = TestFixture::new();
    let creator = test.funded_keypair();
    test.try_mint_access_token(&creator, &creator.pubkey(), &test_mint_params("launch-42", 5))
        .unwrap();

    let record = test.fetch_campaign_record("launch-42").unwrap();
    let recreated = Pubkey::create_program_address(
        &[CAMPAIGN_RECORD_V0_SEED_PREFIX, b"launch-42", &[record.bump]],
        &test.address_finder.program_id,
    )
    .unwrap();

    assert_eq!(recreated, test.campaign_address("launch-42"));
    assert!(test.account_exists(&recreated));

    let account = test.fetch_account(&recreated).unwrap();
    assert_eq!(account.owner, test.address_finder.program_id);
}

#[test]
fn test_unminted_campaign_has_no_record() {
    let test = TestFixture::new();
    assert!(test.fetch_campaign_record("camp-1").is_none());
    assert!(!test.account_exists(&test.campaign_address("camp-1")));
}
