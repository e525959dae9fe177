#![cfg(feature = "test-sbf")]

use anchor_lang::InstructionData;
use campaign_access::error::ErrorCode;
use campaign_access_sdk::build_mint_access_token_v0_ix;
use campaign_access_testing::{assert_program_error, test_mint_params, TestFixture};
use solana_instruction::error::InstructionError;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction_error::TransactionError;

/// Sends a mint whose instruction data bypasses client-side validation
fn send_raw_mint(
    test: &mut TestFixture,
    campaign_id: &str,
    data: campaign_access::instruction::MintAccessTokenV0,
) -> litesvm::types::TransactionResult {
    let payer = test.funded_keypair();
    let mint = Keypair::new();

    let (ix, _, _) = build_mint_access_token_v0_ix(
        &test.address_finder,
        &payer.pubkey(),
        &payer.pubkey(),
        &mint.pubkey(),
        &test_mint_params(campaign_id, 0),
    )
    .unwrap();
    send_with_data(test, ix, data, &payer, &mint)
}

fn send_with_data(
    test: &mut TestFixture,
    mut ix: solana_instruction::Instruction,
    data: campaign_access::instruction::MintAccessTokenV0,
    payer: &Keypair,
    mint: &Keypair,
) -> litesvm::types::TransactionResult {
    ix.data = data.data();
    test.send_instructions(&[ix], &[payer, mint])
}

/// Index of the campaign record in the mint instruction's accounts
const CAMPAIGN_ACCOUNT_INDEX: usize = 2;

fn raw_mint_data(campaign_id: &str) -> campaign_access::instruction::MintAccessTokenV0 {
    let params = test_mint_params(campaign_id, 0);
    campaign_access::instruction::MintAccessTokenV0 {
        campaign_id: params.campaign_id,
        display_name: params.display_name,
        symbol: params.symbol,
        metadata_uri: params.metadata_uri,
        agent_count: params.agent_count,
    }
}

#[test]
fn test_display_name_too_long() {
    let mut test = TestFixture::new();
    let mut data = raw_mint_data("limits");
    data.display_name = "n".repeat(33);

    let result = send_raw_mint(&mut test, "limits", data);
    assert_program_error(result, ErrorCode::DisplayNameTooLong);
    assert!(test.fetch_campaign_record("limits").is_none());
}

#[test]
fn test_symbol_too_long() {
    let mut test = TestFixture::new();
    let mut data = raw_mint_data("limits");
    data.symbol = "S".repeat(11);

    let result = send_raw_mint(&mut test, "limits", data);
    assert_program_error(result, ErrorCode::SymbolTooLong);
    assert!(test.fetch_campaign_record("limits").is_none());
}

#[test]
fn test_metadata_uri_too_long() {
    let mut test = TestFixture::new();
    let mut data = raw_mint_data("limits");
    data.metadata_uri = "u".repeat(201);

    let result = send_raw_mint(&mut test, "limits", data);
    assert_program_error(result, ErrorCode::MetadataUriTooLong);
    assert!(test.fetch_campaign_record("limits").is_none());
}

/// Fields at their limits are accepted
#[test]
fn test_fields_at_limits() {
    let mut test = TestFixture::new();
    let creator = test.funded_keypair();
    let campaign_id = "c".repeat(32);

    let mut params = test_mint_params(&campaign_id, u32::MAX);
    params.display_name = "n".repeat(32);
    params.symbol = "S".repeat(10);
    params.metadata_uri = "u".repeat(200);

    test.try_mint_access_token(&creator, &creator.pubkey(), &params)
        .expect("Fields at their limits should be accepted");

    let record = test.fetch_campaign_record(&campaign_id).unwrap();
    assert_eq!(record.campaign_id, campaign_id);
    assert_eq!(record.metadata_uri.len(), 200);
    assert_eq!(record.agent_count, u32::MAX);
}

/// A 33-byte id cannot be a seed: deriving the campaign address aborts the
/// program before the handler runs, so the failure is not a custom error and
/// nothing is created.
#[test]
fn test_oversized_campaign_id_aborts_without_state() {
    let mut test = TestFixture::new();
    test.disable_send_transaction_logging();
    let mut data = raw_mint_data("limits");
    data.campaign_id = "x".repeat(33);

    let result = send_raw_mint(&mut test, "limits", data);
    match result {
        Ok(_) => panic!("A 33-byte campaign id should be rejected"),
        Err(failed) => assert!(
            !matches!(
                failed.err,
                TransactionError::InstructionError(_, InstructionError::Custom(_))
            ),
            "Seed derivation should abort before any program error, got {:?}",
            failed.err
        ),
    }
    assert!(test.fetch_campaign_record("limits").is_none());
}

/// An empty id is a valid seed, so it reaches the handler and fails there
#[test]
fn test_empty_campaign_id_is_invalid_seed_length() {
    let mut test = TestFixture::new();
    let payer = test.funded_keypair();
    let mint = Keypair::new();

    let (mut ix, _, _) = build_mint_access_token_v0_ix(
        &test.address_finder,
        &payer.pubkey(),
        &payer.pubkey(),
        &mint.pubkey(),
        &test_mint_params("limits", 0),
    )
    .unwrap();
    let (empty_id_campaign, _) = Pubkey::find_program_address(
        &[campaign_access::CAMPAIGN_RECORD_V0_SEED_PREFIX, b""],
        &test.address_finder.program_id,
    );
    ix.accounts[CAMPAIGN_ACCOUNT_INDEX].pubkey = empty_id_campaign;

    let mut data = raw_mint_data("limits");
    data.campaign_id = String::new();

    let result = send_with_data(&mut test, ix, data, &payer, &mint);
    assert_program_error(result, ErrorCode::InvalidSeedLength);
    assert!(!test.account_exists(&empty_id_campaign));
}
