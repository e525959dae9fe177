use {
    anchor_lang::AccountDeserialize,
    anchor_spl::{
        metadata::mpl_token_metadata::{accounts::Metadata, ID as TOKEN_METADATA_PROGRAM_ID},
        token::{Mint, TokenAccount},
    },
    campaign_access::{
        error::ErrorCode, evaluate_access, AccessDecision, CampaignPatch, CampaignRecordV0,
        TokenHolding,
    },
    campaign_access_sdk::{
        build_mint_access_token_tx, build_update_campaign_tx, build_verify_access_tx,
        AddressFinder, MintAccessTokenParams,
    },
    litesvm::{
        types::{FailedTransactionMetadata, TransactionResult},
        LiteSVM,
    },
    solana_account::Account,
    solana_instruction::{error::InstructionError, Instruction},
    solana_keypair::Keypair,
    solana_message::Message,
    solana_pubkey::Pubkey,
    solana_signer::Signer as _,
    solana_sysvar::clock::Clock,
    solana_transaction::Transaction,
    solana_transaction_error::TransactionError,
};

use crate::TEST_FUNDING_LAMPORTS;

pub const CAMPAIGN_ACCESS_SO_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../target/deploy/campaign_access.so");

/// Dumped from a cluster, see `tests/fixtures/README.md`
pub const TOKEN_METADATA_SO_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mpl_token_metadata.so");

pub struct TestFixture {
    pub address_finder: AddressFinder,

    log_send_transaction_results: bool,
    svm: LiteSVM,
}

impl TestFixture {
    /// LiteSVM with the campaign access and token metadata programs loaded.
    /// The token and associated token programs ship with LiteSVM.
    pub fn new() -> Self {
        let address_finder = AddressFinder::default();
        let mut svm = LiteSVM::new();

        svm.add_program_from_file(address_finder.program_id, CAMPAIGN_ACCESS_SO_PATH)
            .unwrap_or_else(|e| {
                panic!("Failed to load {CAMPAIGN_ACCESS_SO_PATH} (run cargo build-sbf): {e:?}")
            });
        svm.add_program_from_file(TOKEN_METADATA_PROGRAM_ID, TOKEN_METADATA_SO_PATH)
            .unwrap_or_else(|e| {
                panic!("Failed to load {TOKEN_METADATA_SO_PATH} (see tests/fixtures/README.md): {e:?}")
            });

        Self {
            address_finder,
            log_send_transaction_results: true,
            svm,
        }
    }

    pub fn airdrop(&mut self, to: &Pubkey, amount: u64) {
        self.svm
            .airdrop(to, amount)
            .unwrap_or_else(|e| panic!("Failed to airdrop to {amount} {to}: {e:?}"));
    }

    pub fn funded_keypair(&mut self) -> Keypair {
        let keypair = Keypair::new();
        self.airdrop(&keypair.pubkey(), TEST_FUNDING_LAMPORTS);
        keypair
    }

    pub fn latest_blockhash(&self) -> solana_hash::Hash {
        self.svm.latest_blockhash()
    }

    pub fn unix_timestamp(&self) -> i64 {
        self.svm.get_sysvar::<Clock>().unix_timestamp
    }

    pub fn advance_clock_by(&mut self, seconds: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp += seconds;
        self.svm.set_sysvar(&clock);
    }

    pub fn disable_send_transaction_logging(&mut self) {
        self.log_send_transaction_results = false;
    }

    /// Send a transaction and optionally print logs based on the logging_enabled setting
    pub fn send_transaction(&mut self, tx: Transaction) -> TransactionResult {
        let result = self.svm.send_transaction(tx);

        // Identical follow-up transactions would otherwise share a signature
        self.svm.expire_blockhash();

        if self.log_send_transaction_results {
            match &result {
                Ok(meta) => {
                    println!("=== Transaction Logs (Success) ===");
                    for (i, log) in meta.logs.iter().enumerate() {
                        println!("{}: {}", i, log);
                    }
                    println!("=== End Logs ===\n");
                }
                Err(failed_meta) => {
                    println!("=== Transaction Logs (Failed) ===");
                    for (i, log) in failed_meta.meta.logs.iter().enumerate() {
                        println!("{}: {}", i, log);
                    }
                    println!("Error: {:?}", failed_meta.err);
                    println!("=== End Logs ===\n");
                }
            }
        }

        result
    }

    pub fn send_instructions(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> TransactionResult {
        let fee_payer = signers[0].pubkey();
        let tx = Transaction::new(
            signers,
            Message::new(instructions, Some(&fee_payer)),
            self.latest_blockhash(),
        );
        self.send_transaction(tx)
    }

    // ================================================================================================
    // Campaign access instructions
    // ================================================================================================

    /// Mints with a fresh mint keypair and returns the mint address.
    pub fn try_mint_access_token(
        &mut self,
        payer: &Keypair,
        authority: &Pubkey,
        params: &MintAccessTokenParams,
    ) -> Result<Pubkey, FailedTransactionMetadata> {
        let mint = Keypair::new();
        let mut tx = build_mint_access_token_tx(
            &self.address_finder,
            &payer.pubkey(),
            authority,
            &mint.pubkey(),
            params,
            self.latest_blockhash(),
        )
        .expect("Failed to build mint access token transaction");
        tx.sign(&[payer, &mint], self.latest_blockhash());

        self.send_transaction(tx)?;
        Ok(mint.pubkey())
    }

    /// The metadata account is derived from the recorded mint, or from the
    /// default pubkey when the campaign does not exist.
    pub fn try_update_campaign(
        &mut self,
        authority: &Keypair,
        campaign_id: &str,
        patch: CampaignPatch,
    ) -> TransactionResult {
        let mint = self
            .fetch_campaign_record(campaign_id)
            .map(|record| record.mint)
            .unwrap_or_default();

        let mut tx = build_update_campaign_tx(
            &self.address_finder,
            &authority.pubkey(),
            campaign_id,
            &mint,
            patch,
            self.latest_blockhash(),
        )
        .expect("Failed to build update campaign transaction");
        tx.sign(&[authority], self.latest_blockhash());

        self.send_transaction(tx)
    }

    pub fn try_verify_access(&mut self, claimant: &Keypair, campaign_id: &str) -> TransactionResult {
        let mint = self
            .fetch_campaign_record(campaign_id)
            .map(|record| record.mint);

        let mut tx = build_verify_access_tx(
            &self.address_finder,
            &claimant.pubkey(),
            campaign_id,
            mint.as_ref(),
            self.latest_blockhash(),
        )
        .expect("Failed to build verify access transaction");
        tx.sign(&[claimant], self.latest_blockhash());

        self.send_transaction(tx)
    }

    /// Moves one access token from `from` to `to`, creating `to`'s associated
    /// token account if needed. `from` pays.
    pub fn transfer_access_token(
        &mut self,
        from: &Keypair,
        to: &Pubkey,
        mint: &Pubkey,
    ) -> TransactionResult {
        let token_program_id = self.address_finder.token_program_id;
        let source = self
            .address_finder
            .find_associated_token_address(&from.pubkey(), mint);
        let destination = self.address_finder.find_associated_token_address(to, mint);

        let create_destination_ix =
            spl_associated_token_account::instruction::create_associated_token_account_idempotent(
                &from.pubkey(),
                to,
                mint,
                &token_program_id,
            );
        let transfer_ix = spl_token::instruction::transfer(
            &token_program_id,
            &source,
            &destination,
            &from.pubkey(),
            &[],
            1,
        )
        .expect("Failed to build transfer instruction");

        self.send_instructions(&[create_destination_ix, transfer_ix], &[from])
    }

    // ================================================================================================
    // Reads
    // ================================================================================================

    pub fn fetch_account(&self, address: &Pubkey) -> Option<Account> {
        self.svm.get_account(address)
    }

    pub fn account_exists(&self, address: &Pubkey) -> bool {
        self.fetch_account(address)
            .is_some_and(|account| account.lamports > 0)
    }

    pub fn campaign_address(&self, campaign_id: &str) -> Pubkey {
        self.address_finder
            .find_campaign_address(campaign_id)
            .expect("Invalid campaign id")
            .0
    }

    /// Raw account bytes of the campaign record, if any
    pub fn fetch_campaign_data(&self, campaign_id: &str) -> Option<Vec<u8>> {
        self.fetch_account(&self.campaign_address(campaign_id))
            .filter(|account| !account.data.is_empty())
            .map(|account| account.data)
    }

    pub fn fetch_campaign_record(&self, campaign_id: &str) -> Option<CampaignRecordV0> {
        self.fetch_campaign_data(campaign_id)
            .and_then(|data| CampaignRecordV0::try_deserialize(&mut &data[..]).ok())
            .filter(|record| record.is_bound())
    }

    pub fn fetch_mint(&self, mint: &Pubkey) -> Option<Mint> {
        self.fetch_account(mint)
            .and_then(|a| Mint::try_deserialize(&mut &a.data[..]).ok())
    }

    pub fn fetch_metadata(&self, mint: &Pubkey) -> Option<Metadata> {
        let (metadata_address, _) = self.address_finder.find_metadata_address(mint);
        self.fetch_account(&metadata_address)
            .and_then(|a| Metadata::safe_deserialize(&a.data).ok())
    }

    pub fn fetch_token_holding(&self, owner: &Pubkey, mint: &Pubkey) -> Option<TokenHolding> {
        let address = self.address_finder.find_associated_token_address(owner, mint);
        self.fetch_account(&address)
            .filter(|a| a.owner == self.address_finder.token_program_id)
            .and_then(|a| TokenAccount::try_deserialize(&mut &a.data[..]).ok())
            .map(|token_account| TokenHolding {
                mint: token_account.mint,
                owner: token_account.owner,
                amount: token_account.amount,
            })
    }

    /// Balance of `owner`'s associated token account, 0 if it doesn't exist
    pub fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64 {
        self.fetch_token_holding(owner, mint)
            .map(|holding| holding.amount)
            .unwrap_or(0)
    }

    /// The off-ledger decision the client makes, computed from fixture state
    pub fn check_access(&self, claimant: &Pubkey, campaign_id: &str) -> AccessDecision {
        let campaign = self.fetch_campaign_record(campaign_id);
        let holding = campaign
            .as_ref()
            .and_then(|campaign| self.fetch_token_holding(claimant, &campaign.mint));
        evaluate_access(claimant, campaign.as_ref(), holding.as_ref())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom program error code carried by a failed transaction, if any
pub fn custom_error_code(failed: &FailedTransactionMetadata) -> Option<u32> {
    match failed.err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}

/// Panics unless `result` failed with the program's `expected` error
pub fn assert_program_error(result: TransactionResult, expected: ErrorCode) {
    let expected_code = u32::from(expected);
    match result {
        Ok(_) => panic!("Expected {:?} ({}), transaction succeeded", expected, expected_code),
        Err(failed) => assert_eq!(
            custom_error_code(&failed),
            Some(expected_code),
            "Expected {:?}, got {:?}",
            expected,
            failed.err
        ),
    }
}
