/*!
# Campaign Access Client Implementation

Reads go straight to RPC. Submissions rebuild, re-sign and resend on transient
failures, then poll for confirmation under a deadline.
*/

use crate::{
    config::ClientConfig,
    errors::{ClientError, ClientResult},
    query::{
        campaign_record_filter_bytes, classify_transaction_error, decode_campaign_record,
        decode_program_accounts, decode_token_holding, select_held_campaigns, TxFailure,
    },
    types::{MintReceipt, SimulationResult},
};
use anchor_lang::{solana_program::program_pack::Pack, Space};
use anchor_spl::token::spl_token;
use backoff::future::retry;
use campaign_access_sdk::{
    build_mint_access_token_tx, build_update_campaign_tx, build_verify_access_tx,
    evaluate_access, AccessDecision, AddressFinder, CampaignPatch, CampaignRecordV0,
    MintAccessTokenParams,
};
use futures::future::try_join_all;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{
        RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSendTransactionConfig,
        RpcSimulateTransactionConfig,
    },
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{
    account::Account,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Size of a Metaplex metadata account
const METADATA_ACCOUNT_LEN: usize = 679;

/// Protocol fee the token metadata program charges on create
const METADATA_CREATE_FEE_LAMPORTS: u64 = 10_000_000;

const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// Campaign record, mint, token account and metadata, in that order
fn mint_account_sizes() -> [usize; 4] {
    [
        8 + CampaignRecordV0::INIT_SPACE,
        spl_token::state::Mint::LEN,
        spl_token::state::Account::LEN,
        METADATA_ACCOUNT_LEN,
    ]
}

/// Payer and mint keypair both sign
fn mint_cost(rents: &[u64]) -> u64 {
    rents.iter().sum::<u64>() + METADATA_CREATE_FEE_LAMPORTS + 2 * LAMPORTS_PER_SIGNATURE
}

/// Why a submission stopped
enum SendFailure {
    Transaction(TxFailure),
    Unconfirmed(Signature),
    Rpc(solana_client::client_error::ClientError),
    Client(ClientError),
}

/// What a failure is reported against
struct SubmitContext<'a> {
    campaign_id: &'a str,
    signer: Pubkey,
    fee_payer: Pubkey,
    required_lamports: u64,
}

/// Async client for campaign access reads and submissions
pub struct CampaignAccessClient {
    rpc_client: Arc<RpcClient>,
    address_finder: AddressFinder,
    config: ClientConfig,
}

impl CampaignAccessClient {
    /// Create new client with default configuration
    pub fn new(rpc_url: String) -> Self {
        let config = ClientConfig::default();
        let rpc_client = Arc::new(RpcClient::new_with_commitment(rpc_url, config.commitment));
        Self::with_config(rpc_client, AddressFinder::default(), config)
    }

    pub fn with_config(
        rpc_client: Arc<RpcClient>,
        address_finder: AddressFinder,
        config: ClientConfig,
    ) -> Self {
        Self {
            rpc_client,
            address_finder,
            config,
        }
    }

    pub fn address_finder(&self) -> &AddressFinder {
        &self.address_finder
    }

    pub fn rpc_client(&self) -> &RpcClient {
        &self.rpc_client
    }

    // ================================================================================================
    // Reads
    // ================================================================================================

    /// `None` when no campaign exists for the id. RPC failures are errors.
    pub async fn get_campaign_record(
        &self,
        campaign_id: &str,
    ) -> ClientResult<Option<CampaignRecordV0>> {
        let (campaign_address, _) = self.address_finder.find_campaign_address(campaign_id)?;
        self.get_campaign_record_at(&campaign_address).await
    }

    pub async fn get_campaign_record_at(
        &self,
        campaign_address: &Pubkey,
    ) -> ClientResult<Option<CampaignRecordV0>> {
        let account = self.get_account(campaign_address).await?;
        match account {
            Some(account) => decode_campaign_record(&self.address_finder.program_id, &account),
            None => Ok(None),
        }
    }

    /// Balance of `owner`'s associated token account for `mint`; zero if the
    /// account does not exist.
    pub async fn get_token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> ClientResult<u64> {
        let token_account_address = self.address_finder.find_associated_token_address(owner, mint);
        let account = self.get_account(&token_account_address).await?;
        let holding = decode_token_holding(account.as_ref())?;
        Ok(holding.map(|holding| holding.amount).unwrap_or(0))
    }

    /// Off-ledger access decision. A missing campaign or token account is a
    /// denial, not an error.
    pub async fn check_access(
        &self,
        claimant: &Pubkey,
        campaign_id: &str,
    ) -> ClientResult<AccessDecision> {
        let Some(campaign) = self.get_campaign_record(campaign_id).await? else {
            debug!("Campaign {} not found", campaign_id);
            return Ok(evaluate_access(claimant, None, None));
        };

        let token_account_address = self
            .address_finder
            .find_associated_token_address(claimant, &campaign.mint);
        let account = self.get_account(&token_account_address).await?;
        let holding = decode_token_holding(account.as_ref())?;

        let decision = evaluate_access(claimant, Some(&campaign), holding.as_ref());
        debug!(
            "Access check for {} on {}: {:?}",
            claimant, campaign_id, decision.reason
        );
        Ok(decision)
    }

    /// Campaigns whose access token `owner` currently holds.
    ///
    /// Scans every campaign record, so cost grows with the number of
    /// campaigns. Use an indexer when that matters.
    pub async fn list_campaigns_for_owner(
        &self,
        owner: &Pubkey,
    ) -> ClientResult<Vec<(Pubkey, CampaignRecordV0)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                0,
                campaign_record_filter_bytes(),
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.config.commitment),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .rpc_client
            .get_program_accounts_with_config(&self.address_finder.program_id, config)
            .await?;
        let records = decode_program_accounts(&self.address_finder.program_id, accounts);
        debug!("Scanned {} campaign records", records.len());

        let token_account_addresses: Vec<Pubkey> = records
            .iter()
            .map(|(_, record)| {
                self.address_finder
                    .find_associated_token_address(owner, &record.mint)
            })
            .collect();

        let batches = try_join_all(
            token_account_addresses
                .chunks(self.config.account_batch_size.max(1))
                .map(|chunk| {
                    self.rpc_client
                        .get_multiple_accounts_with_commitment(chunk, self.config.commitment)
                }),
        )
        .await?;
        let token_accounts: Vec<Option<Account>> =
            batches.into_iter().flat_map(|batch| batch.value).collect();

        Ok(select_held_campaigns(owner, records, token_accounts))
    }

    /// Lamports a mint needs: rent for the four new accounts plus fees.
    pub async fn estimate_mint_cost(&self) -> ClientResult<u64> {
        let rents = try_join_all(
            mint_account_sizes()
                .iter()
                .map(|len| self.rpc_client.get_minimum_balance_for_rent_exemption(*len)),
        )
        .await?;

        Ok(mint_cost(&rents))
    }

    // ================================================================================================
    // Submissions
    // ================================================================================================

    /// Creates the campaign, its one-unit mint and metadata, and delivers the
    /// token to `authority`.
    pub async fn mint_access_token(
        &self,
        payer: &Keypair,
        authority: &Pubkey,
        params: &MintAccessTokenParams,
    ) -> ClientResult<MintReceipt> {
        params.validate()?;
        let campaign_id = params.campaign_id.as_str();

        if self.get_campaign_record(campaign_id).await?.is_some() {
            return Err(ClientError::AlreadyExists {
                campaign_id: campaign_id.to_string(),
            });
        }

        let required_lamports = self.estimate_mint_cost().await?;
        if self.config.verify_balance_before_send {
            let available = self.rpc_client.get_balance(&payer.pubkey()).await?;
            if available < required_lamports {
                return Err(ClientError::InsufficientFunds {
                    required: required_lamports,
                    available,
                });
            }
            debug!(
                "Balance check passed: {} lamports available, {} required",
                available, required_lamports
            );
        }

        let mint = Keypair::new();
        let context = SubmitContext {
            campaign_id,
            signer: payer.pubkey(),
            fee_payer: payer.pubkey(),
            required_lamports,
        };

        let signature = self
            .submit(&context, &[payer, &mint], |recent_blockhash| {
                build_mint_access_token_tx(
                    &self.address_finder,
                    &payer.pubkey(),
                    authority,
                    &mint.pubkey(),
                    params,
                    recent_blockhash,
                )
                .map_err(ClientError::from)
            })
            .await?;

        let (campaign, _) = self.address_finder.find_campaign_address(campaign_id)?;
        let receipt = MintReceipt {
            signature,
            campaign,
            mint: mint.pubkey(),
            authority_token_account: self
                .address_finder
                .find_associated_token_address(authority, &mint.pubkey()),
        };

        info!(
            "Minted access token for {} (mint {}, signature {})",
            campaign_id, receipt.mint, signature
        );
        Ok(receipt)
    }

    /// Applies `patch` to the campaign. Only the recorded authority may do so.
    pub async fn update_campaign_record(
        &self,
        authority: &Keypair,
        campaign_id: &str,
        patch: CampaignPatch,
    ) -> ClientResult<Signature> {
        let Some(campaign) = self.get_campaign_record(campaign_id).await? else {
            return Err(ClientError::NotFound {
                campaign_id: campaign_id.to_string(),
            });
        };
        if campaign.authority != authority.pubkey() {
            return Err(ClientError::Unauthorized {
                campaign_id: campaign_id.to_string(),
                signer: authority.pubkey(),
            });
        }

        let context = SubmitContext {
            campaign_id,
            signer: authority.pubkey(),
            fee_payer: authority.pubkey(),
            required_lamports: LAMPORTS_PER_SIGNATURE,
        };

        let signature = self
            .submit(&context, &[authority], |recent_blockhash| {
                build_update_campaign_tx(
                    &self.address_finder,
                    &authority.pubkey(),
                    campaign_id,
                    &campaign.mint,
                    patch.clone(),
                    recent_blockhash,
                )
                .map_err(ClientError::from)
            })
            .await?;

        info!("Updated campaign {} (signature {})", campaign_id, signature);
        Ok(signature)
    }

    /// Proves access on the ledger. The returned signature is the receipt.
    pub async fn verify_access_on_chain(
        &self,
        claimant: &Keypair,
        campaign_id: &str,
    ) -> ClientResult<Signature> {
        let Some(campaign) = self.get_campaign_record(campaign_id).await? else {
            return Err(ClientError::NotFound {
                campaign_id: campaign_id.to_string(),
            });
        };

        let context = SubmitContext {
            campaign_id,
            signer: claimant.pubkey(),
            fee_payer: claimant.pubkey(),
            required_lamports: LAMPORTS_PER_SIGNATURE,
        };

        let signature = self
            .submit(&context, &[claimant], |recent_blockhash| {
                build_verify_access_tx(
                    &self.address_finder,
                    &claimant.pubkey(),
                    campaign_id,
                    Some(&campaign.mint),
                    recent_blockhash,
                )
                .map_err(ClientError::from)
            })
            .await?;

        info!(
            "Access verified for {} on {} (signature {})",
            claimant.pubkey(),
            campaign_id,
            signature
        );
        Ok(signature)
    }

    /// Runs `verify_access_v0` without a signature or fee.
    pub async fn simulate_verify_access(
        &self,
        claimant: &Pubkey,
        campaign_id: &str,
    ) -> ClientResult<SimulationResult> {
        let campaign = self.get_campaign_record(campaign_id).await?;
        let recent_blockhash = self.rpc_client.get_latest_blockhash().await?;
        let transaction = build_verify_access_tx(
            &self.address_finder,
            claimant,
            campaign_id,
            campaign.as_ref().map(|campaign| &campaign.mint),
            recent_blockhash,
        )?;

        let config = RpcSimulateTransactionConfig {
            sig_verify: false,
            replace_recent_blockhash: true,
            commitment: Some(self.config.commitment),
            ..Default::default()
        };
        let response = self
            .rpc_client
            .simulate_transaction_with_config(&transaction, config)
            .await?;

        Ok(SimulationResult::from_rpc_result(response.value))
    }

    // ================================================================================================
    // Internals
    // ================================================================================================

    async fn get_account(&self, address: &Pubkey) -> ClientResult<Option<Account>> {
        let response = self
            .rpc_client
            .get_account_with_commitment(address, self.config.commitment)
            .await?;
        Ok(response.value)
    }

    /// Builds, signs, sends and confirms, retrying transient failures with a
    /// fresh blockhash.
    async fn submit<F>(
        &self,
        context: &SubmitContext<'_>,
        signers: &[&Keypair],
        build: F,
    ) -> ClientResult<Signature>
    where
        F: Fn(Hash) -> ClientResult<Transaction>,
    {
        let last_signature: Mutex<Option<Signature>> = Mutex::new(None);
        let last_signature = &last_signature;
        let build = &build;

        let result = retry(self.config.retry_backoff.clone(), || async move {
            // A resend after a transport error must not duplicate a landed attempt
            let previous = last_signature.lock().map(|guard| *guard).unwrap_or(None);
            if let Some(previous) = previous {
                match self
                    .rpc_client
                    .get_signature_status_with_commitment(&previous, self.config.commitment)
                    .await
                {
                    Ok(Some(Ok(()))) => return Ok(previous),
                    Ok(Some(Err(e))) => {
                        return Err(backoff::Error::Permanent(SendFailure::Transaction(
                            classify_transaction_error(&e),
                        )))
                    }
                    _ => {}
                }
            }

            let recent_blockhash = self.rpc_client.get_latest_blockhash().await.map_err(|e| {
                backoff::Error::Transient {
                    err: SendFailure::Rpc(e),
                    retry_after: None,
                }
            })?;

            let mut transaction = build(recent_blockhash)
                .map_err(|e| backoff::Error::Permanent(SendFailure::Client(e)))?;
            transaction.try_sign(signers, recent_blockhash).map_err(|e| {
                backoff::Error::Permanent(SendFailure::Client(ClientError::InvalidInput(
                    format!("failed to sign transaction: {}", e),
                )))
            })?;

            let send_config = RpcSendTransactionConfig {
                skip_preflight: false,
                preflight_commitment: Some(self.config.commitment.commitment),
                ..Default::default()
            };
            let signature = match self
                .rpc_client
                .send_transaction_with_config(&transaction, send_config)
                .await
            {
                Ok(signature) => signature,
                Err(e) => return Err(classify_send_error(e)),
            };
            if let Ok(mut guard) = last_signature.lock() {
                *guard = Some(signature);
            }
            debug!("Sent {} for campaign {}", signature, context.campaign_id);

            self.await_confirmation(&signature, &recent_blockhash).await
        })
        .await;

        match result {
            Ok(signature) => Ok(signature),
            Err(failure) => Err(self.failure_to_error(failure, context).await),
        }
    }

    async fn await_confirmation(
        &self,
        signature: &Signature,
        recent_blockhash: &Hash,
    ) -> Result<Signature, backoff::Error<SendFailure>> {
        let commitment = self.config.commitment;

        let poll = async {
            loop {
                match self
                    .rpc_client
                    .get_signature_status_with_commitment(signature, commitment)
                    .await
                {
                    Ok(Some(Ok(()))) => return Ok(*signature),
                    Ok(Some(Err(e))) => {
                        let failure = classify_transaction_error(&e);
                        return Err(if failure.is_transient() {
                            backoff::Error::Transient {
                                err: SendFailure::Transaction(failure),
                                retry_after: None,
                            }
                        } else {
                            backoff::Error::Permanent(SendFailure::Transaction(failure))
                        });
                    }
                    Ok(None) => {
                        let still_valid = self
                            .rpc_client
                            .is_blockhash_valid(recent_blockhash, commitment)
                            .await
                            .unwrap_or(true);
                        if !still_valid {
                            warn!("Blockhash expired before {} landed", signature);
                            return Err(backoff::Error::Transient {
                                err: SendFailure::Transaction(TxFailure::BlockhashExpired),
                                retry_after: None,
                            });
                        }
                    }
                    Err(e) => debug!("Status poll for {} failed: {}", signature, e),
                }
                tokio::time::sleep(self.config.poll_interval).await;
            }
        };

        match tokio::time::timeout(self.config.confirmation_timeout, poll).await {
            Ok(result) => result,
            Err(_) => Err(backoff::Error::Permanent(SendFailure::Unconfirmed(
                *signature,
            ))),
        }
    }

    async fn failure_to_error(
        &self,
        failure: SendFailure,
        context: &SubmitContext<'_>,
    ) -> ClientError {
        let campaign_id = context.campaign_id.to_string();
        match failure {
            SendFailure::Unconfirmed(signature) => ClientError::Unconfirmed { signature },
            SendFailure::Rpc(e) => ClientError::Rpc(e),
            SendFailure::Client(e) => e,
            SendFailure::Transaction(failure) => match failure {
                TxFailure::AlreadyExists => ClientError::AlreadyExists { campaign_id },
                TxFailure::NotFound => ClientError::NotFound { campaign_id },
                TxFailure::Unauthorized => ClientError::Unauthorized {
                    campaign_id,
                    signer: context.signer,
                },
                TxFailure::InvalidSeedLength => ClientError::InvalidSeedLength {
                    len: campaign_id.len(),
                    campaign_id,
                },
                TxFailure::InvalidInput(message) => ClientError::InvalidInput(message),
                TxFailure::NoToken => ClientError::NoToken {
                    campaign_id,
                    claimant: context.signer,
                },
                TxFailure::InsufficientFunds => {
                    let available = self
                        .rpc_client
                        .get_balance(&context.fee_payer)
                        .await
                        .unwrap_or(0);
                    ClientError::InsufficientFunds {
                        required: context.required_lamports,
                        available,
                    }
                }
                TxFailure::BlockhashExpired => ClientError::LedgerRejected(
                    "blockhash expired on every attempt".to_string(),
                ),
                TxFailure::Rejected(message) => ClientError::LedgerRejected(message),
            },
        }
    }
}

fn classify_send_error(
    error: solana_client::client_error::ClientError,
) -> backoff::Error<SendFailure> {
    match error.get_transaction_error() {
        Some(transaction_error) => {
            let failure = classify_transaction_error(&transaction_error);
            warn!("Transaction rejected: {}", transaction_error);
            if failure.is_transient() {
                backoff::Error::Transient {
                    err: SendFailure::Transaction(failure),
                    retry_after: None,
                }
            } else {
                backoff::Error::Permanent(SendFailure::Transaction(failure))
            }
        }
        None => {
            warn!("Send attempt failed: {}", error);
            backoff::Error::Transient {
                err: SendFailure::Rpc(error),
                retry_after: None,
            }
        }
    }
}
