//! Decoding and classification with no RPC involved.

use anchor_lang::{AccountDeserialize, Discriminator};
use anchor_spl::token::{self, TokenAccount};
use campaign_access_sdk::{evaluate_access, CampaignRecordV0, ErrorCode, TokenHolding};
use solana_sdk::{
    account::Account, instruction::InstructionError, pubkey::Pubkey,
    transaction::TransactionError,
};
use tracing::warn;

use crate::{ClientError, ClientResult};

/// System program `ResultWithNegativeLamports`, surfaced through CPI when a
/// payer cannot fund a new account.
const SYSTEM_INSUFFICIENT_LAMPORTS: u32 = 1;

/// Decodes the account at a campaign address.
///
/// Mirrors the program: an empty account, one the program does not own, or a
/// record without a mint all read as "no campaign".
pub fn decode_campaign_record(
    program_id: &Pubkey,
    account: &Account,
) -> ClientResult<Option<CampaignRecordV0>> {
    if account.data.is_empty() || account.owner != *program_id {
        return Ok(None);
    }

    let record = CampaignRecordV0::try_deserialize(&mut account.data.as_slice()).map_err(|e| {
        ClientError::InvalidAccountData(format!("failed to deserialize campaign record: {}", e))
    })?;

    Ok(record.is_bound().then_some(record))
}

pub fn decode_token_holding(account: Option<&Account>) -> ClientResult<Option<TokenHolding>> {
    let Some(account) = account else {
        return Ok(None);
    };
    if account.data.is_empty() || account.owner != token::ID {
        return Ok(None);
    }

    let token_account = TokenAccount::try_deserialize(&mut account.data.as_slice()).map_err(|e| {
        ClientError::InvalidAccountData(format!("failed to deserialize token account: {}", e))
    })?;

    Ok(Some(TokenHolding {
        mint: token_account.mint,
        owner: token_account.owner,
        amount: token_account.amount,
    }))
}

/// Bytes a `getProgramAccounts` memcmp filter must match at offset 0.
pub fn campaign_record_filter_bytes() -> &'static [u8] {
    CampaignRecordV0::DISCRIMINATOR
}

/// Decodes scanned program accounts, skipping anything that is not a bound
/// campaign record. Sorted by campaign id.
pub fn decode_program_accounts(
    program_id: &Pubkey,
    accounts: Vec<(Pubkey, Account)>,
) -> Vec<(Pubkey, CampaignRecordV0)> {
    let mut records: Vec<_> = accounts
        .into_iter()
        .filter_map(|(address, account)| match decode_campaign_record(program_id, &account) {
            Ok(Some(record)) => Some((address, record)),
            Ok(None) => None,
            Err(e) => {
                warn!("Skipping account {}: {}", address, e);
                None
            }
        })
        .collect();

    records.sort_by(|a, b| a.1.campaign_id.cmp(&b.1.campaign_id));
    records
}

/// Keeps the records whose access token `owner` holds.
///
/// `token_accounts[i]` is the owner's associated token account for
/// `records[i].1.mint`, or `None` if it does not exist.
pub fn select_held_campaigns(
    owner: &Pubkey,
    records: Vec<(Pubkey, CampaignRecordV0)>,
    token_accounts: Vec<Option<Account>>,
) -> Vec<(Pubkey, CampaignRecordV0)> {
    records
        .into_iter()
        .zip(token_accounts)
        .filter(|((_, record), token_account)| {
            let holding = match decode_token_holding(token_account.as_ref()) {
                Ok(holding) => holding,
                Err(e) => {
                    warn!("Ignoring token account for mint {}: {}", record.mint, e);
                    None
                }
            };
            evaluate_access(owner, Some(record), holding.as_ref()).granted
        })
        .map(|(record, _)| record)
        .collect()
}

/// What a failed transaction means for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxFailure {
    AlreadyExists,
    NotFound,
    Unauthorized,
    InvalidSeedLength,
    InvalidInput(String),
    NoToken,
    InsufficientFunds,
    /// The only failure worth retrying with a fresh blockhash
    BlockhashExpired,
    Rejected(String),
}

impl TxFailure {
    pub fn is_transient(&self) -> bool {
        matches!(self, TxFailure::BlockhashExpired)
    }
}

pub fn classify_transaction_error(error: &TransactionError) -> TxFailure {
    match error {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            classify_custom_error(*code)
        }
        TransactionError::InstructionError(_, InstructionError::InsufficientFunds)
        | TransactionError::InsufficientFundsForFee
        | TransactionError::InsufficientFundsForRent { .. } => TxFailure::InsufficientFunds,
        TransactionError::BlockhashNotFound => TxFailure::BlockhashExpired,
        other => TxFailure::Rejected(other.to_string()),
    }
}

fn classify_custom_error(code: u32) -> TxFailure {
    let is = |error_code: ErrorCode| code == u32::from(error_code);

    if is(ErrorCode::CampaignAlreadyExists) {
        TxFailure::AlreadyExists
    } else if is(ErrorCode::CampaignNotFound) {
        TxFailure::NotFound
    } else if is(ErrorCode::Unauthorized) {
        TxFailure::Unauthorized
    } else if is(ErrorCode::InvalidSeedLength) {
        TxFailure::InvalidSeedLength
    } else if is(ErrorCode::NoToken) {
        TxFailure::NoToken
    } else if is(ErrorCode::DisplayNameTooLong)
        || is(ErrorCode::SymbolTooLong)
        || is(ErrorCode::MetadataUriTooLong)
        || is(ErrorCode::TokenAccountMismatch)
        || is(ErrorCode::EmptyPatch)
    {
        TxFailure::InvalidInput(format!("program error {}", code))
    } else if code == anchor_lang::error::ErrorCode::AccountNotInitialized as u32 {
        // update against a campaign address that was never created
        TxFailure::NotFound
    } else if code == SYSTEM_INSUFFICIENT_LAMPORTS {
        TxFailure::InsufficientFunds
    } else {
        TxFailure::Rejected(format!("custom program error: {:#x}", code))
    }
}
