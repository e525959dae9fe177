/*!
# Client Data Types

Receipts for submitted transactions and simulation results.
*/

use solana_client::rpc_response::RpcSimulateTransactionResult;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// Addresses created by a successful mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub signature: Signature,
    pub campaign: Pubkey,
    pub mint: Pubkey,
    pub authority_token_account: Pubkey,
}

/// Result of transaction simulation
#[derive(Debug)]
pub struct SimulationResult {
    /// Whether the simulation succeeded
    pub success: bool,
    /// Compute units consumed
    pub compute_units: Option<u64>,
    /// Error message if simulation failed
    pub error: Option<String>,
    /// Program log lines
    pub logs: Vec<String>,
    /// Raw simulation result
    pub raw: RpcSimulateTransactionResult,
}

impl SimulationResult {
    pub fn from_rpc_result(result: RpcSimulateTransactionResult) -> Self {
        let success = result.err.is_none();
        let compute_units = result.units_consumed;
        let error = result.err.as_ref().map(|e| e.to_string());
        let logs = result.logs.clone().unwrap_or_default();

        Self {
            success,
            compute_units,
            error,
            logs,
            raw: result,
        }
    }
}
