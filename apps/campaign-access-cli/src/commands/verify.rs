use campaign_access_client::{AccessReason, CampaignAccessClient, ClientError, SimulationResult};
use std::path::Path;
use tracing::debug;

use super::{load_keypair, resolve_pubkey};
use crate::error::{CliError, CliResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyMode {
    /// Read the campaign and token account and decide locally
    OffChain,
    /// Run `verify_access_v0` through simulation
    Simulate,
    /// Send `verify_access_v0`; the signature is the receipt
    OnChain,
}

pub async fn execute(
    client: &CampaignAccessClient,
    campaign_id: String,
    claimant: String,
    mode: VerifyMode,
) -> CliResult<()> {
    if mode == VerifyMode::OnChain {
        let keypair = load_keypair(Path::new(&claimant))?;
        println!("🌐 Proving access to {} on chain...", campaign_id);
        let signature = client.verify_access_on_chain(&keypair, &campaign_id).await?;
        println!("✅ Access granted");
        println!("   Signature: {}", signature);
        return Ok(());
    }

    let claimant = resolve_pubkey(&claimant)?;

    if mode == VerifyMode::Simulate {
        println!("🧪 Simulating access check for {} to {}", claimant, campaign_id);
        let simulation = client.simulate_verify_access(&claimant, &campaign_id).await?;
        return report_simulation(&simulation, &claimant.to_string(), &campaign_id);
    }

    println!("🔍 Checking access for {} to {}", claimant, campaign_id);

    let decision = client.check_access(&claimant, &campaign_id).await?;
    match decision.reason {
        AccessReason::TokenHeld => {
            println!("✅ Access granted");
            Ok(())
        }
        AccessReason::CampaignNotFound => {
            Err(ClientError::NotFound { campaign_id }.into())
        }
        AccessReason::NoToken => Err(CliError::AccessDenied(format!(
            "{} does not hold the access token for {:?}",
            claimant, campaign_id
        ))),
    }
}

fn report_simulation(
    simulation: &SimulationResult,
    claimant: &str,
    campaign_id: &str,
) -> CliResult<()> {
    for log in &simulation.logs {
        debug!("{}", log);
    }
    if let Some(units) = simulation.compute_units {
        println!("   Compute units: {}", units);
    }

    if simulation.success {
        println!("✅ Access would be granted");
        return Ok(());
    }

    let reason = simulation
        .error
        .clone()
        .unwrap_or_else(|| "simulation failed".to_string());
    Err(CliError::AccessDenied(format!(
        "{} would be denied for {:?}: {}",
        claimant, campaign_id, reason
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::rpc_response::RpcSimulateTransactionResult;

    fn simulation(json: &str) -> SimulationResult {
        let raw: RpcSimulateTransactionResult = serde_json::from_str(json).unwrap();
        SimulationResult::from_rpc_result(raw)
    }

    #[test]
    fn test_successful_simulation_is_granted() {
        let result = simulation(
            r#"{"err":null,"logs":["Program log: Access granted"],"unitsConsumed":4200}"#,
        );
        assert!(result.success);
        assert_eq!(result.compute_units, Some(4200));
        assert!(report_simulation(&result, "claimant", "launch-42").is_ok());
    }

    #[test]
    fn test_failed_simulation_is_access_denied() {
        let result = simulation(
            r#"{"err":{"InstructionError":[0,{"Custom":6007}]},"logs":[],"unitsConsumed":3100}"#,
        );
        assert!(!result.success);

        let err = report_simulation(&result, "claimant", "launch-42").unwrap_err();
        assert!(matches!(err, CliError::AccessDenied(_)));
        assert!(err.user_message().contains("launch-42"));
    }
}
