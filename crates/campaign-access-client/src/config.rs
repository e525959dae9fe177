use backoff::ExponentialBackoff;
use solana_sdk::commitment_config::CommitmentConfig;
use std::time::Duration;

/// Configuration for reads and transaction submission
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Commitment used for reads, preflight and confirmation
    pub commitment: CommitmentConfig,

    /// Backoff strategy for transient send failures. `max_elapsed_time`
    /// bounds the whole submission.
    pub retry_backoff: ExponentialBackoff,

    /// How long to wait for a sent transaction to reach `commitment`
    pub confirmation_timeout: Duration,

    /// Delay between signature status polls
    pub poll_interval: Duration,

    /// Whether to compare the payer's balance with the expected cost before
    /// sending a mint
    pub verify_balance_before_send: bool,

    /// Accounts per `getMultipleAccounts` request
    pub account_batch_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            retry_backoff: ExponentialBackoff {
                initial_interval: Duration::from_millis(500),
                max_interval: Duration::from_secs(10),
                max_elapsed_time: Some(Duration::from_secs(90)),
                multiplier: 2.0,
                ..Default::default()
            },
            confirmation_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
            verify_balance_before_send: true,
            account_batch_size: 100, // getMultipleAccounts limit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.commitment, CommitmentConfig::confirmed());
        assert_eq!(config.account_batch_size, 100);
        assert!(config.poll_interval < config.confirmation_timeout);
        assert!(config.retry_backoff.max_elapsed_time.is_some());
    }
}
