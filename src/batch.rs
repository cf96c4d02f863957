//! Sequential batch driver over a list of wallets.

use crate::{
    balance::format_eth,
    bridge::{BridgeRequest, DestinationMode},
    config::BridgeConfig,
    endpoints::EndpointPool,
    pipeline::{TransactionOutcome, TransactionPipeline},
};
use alloy::{
    primitives::{Address, U256},
    signers::local::PrivateKeySigner,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Aggregate statistics for one batch run. Not persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchResult {
    /// Wallets whose bridge transaction confirmed.
    pub succeeded: usize,
    /// Wallets whose attempt failed.
    pub failed: usize,
}

impl BatchResult {
    /// Total number of attempted wallets.
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Share of successful attempts, as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.processed() == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.processed() as f64 * 100.0
        }
    }
}

/// Drives the pipeline across a list of private keys, strictly in order,
/// with inter-wallet throttling.
///
/// Wallets are processed sequentially by design: one sender per attempt
/// avoids nonce races, and the pacing respects RPC provider rate limits. At
/// most one transaction is in flight at a time.
#[derive(Debug)]
pub struct BatchOrchestrator<'a> {
    config: &'a BridgeConfig,
    pool: EndpointPool,
}

impl<'a> BatchOrchestrator<'a> {
    /// Creates a new [`BatchOrchestrator`].
    pub fn new(config: &'a BridgeConfig) -> Self {
        Self { config, pool: EndpointPool::new(config) }
    }

    /// Creates an orchestrator over a pre-connected pool.
    #[cfg(test)]
    pub(crate) fn with_pool(config: &'a BridgeConfig, pool: EndpointPool) -> Self {
        Self { config, pool }
    }

    /// Bridges `amount` for every key, sleeping `delay` between wallets.
    ///
    /// A key that does not parse is skipped and counts toward neither total.
    /// Ctrl-C during the inter-wallet delay aborts the remainder; partial
    /// statistics are returned.
    pub async fn run(
        &mut self,
        keys: &[String],
        mode: DestinationMode,
        amount: U256,
        delay: Duration,
    ) -> BatchResult {
        let wallets: Vec<PrivateKeySigner> = keys
            .iter()
            .enumerate()
            .filter_map(|(index, key)| match key.parse::<PrivateKeySigner>() {
                Ok(signer) => Some(signer),
                Err(err) => {
                    error!(wallet = index + 1, %err, "skipping key that does not parse");
                    None
                }
            })
            .collect();

        let total = wallets.len();
        let mut result = BatchResult::default();

        for (index, signer) in wallets.iter().enumerate() {
            let sender = signer.address();
            info!(wallet = index + 1, total, %sender, destination = %mode, "processing wallet");

            // Funds are bridged to the sender's own address.
            let request =
                BridgeRequest::new(self.config.source.clone(), mode, sender, sender, amount);
            let outcome =
                TransactionPipeline::new(&mut self.pool, self.config).run(signer, &request).await;
            report_outcome(sender, &outcome);

            if outcome.is_success() {
                result.succeeded += 1;
            } else {
                result.failed += 1;
            }

            if index + 1 < total && !delay.is_zero() {
                debug!(seconds = delay.as_secs(), "waiting before next wallet");
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = tokio::signal::ctrl_c() => {
                        warn!("interrupted, aborting remaining wallets");
                        break;
                    }
                }
            }
        }

        result
    }
}

fn report_outcome(sender: Address, outcome: &TransactionOutcome) {
    match outcome {
        TransactionOutcome::Success { tx_hash, block_number, gas_used, explorer_url } => {
            info!(
                %sender,
                %tx_hash,
                block_number,
                gas_used,
                url = explorer_url.as_deref().unwrap_or_default(),
                "bridge confirmed"
            );
        }
        TransactionOutcome::Failure { reason } => {
            warn!(%sender, %reason, "bridge failed");
            if let Some(report) = reason.balance_report() {
                warn!(
                    balance = %format_eth(report.balance),
                    required = %format_eth(report.required),
                    bridge_amount = %format_eth(report.bridge_amount),
                    gas_cost = %format_eth(report.gas_cost),
                    shortfall = %format_eth(report.shortfall()),
                    "insufficient funds breakdown"
                );
            }
        }
    }
}
