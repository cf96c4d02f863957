//! The bridge transaction pipeline: build, sign, submit, confirm.

use crate::{
    balance,
    bridge::{self, BridgeRequest},
    config::BridgeConfig,
    constants::CONFIRMATION_TIMEOUT,
    endpoints::EndpointPool,
    error::BridgeError,
    fees,
};
use alloy::{
    consensus::{TxEip1559, TypedTransaction},
    eips::Encodable2718,
    network::{Ethereum, EthereumWallet, NetworkWallet},
    primitives::B256,
    providers::{PendingTransactionConfig, Provider},
    signers::local::PrivateKeySigner,
};
use tracing::{debug, info};

/// Terminal value for one wallet's bridge attempt.
#[derive(Debug)]
pub enum TransactionOutcome {
    /// The transaction was confirmed on-chain.
    Success {
        /// Hash of the confirmed transaction.
        tx_hash: B256,
        /// Block the transaction was included in.
        block_number: u64,
        /// Gas consumed by the transaction.
        gas_used: u64,
        /// Explorer link, when the source network has one configured.
        explorer_url: Option<String>,
    },
    /// The attempt failed; the batch continues with the next wallet.
    Failure {
        /// Why the attempt failed.
        reason: BridgeError,
    },
}

impl TransactionOutcome {
    /// Whether the attempt confirmed on-chain.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Drives one bridge transaction through a linear, retry-free protocol:
/// built, signed, submitted, then confirmed, reverted or failed.
#[derive(Debug)]
pub struct TransactionPipeline<'a> {
    pool: &'a mut EndpointPool,
    config: &'a BridgeConfig,
}

impl<'a> TransactionPipeline<'a> {
    /// Creates a new [`TransactionPipeline`].
    pub fn new(pool: &'a mut EndpointPool, config: &'a BridgeConfig) -> Self {
        Self { pool, config }
    }

    /// Runs one attempt to completion.
    ///
    /// Never propagates an error to the caller: every failure is folded into
    /// [`TransactionOutcome::Failure`].
    pub async fn run(
        &mut self,
        signer: &PrivateKeySigner,
        request: &BridgeRequest,
    ) -> TransactionOutcome {
        match self.attempt(signer, request).await {
            Ok(outcome) => outcome,
            Err(reason) => TransactionOutcome::Failure { reason },
        }
    }

    async fn attempt(
        &mut self,
        signer: &PrivateKeySigner,
        request: &BridgeRequest,
    ) -> Result<TransactionOutcome, BridgeError> {
        let source = self.pool.get(&request.source).await?;
        let destination = self.pool.get(request.mode.network_name()).await?;
        let network = self.config.network(&request.source).ok_or_else(|| {
            BridgeError::Connectivity {
                network: request.source.clone(),
                message: "no RPC endpoint configured".to_string(),
            }
        })?;

        // Build: fresh fee estimate, adapter call parameters, balance gate.
        let fee_estimate = fees::estimate(&source).await;
        let adapter = bridge::adapter_for(request.mode, self.config);
        let call = adapter.build_call(&destination, request, &fee_estimate).await;

        let report =
            balance::check(&source, request.sender, call.value, &fee_estimate, call.gas_limit)
                .await;
        if !report.sufficient {
            return Err(BridgeError::InsufficientFunds(Box::new(report)));
        }

        // Sign locally; the key never leaves the process.
        let nonce = source.get_transaction_count(request.sender).pending().await?;
        let tx = TypedTransaction::Eip1559(TxEip1559 {
            chain_id: network.chain_id,
            nonce,
            gas_limit: call.gas_limit,
            max_fee_per_gas: fee_estimate.max_fee_per_gas,
            max_priority_fee_per_gas: fee_estimate.priority_fee,
            to: call.target.into(),
            value: call.value,
            input: call.input.clone(),
            ..Default::default()
        });
        let wallet = EthereumWallet::new(signer.clone());
        let signed =
            NetworkWallet::<Ethereum>::sign_transaction_from(&wallet, request.sender, tx).await?;
        let tx_hash = *signed.tx_hash();

        // Submit.
        let _ = source.send_raw_transaction(&signed.encoded_2718()).await?;
        info!(%tx_hash, nonce, "transaction submitted");

        // Confirm within a bounded window.
        let watcher = source
            .watch_pending_transaction(
                PendingTransactionConfig::new(tx_hash).with_timeout(Some(CONFIRMATION_TIMEOUT)),
            )
            .await
            .map_err(|err| BridgeError::Unknown(err.to_string()))?;
        if watcher.await.is_err() {
            return Err(BridgeError::ConfirmationTimeout);
        }

        let receipt = source
            .get_transaction_receipt(tx_hash)
            .await?
            .ok_or(BridgeError::ConfirmationTimeout)?;
        debug!(%tx_hash, status = receipt.status(), "receipt received");

        classify_receipt(
            tx_hash,
            receipt.status(),
            receipt.block_number.unwrap_or_default(),
            receipt.gas_used,
            network.explorer_tx_url.as_deref(),
        )
    }
}

/// Maps a receipt to its terminal outcome: status 1 confirms, status 0
/// reverts. Reverts are not retried.
fn classify_receipt(
    tx_hash: B256,
    status: bool,
    block_number: u64,
    gas_used: u64,
    explorer_tx_url: Option<&str>,
) -> Result<TransactionOutcome, BridgeError> {
    if !status {
        return Err(BridgeError::Reverted(tx_hash));
    }

    Ok(TransactionOutcome::Success {
        tx_hash,
        block_number,
        gas_used,
        explorer_url: explorer_tx_url.map(|base| format!("{base}{tx_hash}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::DestinationMode;
    use alloy::{
        primitives::{b256, utils::parse_ether, U256},
        providers::{DynProvider, ProviderBuilder},
        transports::mock::Asserter,
    };
    use std::collections::HashMap;

    const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn mocked_provider(asserter: &Asserter) -> DynProvider {
        ProviderBuilder::new().connect_mocked_client(asserter.clone()).erased()
    }

    #[tokio::test]
    async fn zero_balance_fails_before_submission() {
        let config = BridgeConfig::default();
        let source = Asserter::new();
        // Fee query fails (fallback applies), then the balance comes back
        // zero. Nothing further is queued: a submission attempt would
        // surface as an unknown error, not insufficient funds.
        source.push_failure_msg("node unavailable");
        source.push_success(&U256::ZERO);

        let mut pool = EndpointPool::with_clients(
            &config,
            HashMap::from([
                ("ethereum-sepolia".to_string(), mocked_provider(&source)),
                ("base-sepolia".to_string(), mocked_provider(&Asserter::new())),
            ]),
        );

        let signer: PrivateKeySigner = TEST_KEY.parse().unwrap();
        let request = BridgeRequest::new(
            "ethereum-sepolia",
            DestinationMode::Base,
            signer.address(),
            signer.address(),
            parse_ether("0.0001").unwrap(),
        );

        let outcome = TransactionPipeline::new(&mut pool, &config).run(&signer, &request).await;
        match outcome {
            TransactionOutcome::Failure { reason } => {
                let report = reason.balance_report().expect("insufficient funds report");
                assert!(!report.sufficient);
                assert_eq!(report.balance, U256::ZERO);
                assert_eq!(report.bridge_amount, parse_ether("0.0001").unwrap());
            }
            outcome => panic!("expected insufficient funds, got {outcome:?}"),
        }
    }

    #[test]
    fn reverted_receipt_is_a_reverted_failure() {
        let tx_hash =
            b256!("1111111111111111111111111111111111111111111111111111111111111111");
        let err = classify_receipt(tx_hash, false, 100, 21_000, None).unwrap_err();
        assert!(matches!(err, BridgeError::Reverted(hash) if hash == tx_hash));
    }

    #[test]
    fn confirmed_receipt_carries_the_explorer_link() {
        let tx_hash =
            b256!("1111111111111111111111111111111111111111111111111111111111111111");
        let outcome = classify_receipt(
            tx_hash,
            true,
            100,
            21_000,
            Some("https://sepolia.etherscan.io/tx/"),
        )
        .unwrap();

        match outcome {
            TransactionOutcome::Success { explorer_url, block_number, gas_used, .. } => {
                assert_eq!(
                    explorer_url.as_deref(),
                    Some(concat!(
                        "https://sepolia.etherscan.io/tx/",
                        "0x1111111111111111111111111111111111111111111111111111111111111111"
                    ))
                );
                assert_eq!(block_number, 100);
                assert_eq!(gas_used, 21_000);
            }
            outcome => panic!("expected success, got {outcome:?}"),
        }
    }
}
