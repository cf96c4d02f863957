//! Retryable ticket bridging into Arbitrum Sepolia.

use super::{BridgeAdapter, BridgeRequest, CallParameters, DestinationMode};
use crate::{
    config::RetryableTicketConfig,
    constants::{
        FALLBACK_L2_GAS_PRICE, RETRYABLE_L2_GAS_LIMIT, SUBMISSION_BASE_COST,
        SUBMISSION_FEE_CAP_RATIO, SUBMISSION_REFERENCE_GAS_PRICE,
    },
    fees::FeeEstimate,
};
use alloy::{
    primitives::{Address, Bytes, U256},
    providers::{DynProvider, Provider},
    sol,
    sol_types::SolCall,
};
use tracing::debug;

sol! {
    /// The delayed inbox entrypoint for L1 to L2 messages.
    interface IInbox {
        function createRetryableTicket(
            address to,
            uint256 l2CallValue,
            uint256 maxSubmissionCost,
            address excessFeeRefundAddress,
            address callValueRefundAddress,
            uint256 gasLimit,
            uint256 maxFeePerGas,
            bytes calldata data
        ) external payable returns (uint256);
    }
}

/// Bridges by creating a retryable ticket through the inbox contract.
///
/// The value sent with the transaction covers the bridged amount, the ticket
/// submission cost, and the destination-side execution budget.
#[derive(Debug, Clone)]
pub struct RetryableTicketAdapter {
    inbox: Address,
    gas_limit: u64,
}

impl RetryableTicketAdapter {
    /// Creates a new [`RetryableTicketAdapter`].
    pub fn new(config: &RetryableTicketConfig, gas_multiplier: f64) -> Self {
        Self {
            inbox: config.inbox,
            gas_limit: (config.default_gas_limit as f64 * gas_multiplier) as u64,
        }
    }

    /// Scales the submission cost with the current gas price, capped at
    /// [`SUBMISSION_FEE_CAP_RATIO`] times the reference amount.
    pub fn submission_cost(gas_price: u128) -> u128 {
        let ratio = (gas_price as f64 / SUBMISSION_REFERENCE_GAS_PRICE as f64)
            .min(SUBMISSION_FEE_CAP_RATIO);
        (SUBMISSION_BASE_COST as f64 * ratio) as u128
    }

    /// Queries the destination chain gas price, falling back to
    /// [`FALLBACK_L2_GAS_PRICE`] when the node cannot be reached.
    async fn l2_gas_price(destination: &DynProvider) -> u128 {
        destination.get_gas_price().await.unwrap_or_else(|err| {
            debug!(%err, "destination gas price query failed, using fallback");
            FALLBACK_L2_GAS_PRICE
        })
    }
}

#[async_trait::async_trait]
impl BridgeAdapter for RetryableTicketAdapter {
    fn mode(&self) -> DestinationMode {
        DestinationMode::Arbitrum
    }

    fn submission_overhead(&self, fees: &FeeEstimate) -> U256 {
        U256::from(Self::submission_cost(fees.gas_price))
    }

    async fn build_call(
        &self,
        destination: &DynProvider,
        request: &BridgeRequest,
        fees: &FeeEstimate,
    ) -> CallParameters {
        let submission_cost = Self::submission_cost(fees.gas_price);
        let l2_gas_price = Self::l2_gas_price(destination).await;
        let l2_execution_budget = RETRYABLE_L2_GAS_LIMIT as u128 * l2_gas_price;

        let value =
            request.amount + U256::from(submission_cost) + U256::from(l2_execution_budget);

        let input: Bytes = IInbox::createRetryableTicketCall {
            to: request.recipient,
            l2CallValue: request.amount,
            maxSubmissionCost: U256::from(submission_cost),
            excessFeeRefundAddress: request.sender,
            callValueRefundAddress: request.sender,
            gasLimit: U256::from(RETRYABLE_L2_GAS_LIMIT),
            maxFeePerGas: U256::from(l2_gas_price),
            data: Bytes::new(),
        }
        .abi_encode()
        .into();

        CallParameters { target: self.inbox, value, gas_limit: self.gas_limit, input }
    }
}
