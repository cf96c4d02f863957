//! Rollup-specific bridge call construction.

use crate::{config::BridgeConfig, fees::FeeEstimate};
use alloy::{
    primitives::{Address, Bytes, U256},
    providers::DynProvider,
};
use std::fmt;

mod arbitrum;
pub use arbitrum::RetryableTicketAdapter;

mod standard;
pub use standard::StandardBridgeAdapter;

/// The rollup funds are being bridged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DestinationMode {
    /// Arbitrum Sepolia, via a retryable ticket through the inbox.
    Arbitrum,
    /// Base Sepolia, via the L1 standard bridge.
    Base,
}

impl DestinationMode {
    /// Name of the destination network in the configured topology.
    pub fn network_name(&self) -> &'static str {
        match self {
            Self::Arbitrum => "arbitrum-sepolia",
            Self::Base => "base-sepolia",
        }
    }
}

impl fmt::Display for DestinationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.network_name())
    }
}

/// One wallet's bridge intent. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct BridgeRequest {
    /// Name of the source network.
    pub source: String,
    /// Name of the destination network.
    pub destination: String,
    /// Address funds are drawn from.
    pub sender: Address,
    /// Address credited on the destination chain.
    pub recipient: Address,
    /// Bridged value in wei.
    pub amount: U256,
    /// Which adapter handles this request.
    pub mode: DestinationMode,
}

impl BridgeRequest {
    /// Creates a new [`BridgeRequest`].
    pub fn new(
        source: impl Into<String>,
        mode: DestinationMode,
        sender: Address,
        recipient: Address,
        amount: U256,
    ) -> Self {
        Self {
            source: source.into(),
            destination: mode.network_name().to_string(),
            sender,
            recipient,
            amount,
            mode,
        }
    }
}

/// Everything needed to submit one bridge transaction on the source chain.
#[derive(Debug, Clone)]
pub struct CallParameters {
    /// Bridge contract the call is sent to.
    pub target: Address,
    /// Value sent with the call.
    pub value: U256,
    /// Top-level gas limit.
    pub gas_limit: u64,
    /// ABI-encoded call data.
    pub input: Bytes,
}

/// Encodes the destination-specific bridge call.
///
/// Adapters operate on already-fetched fee data; the only I/O they perform
/// themselves is the destination chain gas price query of the ticket adapter.
#[async_trait::async_trait]
pub trait BridgeAdapter: Send + Sync {
    /// The destination mode this adapter handles.
    fn mode(&self) -> DestinationMode;

    /// Extra value to include on top of the bridged amount, zero unless the
    /// protocol charges a submission cost.
    fn submission_overhead(&self, _fees: &FeeEstimate) -> U256 {
        U256::ZERO
    }

    /// Builds the call parameters for a request.
    async fn build_call(
        &self,
        destination: &DynProvider,
        request: &BridgeRequest,
        fees: &FeeEstimate,
    ) -> CallParameters;
}

/// Returns the adapter for a destination mode.
pub fn adapter_for(mode: DestinationMode, config: &BridgeConfig) -> Box<dyn BridgeAdapter> {
    match mode {
        DestinationMode::Arbitrum => {
            Box::new(RetryableTicketAdapter::new(&config.arbitrum, config.gas_multiplier))
        }
        DestinationMode::Base => Box::new(StandardBridgeAdapter::new(&config.base)),
    }
}
