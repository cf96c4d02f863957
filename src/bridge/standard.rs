//! Lock-and-mint bridging into Base Sepolia.

use super::{BridgeAdapter, BridgeRequest, CallParameters, DestinationMode};
use crate::{
    config::StandardBridgeConfig,
    constants::{
        STANDARD_BRIDGE_EXTRA_DATA, STANDARD_BRIDGE_GAS_LIMIT, STANDARD_BRIDGE_MIN_L2_GAS_LIMIT,
    },
    fees::FeeEstimate,
};
use alloy::{
    primitives::{Address, Bytes},
    providers::DynProvider,
    sol,
    sol_types::SolCall,
};

sol! {
    /// The OP-stack L1 standard bridge.
    interface IL1StandardBridge {
        function bridgeETHTo(
            address _to,
            uint32 _minGasLimit,
            bytes calldata _extraData
        ) external payable;
    }
}

/// Bridges by depositing into the L1 standard bridge.
///
/// Submission overhead is always zero; the value sent equals the bridged
/// amount exactly. Gas limits are protocol constants, not derived.
#[derive(Debug, Clone)]
pub struct StandardBridgeAdapter {
    bridge: Address,
}

impl StandardBridgeAdapter {
    /// Creates a new [`StandardBridgeAdapter`].
    pub fn new(config: &StandardBridgeConfig) -> Self {
        Self { bridge: config.bridge }
    }
}

#[async_trait::async_trait]
impl BridgeAdapter for StandardBridgeAdapter {
    fn mode(&self) -> DestinationMode {
        DestinationMode::Base
    }

    async fn build_call(
        &self,
        _destination: &DynProvider,
        request: &BridgeRequest,
        _fees: &FeeEstimate,
    ) -> CallParameters {
        let input: Bytes = IL1StandardBridge::bridgeETHToCall {
            _to: request.recipient,
            _minGasLimit: STANDARD_BRIDGE_MIN_L2_GAS_LIMIT,
            _extraData: Bytes::from_static(STANDARD_BRIDGE_EXTRA_DATA),
        }
        .abi_encode()
        .into();

        CallParameters {
            target: self.bridge,
            value: request.amount,
            gas_limit: STANDARD_BRIDGE_GAS_LIMIT,
            input,
        }
    }
}
