//! Bridger error types.

use crate::{balance::BalanceReport, constants::CONFIRMATION_TIMEOUT};
use alloy::{
    primitives::B256,
    transports::{RpcError, TransportErrorKind},
};

/// Errors that may occur during a single wallet's bridge attempt.
///
/// Every variant is attempt-scoped: the batch continues with the next wallet
/// regardless of which one is hit.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The endpoint for a network is not configured or did not respond to a
    /// liveness probe.
    #[error("network {network} is unreachable: {message}")]
    Connectivity {
        /// Name of the network that could not be reached.
        network: String,
        /// Underlying connection failure.
        message: String,
    },
    /// The sender cannot afford the bridge value plus the gas budget.
    #[error("insufficient funds")]
    InsufficientFunds(Box<BalanceReport>),
    /// The transaction was included in a block but reverted.
    #[error("transaction {0} reverted")]
    Reverted(B256),
    /// The key or transaction parameters could not be signed.
    #[error(transparent)]
    Signing(#[from] alloy::signers::Error),
    /// No receipt became available within the confirmation window.
    #[error("no confirmation within {}s", CONFIRMATION_TIMEOUT.as_secs())]
    ConfirmationTimeout,
    /// Any other failure, reduced to its message.
    #[error("{0}")]
    Unknown(String),
}

impl BridgeError {
    /// Returns the balance report attached to an insufficient funds failure.
    pub fn balance_report(&self) -> Option<&BalanceReport> {
        match self {
            Self::InsufficientFunds(report) => Some(report),
            _ => None,
        }
    }
}

impl From<RpcError<TransportErrorKind>> for BridgeError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        Self::Unknown(err.to_string())
    }
}
