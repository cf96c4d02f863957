//! # Bridger
//!
//! Moves native test ETH from Sepolia into L2 rollup testnets on behalf of
//! many wallets in sequence, using each rollup's official bridge contract.

pub mod balance;
pub mod batch;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod fees;
pub mod pipeline;
pub mod wallets;
