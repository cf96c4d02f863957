//! # Bridger CLI

use crate::bridge::DestinationMode;
use alloy::primitives::{
    utils::{parse_ether, UnitsError},
    U256,
};
use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// Bridges native Sepolia ETH into an L2 rollup testnet for every wallet in
/// a key file.
#[derive(Debug, Parser)]
#[command(author, about = "Bridger", long_about = None)]
pub struct Args {
    /// The configuration file.
    ///
    /// If missing, a default one will be used and stored in the working
    /// directory under `bridger.yaml`.
    #[arg(long, value_name = "CONFIG", env = "BRIDGER_CONFIG", default_value = "bridger.yaml")]
    pub config: PathBuf,
    /// The private key file, one key per line. Blank lines and `#` comments
    /// are ignored.
    #[arg(long, value_name = "KEYS", env = "BRIDGER_KEYS", default_value = "keys.txt")]
    pub keys: PathBuf,
    /// The rollup to bridge into.
    #[arg(long, value_enum, value_name = "DESTINATION")]
    pub destination: DestinationMode,
    /// The amount to bridge per wallet, in ETH.
    #[arg(long, value_name = "ETH", value_parser = parse_eth_amount, default_value = "0.0001")]
    pub amount: U256,
    /// The delay between wallets.
    #[arg(long, value_name = "SECONDS", value_parser = parse_duration_secs, default_value = "15")]
    pub delay: Duration,
}

/// Parses a decimal ETH amount into wei.
fn parse_eth_amount(arg: &str) -> Result<U256, UnitsError> {
    parse_ether(arg)
}

/// Parses a string representing seconds to a [`Duration`].
fn parse_duration_secs(arg: &str) -> Result<Duration, std::num::ParseIntError> {
    let seconds = arg.parse()?;
    Ok(Duration::from_secs(seconds))
}
