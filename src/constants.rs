//! Bridger constants.

use std::time::Duration;

/// One gwei, in wei.
pub const GWEI: u128 = 1_000_000_000;

/// Lower bound for the priority fee attached to a bridge transaction.
pub const MIN_PRIORITY_FEE: u128 = GWEI;

/// Upper bound for the priority fee attached to a bridge transaction.
pub const MAX_PRIORITY_FEE: u128 = 5 * GWEI;

/// Priority fee used when the network shows neither a base fee surge nor
/// congestion.
pub const DEFAULT_PRIORITY_FEE: u128 = 2 * GWEI;

/// Base fee growth ratio over the last two blocks above which the priority
/// fee is pushed to [`MAX_PRIORITY_FEE`].
pub const BASE_FEE_SURGE_TREND: f64 = 0.10;

/// Gas price to base fee ratio above which the network is considered
/// congested.
pub const CONGESTION_GAS_PRICE_RATIO: f64 = 1.5;

/// Buffer applied to the base fee when it is rising.
pub const RISING_BASE_FEE_BUFFER: f64 = 1.3;

/// Buffer applied to the base fee when it is steady or falling.
pub const STEADY_BASE_FEE_BUFFER: f64 = 1.1;

/// Base fee assumed when the fee query fails.
pub const FALLBACK_BASE_FEE: u128 = 20 * GWEI;

/// Gas price assumed when the fee query fails.
pub const FALLBACK_GAS_PRICE: u128 = 25 * GWEI;

/// Priority fee assumed when the fee query fails.
pub const FALLBACK_PRIORITY_FEE: u128 = 2 * GWEI;

/// Max fee per gas assumed when the fee query fails.
pub const FALLBACK_MAX_FEE: u128 = 22 * GWEI;

/// How long to wait for a submitted transaction to be confirmed.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Reference amount the retryable ticket submission cost is derived from,
/// 0.001 ether.
pub const SUBMISSION_BASE_COST: u128 = 1_000_000_000_000_000;

/// Gas price anchor the current gas price is compared against when scaling
/// the submission cost.
pub const SUBMISSION_REFERENCE_GAS_PRICE: u128 = 20 * GWEI;

/// Ceiling on the submission cost multiplier, capping runaway estimates
/// during gas price spikes.
pub const SUBMISSION_FEE_CAP_RATIO: f64 = 2.0;

/// Gas limit for retryable ticket execution on the destination chain.
pub const RETRYABLE_L2_GAS_LIMIT: u64 = 500_000;

/// Destination chain gas price assumed when the destination node cannot be
/// queried, 0.1 gwei.
pub const FALLBACK_L2_GAS_PRICE: u128 = 100_000_000;

/// Default top-level gas limit for a retryable ticket submission.
pub const DEFAULT_RETRYABLE_GAS_LIMIT: u64 = 100_000;

/// Top-level gas limit for a standard bridge deposit.
pub const STANDARD_BRIDGE_GAS_LIMIT: u64 = 756_499;

/// Minimum gas limit forwarded to the destination chain by the standard
/// bridge.
pub const STANDARD_BRIDGE_MIN_L2_GAS_LIMIT: u32 = 200_000;

/// Opaque tag the standard bridge expects as extra data.
pub const STANDARD_BRIDGE_EXTRA_DATA: &[u8] = b"superbridge";

/// The public Base Sepolia RPC URL.
///
/// This endpoint is rate-limited.
/// See also <https://docs.base.org/chain/network-information>
pub const BASE_SEPOLIA_PUBLIC_RPC_URL: &str = "https://sepolia.base.org";
