//! EIP-1559 fee estimation from live chain state.

use crate::constants::{
    BASE_FEE_SURGE_TREND, CONGESTION_GAS_PRICE_RATIO, DEFAULT_PRIORITY_FEE, FALLBACK_BASE_FEE,
    FALLBACK_GAS_PRICE, FALLBACK_MAX_FEE, FALLBACK_PRIORITY_FEE, GWEI, MAX_PRIORITY_FEE,
    MIN_PRIORITY_FEE, RISING_BASE_FEE_BUFFER, STEADY_BASE_FEE_BUFFER,
};
use alloy::{
    eips::BlockId,
    providers::{DynProvider, Provider},
    transports::{RpcError, TransportResult},
};
use tracing::{debug, warn};

/// A fee snapshot derived from the two most recent blocks of a chain.
///
/// Computed fresh per transaction attempt and never cached; fees are
/// time-sensitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeEstimate {
    /// Base fee of the latest block.
    pub base_fee: u128,
    /// Gas price reported by the node.
    pub gas_price: u128,
    /// Priority fee chosen for the transaction.
    pub priority_fee: u128,
    /// Max fee per gas chosen for the transaction.
    pub max_fee_per_gas: u128,
    /// Base fee growth ratio over the last two blocks.
    pub base_fee_trend: f64,
}

impl FeeEstimate {
    /// Conservative estimate used when the fee query fails.
    pub const FALLBACK: Self = Self {
        base_fee: FALLBACK_BASE_FEE,
        gas_price: FALLBACK_GAS_PRICE,
        priority_fee: FALLBACK_PRIORITY_FEE,
        max_fee_per_gas: FALLBACK_MAX_FEE,
        base_fee_trend: 0.0,
    };

    /// Derives a fee estimate from observed chain state.
    ///
    /// The priority fee is tiered on the base fee trend and a congestion
    /// signal, and always clamped to [[`MIN_PRIORITY_FEE`],
    /// [`MAX_PRIORITY_FEE`]].
    pub fn from_observations(base_fee: u128, prev_base_fee: u128, gas_price: u128) -> Self {
        let base_fee_trend = if prev_base_fee > 0 {
            (base_fee as f64 - prev_base_fee as f64) / prev_base_fee as f64
        } else {
            0.0
        };

        let tier = if base_fee_trend > BASE_FEE_SURGE_TREND {
            // Base fee is growing fast.
            MAX_PRIORITY_FEE
        } else if gas_price as f64 > base_fee as f64 * CONGESTION_GAS_PRICE_RATIO {
            // High network congestion.
            MIN_PRIORITY_FEE * 3
        } else {
            DEFAULT_PRIORITY_FEE
        };
        let priority_fee = tier.clamp(MIN_PRIORITY_FEE, MAX_PRIORITY_FEE);

        let buffer = if base_fee_trend > 0.0 {
            RISING_BASE_FEE_BUFFER
        } else {
            STEADY_BASE_FEE_BUFFER
        };
        let max_fee_per_gas = (base_fee as f64 * buffer) as u128 + priority_fee;

        Self { base_fee, gas_price, priority_fee, max_fee_per_gas, base_fee_trend }
    }
}

/// Estimates fees from the source chain.
///
/// Never fails: any RPC error is swallowed and replaced with
/// [`FeeEstimate::FALLBACK`], so a fee-query failure can never abort a bridge
/// attempt.
pub async fn estimate(provider: &DynProvider) -> FeeEstimate {
    let estimate = match try_estimate(provider).await {
        Ok(estimate) => estimate,
        Err(err) => {
            warn!(%err, "fee query failed, using fallback estimate");
            FeeEstimate::FALLBACK
        }
    };

    debug!(
        base_fee_gwei = estimate.base_fee as f64 / GWEI as f64,
        priority_fee_gwei = estimate.priority_fee as f64 / GWEI as f64,
        max_fee_gwei = estimate.max_fee_per_gas as f64 / GWEI as f64,
        trend = estimate.base_fee_trend,
        "fee estimate"
    );

    estimate
}

async fn try_estimate(provider: &DynProvider) -> TransportResult<FeeEstimate> {
    let latest = provider.get_block(BlockId::latest()).await?.ok_or(RpcError::NullResp)?;
    let prev = if latest.header.number > 0 {
        provider
            .get_block(BlockId::number(latest.header.number - 1))
            .await?
            .ok_or(RpcError::NullResp)?
    } else {
        latest.clone()
    };
    let gas_price = provider.get_gas_price().await?;

    Ok(FeeEstimate::from_observations(
        latest.header.base_fee_per_gas.unwrap_or_default() as u128,
        prev.header.base_fee_per_gas.unwrap_or_default() as u128,
        gas_price,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{providers::ProviderBuilder, transports::mock::Asserter};

    #[test]
    fn surging_base_fee_selects_the_maximum_priority_fee() {
        // Trend of 0.15 with gas price equal to the base fee.
        let estimate = FeeEstimate::from_observations(115 * GWEI, 100 * GWEI, 115 * GWEI);

        assert!(estimate.base_fee_trend > BASE_FEE_SURGE_TREND);
        assert_eq!(estimate.priority_fee, MAX_PRIORITY_FEE);
        // Rising base fee applies the larger buffer.
        assert_eq!(
            estimate.max_fee_per_gas,
            (115.0 * GWEI as f64 * RISING_BASE_FEE_BUFFER) as u128 + MAX_PRIORITY_FEE
        );
    }

    #[test]
    fn congestion_selects_three_times_the_minimum() {
        // Flat trend, gas price at twice the base fee.
        let estimate = FeeEstimate::from_observations(10 * GWEI, 10 * GWEI, 20 * GWEI);

        assert_eq!(estimate.base_fee_trend, 0.0);
        assert_eq!(estimate.priority_fee, 3 * MIN_PRIORITY_FEE);
        assert_eq!(
            estimate.max_fee_per_gas,
            (10.0 * GWEI as f64 * STEADY_BASE_FEE_BUFFER) as u128 + 3 * MIN_PRIORITY_FEE
        );
    }

    #[test]
    fn quiet_network_selects_the_default() {
        let estimate = FeeEstimate::from_observations(10 * GWEI, 10 * GWEI, 10 * GWEI);
        assert_eq!(estimate.priority_fee, DEFAULT_PRIORITY_FEE);
    }

    #[test]
    fn priority_fee_is_always_within_bounds() {
        for (base, prev, gas) in [
            (0u128, 0u128, 0u128),
            (1, 1, u128::MAX >> 64),
            (100 * GWEI, 1, 100 * GWEI),
            (1, 100 * GWEI, 1),
            (50 * GWEI, 50 * GWEI, 500 * GWEI),
        ] {
            let estimate = FeeEstimate::from_observations(base, prev, gas);
            assert!(estimate.priority_fee >= MIN_PRIORITY_FEE);
            assert!(estimate.priority_fee <= MAX_PRIORITY_FEE);
        }
    }

    #[test]
    fn zero_previous_base_fee_means_no_trend() {
        let estimate = FeeEstimate::from_observations(10 * GWEI, 0, 10 * GWEI);
        assert_eq!(estimate.base_fee_trend, 0.0);
    }

    #[test]
    fn identical_observations_yield_identical_estimates() {
        let a = FeeEstimate::from_observations(37 * GWEI, 31 * GWEI, 45 * GWEI);
        let b = FeeEstimate::from_observations(37 * GWEI, 31 * GWEI, 45 * GWEI);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn rpc_failure_falls_back_to_documented_constants() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("node unavailable");
        let provider = ProviderBuilder::new().connect_mocked_client(asserter).erased();

        let estimate = estimate(&provider).await;
        assert_eq!(estimate, FeeEstimate::FALLBACK);
        assert_eq!(estimate.base_fee, 20 * GWEI);
        assert_eq!(estimate.gas_price, 25 * GWEI);
        assert_eq!(estimate.priority_fee, 2 * GWEI);
        assert_eq!(estimate.max_fee_per_gas, 22 * GWEI);
    }
}
