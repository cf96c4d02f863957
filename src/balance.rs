//! Wallet affordability checks.

use crate::fees::FeeEstimate;
use alloy::{
    primitives::{
        utils::{format_units, Unit},
        Address, U256,
    },
    providers::{DynProvider, Provider},
};
use tracing::{debug, warn};

/// Result of checking a wallet against the total cost of a bridge attempt.
///
/// Produced fresh per attempt and read-only once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    /// Whether the balance covers the total cost.
    pub sufficient: bool,
    /// On-chain balance of the sender.
    pub balance: U256,
    /// Total required: bridge value plus gas budget.
    pub required: U256,
    /// Value sent with the bridge transaction.
    pub bridge_amount: U256,
    /// Gas budget at the estimated max fee.
    pub gas_cost: U256,
    /// Diagnostic set when the balance query itself failed.
    pub error: Option<String>,
}

impl BalanceReport {
    /// Evaluates a known balance against the cost of an attempt.
    pub fn evaluate(
        balance: U256,
        required_value: U256,
        fees: &FeeEstimate,
        gas_limit: u64,
    ) -> Self {
        let gas_cost = U256::from(gas_limit) * U256::from(fees.max_fee_per_gas);
        let required = required_value + gas_cost;

        Self {
            sufficient: balance >= required,
            balance,
            required,
            bridge_amount: required_value,
            gas_cost,
            error: None,
        }
    }

    /// Report for a wallet whose balance could not be queried.
    ///
    /// Treated as insufficient; the attempt fails without submitting.
    pub fn unavailable(error: String) -> Self {
        Self {
            sufficient: false,
            balance: U256::ZERO,
            required: U256::ZERO,
            bridge_amount: U256::ZERO,
            gas_cost: U256::ZERO,
            error: Some(error),
        }
    }

    /// Amount missing from the balance, zero when sufficient.
    pub fn shortfall(&self) -> U256 {
        self.required.saturating_sub(self.balance)
    }
}

/// Checks whether `address` can afford `required_value` plus the gas budget.
///
/// Never fails past this boundary: a query error produces a report with
/// `sufficient == false` and the diagnostic attached.
pub async fn check(
    provider: &DynProvider,
    address: Address,
    required_value: U256,
    fees: &FeeEstimate,
    gas_limit: u64,
) -> BalanceReport {
    match provider.get_balance(address).await {
        Ok(balance) => {
            let report = BalanceReport::evaluate(balance, required_value, fees, gas_limit);
            debug!(
                %address,
                balance = %format_eth(report.balance),
                required = %format_eth(report.required),
                sufficient = report.sufficient,
                "balance check"
            );
            report
        }
        Err(err) => {
            warn!(%address, %err, "balance query failed");
            BalanceReport::unavailable(err.to_string())
        }
    }
}

/// Formats a wei amount as ETH with six decimal places.
pub fn format_eth(value: U256) -> String {
    let eth = format_units(value, Unit::ETHER.get())
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or_default();
    format!("{eth:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        primitives::utils::parse_ether,
        providers::ProviderBuilder,
        transports::mock::Asserter,
    };

    fn fees() -> FeeEstimate {
        FeeEstimate::FALLBACK
    }

    #[test]
    fn exact_balance_is_sufficient() {
        let required = parse_ether("0.5").unwrap();
        let gas_cost = U256::from(100_000u64) * U256::from(fees().max_fee_per_gas);

        let report = BalanceReport::evaluate(required + gas_cost, required, &fees(), 100_000);
        assert!(report.sufficient);
        assert_eq!(report.gas_cost, gas_cost);
        assert_eq!(report.shortfall(), U256::ZERO);
    }

    #[test]
    fn shortfall_is_required_minus_balance() {
        let balance = parse_ether("0.1").unwrap();
        let required = parse_ether("0.5").unwrap();

        let report = BalanceReport::evaluate(balance, required, &fees(), 100_000);
        assert!(!report.sufficient);
        assert_eq!(report.shortfall(), report.required - balance);
        assert_eq!(report.bridge_amount, required);
    }

    #[test]
    fn zero_balance_is_never_sufficient() {
        let report =
            BalanceReport::evaluate(U256::ZERO, parse_ether("0.0001").unwrap(), &fees(), 100_000);
        assert!(!report.sufficient);
    }

    #[test]
    fn eth_formatting_has_six_decimals() {
        assert_eq!(format_eth(parse_ether("0.0001").unwrap()), "0.000100");
        assert_eq!(format_eth(U256::ZERO), "0.000000");
        assert_eq!(format_eth(parse_ether("1.5").unwrap()), "1.500000");
    }

    #[tokio::test]
    async fn query_failure_yields_an_insufficient_report() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("balance unavailable");
        let provider = ProviderBuilder::new().connect_mocked_client(asserter).erased();

        let report =
            check(&provider, Address::ZERO, U256::from(1u64), &fees(), 21_000).await;
        assert!(!report.sufficient);
        assert!(report.error.is_some());
    }
}
