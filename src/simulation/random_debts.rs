//! Random debt network generation.
//!
//! Produces random debt matrices to exercise the settlement engine in
//! benchmarks and stress tests.

use crate::core::debt_matrix::DebtMatrix;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random debt network.
#[derive(Debug, Clone)]
pub struct DebtNetworkConfig {
    /// Number of participants in the group.
    pub participant_count: usize,
    /// Probability that any ordered off-diagonal pair carries a debt.
    pub density: f64,
    /// Minimum debt amount.
    pub min_amount: Decimal,
    /// Maximum debt amount.
    pub max_amount: Decimal,
}

impl Default for DebtNetworkConfig {
    fn default() -> Self {
        Self {
            participant_count: 10,
            density: 0.3,
            min_amount: Decimal::from(1),
            max_amount: Decimal::from(10_000),
        }
    }
}

/// Generate a random debt matrix for testing.
///
/// The diagonal stays zero; every other entry is populated with probability
/// `density`, drawing amounts uniformly from the configured range and
/// rounding to cents.
pub fn generate_random_debts(config: &DebtNetworkConfig) -> DebtMatrix {
    let mut rng = rand::thread_rng();
    let n = config.participant_count;
    let mut debts = DebtMatrix::new(n);

    let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(1.0);
    let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(10_000.0);

    for creditor in 0..n {
        for debtor in 0..n {
            if creditor == debtor || !rng.gen_bool(config.density.clamp(0.0, 1.0)) {
                continue;
            }
            let amount_f64 = rng.gen_range(min_f64..max_f64);
            let amount = Decimal::from_f64_retain(amount_f64)
                .unwrap_or(Decimal::ONE)
                .round_dp(2);
            if amount > Decimal::ZERO {
                // record cannot fail in-bounds with a positive amount
                let _ = debts.record(creditor, debtor, amount);
            }
        }
    }

    debts
}
