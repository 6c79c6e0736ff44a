use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense N×N matrix of settling payments.
///
/// Entry `(i, j)` is the amount participant `j` should pay participant `i`,
/// mirroring the indexing convention of the debt matrix. Structurally sparse:
/// a payment can only appear where a positive debt was recorded, so most
/// entries are zero.
///
/// Produced by the settlement engine; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMatrix {
    n: usize,
    /// Row-major entries: `entries[i * n + j]` = amount j pays i.
    entries: Vec<Decimal>,
}

impl PaymentMatrix {
    /// Create an all-zero payment matrix for `n` participants.
    pub fn zero(n: usize) -> Self {
        Self {
            n,
            entries: vec![Decimal::ZERO; n * n],
        }
    }

    /// Number of participants (the matrix dimension).
    pub fn participant_count(&self) -> usize {
        self.n
    }

    /// The amount `payer` should pay `payee`.
    pub fn amount(&self, payee: usize, payer: usize) -> Decimal {
        self.entries[payee * self.n + payer]
    }

    pub(crate) fn set(&mut self, payee: usize, payer: usize, amount: Decimal) {
        self.entries[payee * self.n + payer] = amount;
    }

    /// Total amount participant `k` pays out (column sum).
    pub fn paid_by(&self, k: usize) -> Decimal {
        (0..self.n).map(|i| self.amount(i, k)).sum()
    }

    /// Total amount participant `k` receives (row sum).
    pub fn received_by(&self, k: usize) -> Decimal {
        (0..self.n).map(|j| self.amount(k, j)).sum()
    }

    /// Sum of all payments: the settlement's objective value.
    pub fn total_settled(&self) -> Decimal {
        self.entries.iter().sum()
    }

    /// Number of non-zero payments.
    pub fn transfer_count(&self) -> usize {
        self.entries.iter().filter(|e| **e != Decimal::ZERO).count()
    }

    /// Iterate over non-zero payments as `(payee, payer, amount)`, row-major.
    pub fn transfers(&self) -> impl Iterator<Item = (usize, usize, Decimal)> + '_ {
        (0..self.n)
            .flat_map(move |i| (0..self.n).map(move |j| (i, j, self.amount(i, j))))
            .filter(|(_, _, amount)| *amount != Decimal::ZERO)
    }
}

impl fmt::Display for PaymentMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for j in 0..self.n {
                write!(f, "{:>12}", self.amount(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_matrix() {
        let payments = PaymentMatrix::zero(3);
        assert_eq!(payments.total_settled(), Decimal::ZERO);
        assert_eq!(payments.transfer_count(), 0);
    }

    #[test]
    fn test_sums_and_transfers() {
        let mut payments = PaymentMatrix::zero(3);
        payments.set(0, 1, dec!(15)); // 1 pays 0
        payments.set(2, 1, dec!(5));  // 1 pays 2
        assert_eq!(payments.paid_by(1), dec!(20));
        assert_eq!(payments.received_by(0), dec!(15));
        assert_eq!(payments.received_by(2), dec!(5));
        assert_eq!(payments.total_settled(), dec!(20));

        let transfers: Vec<_> = payments.transfers().collect();
        assert_eq!(transfers, vec![(0, 1, dec!(15)), (2, 1, dec!(5))]);
    }
}
