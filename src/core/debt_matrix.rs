use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors arising from debt matrix construction and mutation.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("row {row} has {len} entries, expected {expected} (matrix must be square)")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("negative amount {amount} at ({row}, {col}); debts must be non-negative")]
    NegativeAmount {
        row: usize,
        col: usize,
        amount: Decimal,
    },
    #[error("index ({row}, {col}) out of bounds for {n} participants")]
    IndexOutOfBounds { row: usize, col: usize, n: usize },
}

/// Dense N×N matrix of pairwise debts.
///
/// Entry `(i, j)` is the total amount participant `j` owes participant `i`,
/// accumulated over all individual expenses `i` covered on `j`'s behalf.
/// The diagonal is conventionally zero. The matrix is not required to be
/// symmetric: `A` may owe `B` while `B` simultaneously owes `A`.
///
/// Negative amounts are rejected at construction rather than silently
/// dropped, so every stored entry is guaranteed non-negative.
///
/// # Examples
///
/// ```
/// use settle_engine::core::debt_matrix::DebtMatrix;
/// use rust_decimal_macros::dec;
///
/// let mut debts = DebtMatrix::new(3);
/// debts.record(0, 1, dec!(25)).unwrap(); // participant 1 owes participant 0
/// debts.record(0, 1, dec!(5)).unwrap();  // accumulates
/// assert_eq!(debts.amount(0, 1), dec!(30));
/// assert_eq!(debts.owed_by(1), dec!(30));
/// assert_eq!(debts.owed_to(0), dec!(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtMatrix {
    n: usize,
    /// Row-major entries: `entries[i * n + j]` = amount j owes i.
    entries: Vec<Decimal>,
}

impl DebtMatrix {
    /// Create an all-zero matrix for `n` participants.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            entries: vec![Decimal::ZERO; n * n],
        }
    }

    /// Build a matrix from explicit rows.
    ///
    /// Fails if the rows do not form a square matrix or any entry is
    /// negative. Non-zero diagonal entries are accepted (a self-debt is
    /// meaningless but harmless; it nets to zero in every balance).
    pub fn from_rows(rows: Vec<Vec<Decimal>>) -> Result<Self, MatrixError> {
        let n = rows.len();
        let mut entries = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(MatrixError::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
            for (j, amount) in row.into_iter().enumerate() {
                if amount < Decimal::ZERO {
                    return Err(MatrixError::NegativeAmount {
                        row: i,
                        col: j,
                        amount,
                    });
                }
                entries.push(amount);
            }
        }
        Ok(Self { n, entries })
    }

    /// Number of participants (the matrix dimension).
    pub fn participant_count(&self) -> usize {
        self.n
    }

    /// The amount participant `debtor` owes participant `creditor`.
    pub fn amount(&self, creditor: usize, debtor: usize) -> Decimal {
        self.entries[creditor * self.n + debtor]
    }

    /// Record an additional debt: `debtor` owes `creditor` `amount` more.
    ///
    /// Amounts accumulate; recording the same pair twice sums the amounts.
    pub fn record(
        &mut self,
        creditor: usize,
        debtor: usize,
        amount: Decimal,
    ) -> Result<(), MatrixError> {
        if creditor >= self.n || debtor >= self.n {
            return Err(MatrixError::IndexOutOfBounds {
                row: creditor,
                col: debtor,
                n: self.n,
            });
        }
        if amount < Decimal::ZERO {
            return Err(MatrixError::NegativeAmount {
                row: creditor,
                col: debtor,
                amount,
            });
        }
        self.entries[creditor * self.n + debtor] += amount;
        Ok(())
    }

    /// Total amount participant `k` owes across all counterparties
    /// (column sum).
    pub fn owed_by(&self, k: usize) -> Decimal {
        (0..self.n).map(|i| self.amount(i, k)).sum()
    }

    /// Total amount owed *to* participant `k` across all counterparties
    /// (row sum).
    pub fn owed_to(&self, k: usize) -> Decimal {
        (0..self.n).map(|j| self.amount(k, j)).sum()
    }

    /// Sum of every entry: the gross value of all recorded debts.
    pub fn gross_total(&self) -> Decimal {
        self.entries.iter().sum()
    }

    /// True if no debt is recorded anywhere.
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|e| *e == Decimal::ZERO)
    }

    /// Iterate over all entries as `(creditor, debtor, amount)`, row-major,
    /// including zeros.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Decimal)> + '_ {
        (0..self.n).flat_map(move |i| (0..self.n).map(move |j| (i, j, self.amount(i, j))))
    }
}

impl fmt::Display for DebtMatrix {
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
    fn test_from_rows_valid() {
        let debts = DebtMatrix::from_rows(vec![
            vec![dec!(0), dec!(10)],
            vec![dec!(20), dec!(0)],
        ])
        .unwrap();
        assert_eq!(debts.participant_count(), 2);
        assert_eq!(debts.amount(0, 1), dec!(10));
        assert_eq!(debts.amount(1, 0), dec!(20));
        assert_eq!(debts.gross_total(), dec!(30));
    }

    #[test]
    fn test_from_rows_not_square() {
        let result = DebtMatrix::from_rows(vec![
            vec![dec!(0), dec!(10)],
            vec![dec!(20)],
        ]);
        assert!(matches!(result, Err(MatrixError::NotSquare { row: 1, .. })));
    }

    #[test]
    fn test_from_rows_rejects_negative() {
        let result = DebtMatrix::from_rows(vec![
            vec![dec!(0), dec!(-5)],
            vec![dec!(20), dec!(0)],
        ]);
        assert!(matches!(
            result,
            Err(MatrixError::NegativeAmount { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn test_record_accumulates() {
        let mut debts = DebtMatrix::new(3);
        debts.record(1, 2, dec!(7.50)).unwrap();
        debts.record(1, 2, dec!(2.50)).unwrap();
        assert_eq!(debts.amount(1, 2), dec!(10));
    }

    #[test]
    fn test_record_out_of_bounds() {
        let mut debts = DebtMatrix::new(2);
        let result = debts.record(0, 2, dec!(1));
        assert!(matches!(result, Err(MatrixError::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_record_rejects_negative() {
        let mut debts = DebtMatrix::new(2);
        let result = debts.record(0, 1, dec!(-1));
        assert!(matches!(result, Err(MatrixError::NegativeAmount { .. })));
    }

    #[test]
    fn test_row_and_column_sums() {
        // Participant 1 owes 0: 10, owes 2: 30. Participant 0 owes 2: 5.
        let debts = DebtMatrix::from_rows(vec![
            vec![dec!(0), dec!(10), dec!(0)],
            vec![dec!(0), dec!(0), dec!(0)],
            vec![dec!(5), dec!(30), dec!(0)],
        ])
        .unwrap();
        assert_eq!(debts.owed_by(1), dec!(40));
        assert_eq!(debts.owed_to(0), dec!(10));
        assert_eq!(debts.owed_to(2), dec!(35));
        assert_eq!(debts.owed_by(0), dec!(5));
    }

    #[test]
    fn test_zero_matrix() {
        let debts = DebtMatrix::new(4);
        assert!(debts.is_zero());
        assert_eq!(debts.gross_total(), Decimal::ZERO);
    }
}
