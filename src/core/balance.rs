use crate::core::debt_matrix::DebtMatrix;
use crate::core::payment_matrix::PaymentMatrix;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-participant net positions.
///
/// A positive position means the participant is a net creditor (owed money
/// overall); a negative position means a net debtor. Positions always sum
/// to zero because every amount appears once as owed-to and once as owed-by.
///
/// The same vector can be derived from a debt matrix or from a payment
/// matrix. The balance-conservation law says the two must coincide: the
/// settlement changes *who pays whom*, never anyone's net position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPositions {
    positions: Vec<Decimal>,
}

impl NetPositions {
    /// Net positions induced by a debt matrix: `owed_to(k) - owed_by(k)`.
    pub fn from_debts(debts: &DebtMatrix) -> Self {
        let n = debts.participant_count();
        Self {
            positions: (0..n).map(|k| debts.owed_to(k) - debts.owed_by(k)).collect(),
        }
    }

    /// Net positions induced by a payment matrix:
    /// `received_by(k) - paid_by(k)`.
    pub fn from_payments(payments: &PaymentMatrix) -> Self {
        let n = payments.participant_count();
        Self {
            positions: (0..n)
                .map(|k| payments.received_by(k) - payments.paid_by(k))
                .collect(),
        }
    }

    /// Net position of participant `k`.
    pub fn position(&self, k: usize) -> Decimal {
        self.positions[k]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All positions in participant order.
    pub fn as_slice(&self) -> &[Decimal] {
        &self.positions
    }

    /// True if the positions sum to zero (credits match debits exactly).
    pub fn is_balanced(&self) -> bool {
        self.positions.iter().sum::<Decimal>() == Decimal::ZERO
    }

    /// True if every position agrees with `other` within `tolerance`.
    ///
    /// Used to verify balance conservation between solved payments and the
    /// original debts, where solver round-off makes exact equality too
    /// strict.
    pub fn matches(&self, other: &NetPositions, tolerance: Decimal) -> bool {
        self.positions.len() == other.positions.len()
            && self
                .positions
                .iter()
                .zip(&other.positions)
                .all(|(a, b)| (*a - *b).abs() <= tolerance)
    }
}
