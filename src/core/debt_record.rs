use crate::core::debt_matrix::{DebtMatrix, MatrixError};
use crate::core::participant::{Participant, Roster};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors arising when folding a debt log into a matrix.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("participant '{0}' is not on the roster")]
    UnknownParticipant(Participant),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// One individual covered expense: `creditor` paid on `debtor`'s behalf.
///
/// Records are immutable once created; the settlement engine operates on
/// the matrix their amounts accumulate into, not on the records themselves.
///
/// # Examples
///
/// ```
/// use settle_engine::core::debt_record::DebtRecord;
/// use settle_engine::core::participant::Participant;
/// use rust_decimal_macros::dec;
///
/// let record = DebtRecord::new(
///     Participant::new("alice"),
///     Participant::new("bob"),
///     dec!(42.50),
/// );
/// assert_eq!(record.amount(), dec!(42.50));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRecord {
    /// Unique identifier for this record.
    id: Uuid,
    /// The participant who covered the expense and is owed the amount.
    creditor: Participant,
    /// The participant on whose behalf it was paid.
    debtor: Participant,
    /// The amount owed. Must be positive.
    amount: Decimal,
    /// When this record was created.
    created_at: DateTime<Utc>,
    /// Optional memo ("groceries", "taxi", ...).
    memo: Option<String>,
}

impl DebtRecord {
    /// Create a new debt record.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(creditor: Participant, debtor: Participant, amount: Decimal) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Debt amount must be positive, got {}",
            amount
        );
        Self {
            id: Uuid::new_v4(),
            creditor,
            debtor,
            amount,
            created_at: Utc::now(),
            memo: None,
        }
    }

    /// Create a record with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        creditor: Participant,
        debtor: Participant,
        amount: Decimal,
    ) -> Self {
        assert!(amount > Decimal::ZERO);
        Self {
            id,
            creditor,
            debtor,
            amount,
            created_at: Utc::now(),
            memo: None,
        }
    }

    /// Attach a memo.
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn creditor(&self) -> &Participant {
        &self.creditor
    }

    pub fn debtor(&self) -> &Participant {
        &self.debtor
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }
}

/// An append-only collection of debt records.
///
/// The log is the raw transaction history; [`DebtLog::to_matrix`] folds it
/// into the dense [`DebtMatrix`] the settlement engine consumes, summing
/// all records for the same ordered (creditor, debtor) pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtLog {
    records: Vec<DebtRecord>,
}

impl DebtLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn add(&mut self, record: DebtRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[DebtRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total gross value of all records.
    pub fn gross_total(&self) -> Decimal {
        self.records.iter().map(|r| r.amount()).sum()
    }

    /// All unique participants referenced in this log, sorted by name.
    pub fn participants(&self) -> Vec<Participant> {
        let mut participants: Vec<Participant> = self
            .records
            .iter()
            .flat_map(|r| vec![r.creditor().clone(), r.debtor().clone()])
            .collect();
        participants.sort();
        participants.dedup();
        participants
    }

    /// Fold this log into a debt matrix indexed by `roster`.
    ///
    /// Every record's creditor and debtor must appear on the roster.
    pub fn to_matrix(&self, roster: &Roster) -> Result<DebtMatrix, LedgerError> {
        let mut matrix = DebtMatrix::new(roster.len());
        for record in &self.records {
            let creditor = roster
                .index_of(record.creditor())
                .ok_or_else(|| LedgerError::UnknownParticipant(record.creditor().clone()))?;
            let debtor = roster
                .index_of(record.debtor())
                .ok_or_else(|| LedgerError::UnknownParticipant(record.debtor().clone()))?;
            matrix.record(creditor, debtor, record.amount())?;
        }
        Ok(matrix)
    }
}

impl FromIterator<DebtRecord> for DebtLog {
    fn from_iter<T: IntoIterator<Item = DebtRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
