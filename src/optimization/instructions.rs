use crate::core::participant::{Participant, Roster};
use crate::core::payment_matrix::PaymentMatrix;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One settling transfer: `payer` should send `amount` to `payee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstruction {
    pub payer: Participant,
    pub payee: Participant,
    pub amount: Decimal,
}

impl std::fmt::Display for PaymentInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} {}", self.payer, self.payee, self.amount)
    }
}

/// Flatten a payment matrix into a transfer list against a roster.
///
/// Instructions come out in the matrix's row-major order (grouped by payee),
/// which is deterministic for a given input. Participants whose index falls
/// outside the roster keep a generated placeholder name; callers that built
/// the matrix from the same roster never hit that path.
pub fn payment_instructions(
    payments: &PaymentMatrix,
    roster: &Roster,
) -> Vec<PaymentInstruction> {
    payments
        .transfers()
        .map(|(payee, payer, amount)| PaymentInstruction {
            payer: name_or_placeholder(roster, payer),
            payee: name_or_placeholder(roster, payee),
            amount,
        })
        .collect()
}

fn name_or_placeholder(roster: &Roster, index: usize) -> Participant {
    roster
        .get(index)
        .cloned()
        .unwrap_or_else(|| Participant::new(format!("P-{:03}", index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_instructions_match_matrix() {
        let roster = Roster::new(vec![
            Participant::new("alice"),
            Participant::new("bob"),
            Participant::new("carol"),
        ]);
        let mut payments = PaymentMatrix::zero(3);
        payments.set(0, 1, dec!(25)); // bob pays alice
        payments.set(2, 0, dec!(10)); // alice pays carol

        let instructions = payment_instructions(&payments, &roster);
        assert_eq!(
            instructions,
            vec![
                PaymentInstruction {
                    payer: Participant::new("bob"),
                    payee: Participant::new("alice"),
                    amount: dec!(25),
                },
                PaymentInstruction {
                    payer: Participant::new("alice"),
                    payee: Participant::new("carol"),
                    amount: dec!(10),
                },
            ]
        );
    }

    #[test]
    fn test_instructions_skip_zero_entries() {
        let roster = Roster::generated(2);
        let payments = PaymentMatrix::zero(2);
        assert!(payment_instructions(&payments, &roster).is_empty());
    }

    #[test]
    fn test_instruction_display() {
        let instruction = PaymentInstruction {
            payer: Participant::new("bob"),
            payee: Participant::new("alice"),
            amount: dec!(12.50),
        };
        assert_eq!(format!("{}", instruction), "bob pays alice 12.50");
    }
}
