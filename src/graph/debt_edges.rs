use crate::core::debt_matrix::DebtMatrix;
use rust_decimal::Decimal;

/// One directed debt edge: `debtor` owes `creditor` a strictly positive
/// `amount`.
///
/// Debt edges are the only pairs eligible for a payment variable in the
/// settlement program. Carrying the amount on the edge keeps variable
/// creation and constraint assembly in agreement by construction — both
/// consume the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtEdge {
    /// Row index: the participant who is owed.
    pub creditor: usize,
    /// Column index: the participant who owes.
    pub debtor: usize,
    /// The recorded debt, always > 0.
    pub amount: Decimal,
}

/// Extract the sparse debt edge set from a dense debt matrix.
///
/// Produces every pair `(i, j)` with a strictly positive entry, in
/// column-major order (all creditors of debtor 0 first, then debtor 1,
/// and so on). The order is arbitrary but deterministic; what matters is
/// that a single enumeration feeds the whole formulation.
///
/// Zero entries never produce an edge, so the settlement program cannot
/// invent a payment between parties with no debt relationship. Self-pairs
/// only appear if the diagonal is non-zero; the filter does not
/// special-case `i == j`.
pub fn extract_edges(debts: &DebtMatrix) -> Vec<DebtEdge> {
    let n = debts.participant_count();
    let mut edges = Vec::new();
    for debtor in 0..n {
        for creditor in 0..n {
            let amount = debts.amount(creditor, debtor);
            if amount > Decimal::ZERO {
                edges.push(DebtEdge {
                    creditor,
                    debtor,
                    amount,
                });
            }
        }
    }
    edges
}
