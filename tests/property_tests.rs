use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use settle_engine::core::balance::NetPositions;
use settle_engine::core::debt_matrix::DebtMatrix;
use settle_engine::graph::debt_edges::extract_edges;
use settle_engine::optimization::settlement::SettlementEngine;

/// Absolute tolerance for comparing solver output against exact Decimal
/// arithmetic. Amounts are kept small (≤ 10,000) so an absolute bound
/// is meaningful.
const EPSILON: f64 = 1e-4;

/// Generate a random debt matrix: 2 to 6 participants, each off-diagonal
/// entry either zero or an amount in [1, 10000] with cent precision.
fn arb_debt_matrix() -> impl Strategy<Value = DebtMatrix> {
    (2usize..=6).prop_flat_map(|n| {
        prop::collection::vec(
            prop::option::weighted(0.4, 1u64..1_000_000u64),
            n * n,
        )
        .prop_map(move |cells| {
            let rows: Vec<Vec<Decimal>> = (0..n)
                .map(|i| {
                    (0..n)
                        .map(|j| {
                            if i == j {
                                Decimal::ZERO
                            } else {
                                cells[i * n + j]
                                    .map(|cents| Decimal::new(cents as i64, 2))
                                    .unwrap_or(Decimal::ZERO)
                            }
                        })
                        .collect()
                })
                .collect();
            DebtMatrix::from_rows(rows).expect("generated rows are square and non-negative")
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ===================================================================
    // INVARIANT 1: Balance conservation.
    //
    // For every participant, net payment flow equals net debt flow.
    // The settlement changes who pays whom, never anyone's net position.
    // ===================================================================
    #[test]
    fn payments_conserve_balances(debts in arb_debt_matrix()) {
        let result = SettlementEngine::minimize_payments(&debts).unwrap();
        let debt_positions = NetPositions::from_debts(&debts);
        let pay_positions = NetPositions::from_payments(result.payments());
        for k in 0..debts.participant_count() {
            let expected = debt_positions.position(k).to_f64().unwrap();
            let actual = pay_positions.position(k).to_f64().unwrap();
            prop_assert!(
                (expected - actual).abs() <= EPSILON,
                "participant {}: net payment flow {} != net debt flow {}",
                k, actual, expected
            );
        }
    }

    // ===================================================================
    // INVARIANT 2: Structural zeros.
    //
    // No payment may appear where no debt was recorded. This is a
    // guarantee of the edge-restricted formulation, not of the LP.
    // ===================================================================
    #[test]
    fn no_payment_without_debt(debts in arb_debt_matrix()) {
        let result = SettlementEngine::minimize_payments(&debts).unwrap();
        for (i, j, amount) in debts.iter() {
            if amount == Decimal::ZERO {
                prop_assert_eq!(
                    result.payments().amount(i, j),
                    Decimal::ZERO,
                    "payment invented at ({}, {})", i, j
                );
            }
        }
    }

    // ===================================================================
    // INVARIANT 3: Objective ≤ gross. Always.
    //
    // Paying back the original debts one-for-one is feasible, so the
    // optimum can never move more money than the debts themselves.
    // ===================================================================
    #[test]
    fn settled_never_exceeds_gross(debts in arb_debt_matrix()) {
        let result = SettlementEngine::minimize_payments(&debts).unwrap();
        let settled = result.total_settled().to_f64().unwrap();
        let gross = result.gross_debt().to_f64().unwrap();
        prop_assert!(
            settled <= gross + EPSILON,
            "settled {} must be ≤ gross {}",
            settled, gross
        );
    }

    // ===================================================================
    // INVARIANT 4: All payments are non-negative.
    //
    // Negative solver noise must have been clamped to zero.
    // ===================================================================
    #[test]
    fn payments_are_non_negative(debts in arb_debt_matrix()) {
        let result = SettlementEngine::minimize_payments(&debts).unwrap();
        let n = debts.participant_count();
        for i in 0..n {
            for j in 0..n {
                prop_assert!(result.payments().amount(i, j) >= Decimal::ZERO);
            }
        }
    }

    // ===================================================================
    // INVARIANT 5: The solve is deterministic in objective value.
    //
    // The LP optimum is unique in value even when the optimal basis
    // is not; re-solving identical input must agree.
    // ===================================================================
    #[test]
    fn objective_is_deterministic(debts in arb_debt_matrix()) {
        let first = SettlementEngine::minimize_payments(&debts).unwrap();
        let second = SettlementEngine::minimize_payments(&debts).unwrap();
        prop_assert_eq!(first.total_settled(), second.total_settled());
    }

    // ===================================================================
    // INVARIANT 6: The objective is bounded below by the net outflows.
    //
    // Each participant's payments out must cover their net obligation,
    // so total volume ≥ sum of positive (owed_by − owed_to) values.
    // ===================================================================
    #[test]
    fn settled_covers_net_obligations(debts in arb_debt_matrix()) {
        let result = SettlementEngine::minimize_payments(&debts).unwrap();
        let net_outflow: f64 = (0..debts.participant_count())
            .map(|k| (debts.owed_by(k) - debts.owed_to(k)).to_f64().unwrap())
            .filter(|net| *net > 0.0)
            .sum();
        let settled = result.total_settled().to_f64().unwrap();
        prop_assert!(
            settled >= net_outflow - EPSILON,
            "settled {} must cover net obligations {}",
            settled, net_outflow
        );
    }

    // ===================================================================
    // INVARIANT 7: Edge extraction is an exact positive filter.
    //
    // Every extracted edge has a positive amount, and every positive
    // entry appears exactly once as an edge.
    // ===================================================================
    #[test]
    fn edges_match_positive_entries(debts in arb_debt_matrix()) {
        let edges = extract_edges(&debts);
        let positive_entries = debts
            .iter()
            .filter(|(_, _, amount)| *amount > Decimal::ZERO)
            .count();
        prop_assert_eq!(edges.len(), positive_entries);
        for edge in &edges {
            prop_assert!(edge.amount > Decimal::ZERO);
            prop_assert_eq!(debts.amount(edge.creditor, edge.debtor), edge.amount);
        }
    }
}
