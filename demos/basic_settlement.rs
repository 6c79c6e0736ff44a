//! Basic settlement example.
//!
//! Demonstrates how the engine collapses a web of debts among four
//! people into a handful of settling transfers.

use rust_decimal_macros::dec;
use settle_engine::core::debt_matrix::DebtMatrix;
use settle_engine::core::participant::Roster;
use settle_engine::optimization::instructions::payment_instructions;
use settle_engine::optimization::settlement::SettlementEngine;

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  settle-engine: Basic Settlement Example   ║");
    println!("╚════════════════════════════════════════════╝\n");

    // Row i lists what each participant j owes i.
    let debts = DebtMatrix::from_rows(vec![
        vec![dec!(0), dec!(10), dec!(10), dec!(10)],
        vec![dec!(20), dec!(0), dec!(20), dec!(0)],
        vec![dec!(10), dec!(20), dec!(0), dec!(0)],
        vec![dec!(0), dec!(0), dec!(100.2), dec!(0)],
    ])
    .expect("valid debt matrix");

    let recorded = debts.iter().filter(|(_, _, a)| !a.is_zero()).count();
    println!(
        "━━━ Debts ({} recorded, gross {}) ━━━\n",
        recorded,
        debts.gross_total()
    );
    print!("{}", debts);
    println!();

    let result = SettlementEngine::minimize_payments(&debts).expect("solvable");

    println!("{}", result);

    println!("━━━ Payments ━━━\n");
    print!("{}", result.payments());
    println!();

    let roster = Roster::generated(4);
    for instruction in payment_instructions(result.payments(), &roster) {
        println!("  {}", instruction);
    }
}
