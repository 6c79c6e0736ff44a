//! Group trip example.
//!
//! Builds a debt log from individual covered expenses, folds it into a
//! matrix against a roster, and settles with the fewest transfers the
//! LP finds.

use rust_decimal_macros::dec;
use settle_engine::core::debt_record::{DebtLog, DebtRecord};
use settle_engine::core::participant::{Participant, Roster};
use settle_engine::optimization::instructions::payment_instructions;
use settle_engine::optimization::settlement::SettlementEngine;

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  settle-engine: Group Trip Example         ║");
    println!("╚════════════════════════════════════════════╝\n");

    let alice = Participant::new("alice");
    let bob = Participant::new("bob");
    let carol = Participant::new("carol");

    let mut log = DebtLog::new();
    log.add(
        DebtRecord::new(alice.clone(), bob.clone(), dec!(45)).with_memo("cabin deposit"),
    );
    log.add(
        DebtRecord::new(alice.clone(), carol.clone(), dec!(45)).with_memo("cabin deposit"),
    );
    log.add(DebtRecord::new(bob.clone(), alice.clone(), dec!(30)).with_memo("gas"));
    log.add(DebtRecord::new(bob.clone(), carol.clone(), dec!(30)).with_memo("gas"));
    log.add(DebtRecord::new(carol.clone(), alice.clone(), dec!(12)).with_memo("groceries"));
    log.add(DebtRecord::new(carol.clone(), bob.clone(), dec!(12)).with_memo("groceries"));

    println!("━━━ Expense log ({} records, gross {}) ━━━\n", log.len(), log.gross_total());
    for record in log.records() {
        println!(
            "  {} covered {} for {}  [{}]",
            record.creditor(),
            record.amount(),
            record.debtor(),
            record.memo().unwrap_or("-"),
        );
    }
    println!();

    let roster = Roster::new(vec![alice, bob, carol]);
    let debts = log.to_matrix(&roster).expect("all participants on roster");
    let result = SettlementEngine::minimize_payments(&debts).expect("solvable");

    println!("{}", result);

    println!("━━━ Who pays whom ━━━\n");
    let instructions = payment_instructions(result.payments(), &roster);
    if instructions.is_empty() {
        println!("  Nobody owes anything — the debts cancel out.");
    } else {
        for instruction in &instructions {
            println!("  {}", instruction);
        }
    }
}
