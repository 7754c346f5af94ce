//! Basic balance and settlement example.
//!
//! Demonstrates how the engine nets a dinner bill into balances and a
//! minimal transfer list.

use rust_decimal_macros::dec;
use split_engine::core::expense::{Expense, ExpenseLog, Split};
use split_engine::core::member::MemberId;
use split_engine::core::money::format_currency;
use split_engine::engine::SettlementEngine;

fn main() {
    println!("╔═══════════════════════════════════════╗");
    println!("║  split-engine: Basic Split Example    ║");
    println!("╚═══════════════════════════════════════╝\n");

    // --- Scenario 1: Two flatmates ---
    println!("━━━ Scenario 1: Two Flatmates ━━━\n");

    let alice = MemberId::new("alice");
    let bob = MemberId::new("bob");
    let roster = vec![alice.clone(), bob.clone()];

    let mut log = ExpenseLog::new();
    log.add(
        Expense::new(
            alice.clone(),
            dec!(100),
            vec![
                Split::new(alice.clone(), dec!(50)),
                Split::new(bob.clone(), dec!(50)),
            ],
        )
        .with_description("Groceries"),
    );

    let summary = SettlementEngine::summarize(&log, &roster);
    println!("{}", summary);

    // --- Scenario 2: Three-person dinner ---
    println!("━━━ Scenario 2: Three-Person Dinner ━━━\n");

    let carol = MemberId::new("carol");
    let roster = vec![alice.clone(), bob.clone(), carol.clone()];

    let mut log = ExpenseLog::new();
    log.add(
        Expense::split_evenly(alice.clone(), dec!(90), &roster).with_description("Dinner"),
    );

    let plan = SettlementEngine::plan(&log, &roster);
    println!("{}", plan);

    // Show individual positions with status tags
    println!("━━━ Net Positions ━━━\n");
    for balance in plan.balances() {
        let status = if balance.is_creditor() {
            "CREDITOR"
        } else if balance.is_debtor() {
            "DEBTOR"
        } else {
            "SETTLED"
        };
        println!(
            "  {:<10} {:>10}  [{}]",
            balance.member,
            format_currency(balance.amount),
            status
        );
    }
}
