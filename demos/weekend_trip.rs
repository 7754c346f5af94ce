//! Multi-expense weekend trip walkthrough.
//!
//! Four people, three expenses with uneven participation, one settlement
//! plan. Shows how a chain of debts compresses to a handful of transfers.

use rust_decimal_macros::dec;
use split_engine::core::expense::{Expense, ExpenseLog};
use split_engine::core::member::MemberId;
use split_engine::engine::SettlementEngine;

fn main() {
    println!("╔═══════════════════════════════════════╗");
    println!("║  split-engine: Weekend Trip Example   ║");
    println!("╚═══════════════════════════════════════╝\n");

    let alice = MemberId::new("alice");
    let bob = MemberId::new("bob");
    let carol = MemberId::new("carol");
    let dave = MemberId::new("dave");
    let roster = vec![alice.clone(), bob.clone(), carol.clone(), dave.clone()];

    let mut log = ExpenseLog::new();

    // Alice books the cabin for everyone
    log.add(Expense::split_evenly(alice.clone(), dec!(280), &roster).with_description("Cabin"));

    // Bob covers fuel for everyone
    log.add(Expense::split_evenly(bob.clone(), dec!(60), &roster).with_description("Fuel"));

    // Carol buys groceries, Dave sat that one out
    log.add(
        Expense::split_evenly(
            carol.clone(),
            dec!(90),
            &[alice.clone(), bob.clone(), carol.clone()],
        )
        .with_description("Groceries"),
    );

    println!("Expenses:");
    for expense in log.expenses() {
        println!(
            "  {:<12} {:>8}  paid by {}",
            expense.description().unwrap_or("-"),
            expense.total(),
            expense.payer()
        );
    }
    println!();

    let summary = SettlementEngine::summarize(&log, &roster);
    println!("{}", summary);

    let plan = SettlementEngine::plan(&log, &roster);
    println!("{}", plan);
}
