use proptest::prelude::*;
use rust_decimal::Decimal;
use split_engine::core::expense::{Expense, ExpenseLog};
use split_engine::core::member::MemberId;
use split_engine::engine::SettlementEngine;

/// Small member pool (to make shared expenses and debts likely).
fn arb_member() -> impl Strategy<Value = MemberId> {
    prop::sample::select(vec![
        MemberId::new("alice"),
        MemberId::new("bob"),
        MemberId::new("carol"),
        MemberId::new("dave"),
        MemberId::new("erin"),
        MemberId::new("frank"),
    ])
}

/// Random cent-precise amount between $0.01 and $5,000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A random evenly-split expense whose shares sum exactly to the total,
/// so generated logs always satisfy the zero-sum property.
fn arb_expense() -> impl Strategy<Value = Expense> {
    (
        arb_member(),
        arb_amount(),
        prop::collection::vec(arb_member(), 1..6),
    )
        .prop_map(|(payer, total, mut participants)| {
            participants.sort();
            participants.dedup();
            Expense::split_evenly(payer, total, &participants)
        })
}

/// A random expense log of 1..30 expenses.
fn arb_expense_log() -> impl Strategy<Value = ExpenseLog> {
    prop::collection::vec(arb_expense(), 1..30)
        .prop_map(|expenses| expenses.into_iter().collect::<ExpenseLog>())
}

fn full_roster() -> Vec<MemberId> {
    ["alice", "bob", "carol", "dave", "erin", "frank"]
        .iter()
        .map(|m| MemberId::new(*m))
        .collect()
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Balances sum to zero.
    //
    // Whenever every expense's shares sum exactly to its total, the
    // resulting balances cancel out — every credit has a matching debit.
    // ===================================================================
    #[test]
    fn balances_sum_to_zero(log in arb_expense_log()) {
        let balances = SettlementEngine::calculate_balances(&log, &full_roster());
        let sum: Decimal = balances.iter().map(|b| b.amount).sum();
        prop_assert_eq!(sum, Decimal::ZERO, "credits and debits must cancel");
    }

    // ===================================================================
    // INVARIANT 2: Roster completeness.
    //
    // Every roster member appears exactly once, in roster order, even
    // with no expenses at all.
    // ===================================================================
    #[test]
    fn roster_members_always_present(log in arb_expense_log()) {
        let roster = full_roster();
        let balances = SettlementEngine::calculate_balances(&log, &roster);
        prop_assert!(balances.len() >= roster.len());
        for (idx, member) in roster.iter().enumerate() {
            prop_assert_eq!(&balances[idx].member, member);
        }
    }

    // ===================================================================
    // INVARIANT 3: Transfer positivity.
    //
    // Every emitted transfer moves a strictly positive amount.
    // ===================================================================
    #[test]
    fn transfers_are_positive(log in arb_expense_log()) {
        let plan = SettlementEngine::plan(&log, &full_roster());
        for transfer in plan.transfers() {
            prop_assert!(
                transfer.amount > Decimal::ZERO,
                "transfer {} must be positive",
                transfer.amount
            );
        }
    }

    // ===================================================================
    // INVARIANT 4: Conservation per member.
    //
    // For balanced inputs, inflow minus outflow equals each member's
    // balance within the one-cent tolerance.
    // ===================================================================
    #[test]
    fn transfers_conserve_balances(log in arb_expense_log()) {
        let plan = SettlementEngine::plan(&log, &full_roster());
        for balance in plan.balances() {
            let inflow: Decimal = plan
                .transfers()
                .iter()
                .filter(|t| t.to == balance.member)
                .map(|t| t.amount)
                .sum();
            let outflow: Decimal = plan
                .transfers()
                .iter()
                .filter(|t| t.from == balance.member)
                .map(|t| t.amount)
                .sum();
            let residual = balance.amount - (inflow - outflow);
            prop_assert!(
                residual.abs() <= Decimal::new(1, 2),
                "member {} keeps residual {}",
                balance.member,
                residual
            );
        }
    }

    // ===================================================================
    // INVARIANT 5: Settlement is idempotent on settled balances.
    //
    // Applying the plan's transfers settles the group: recomputing
    // settlements on the post-transfer balances yields nothing.
    // ===================================================================
    #[test]
    fn settled_groups_need_no_transfers(log in arb_expense_log()) {
        use split_engine::core::balance::Balance;

        let plan = SettlementEngine::plan(&log, &full_roster());
        let settled: Vec<Balance> = plan
            .balances()
            .iter()
            .map(|b| {
                let inflow: Decimal = plan.transfers().iter()
                    .filter(|t| t.to == b.member).map(|t| t.amount).sum();
                let outflow: Decimal = plan.transfers().iter()
                    .filter(|t| t.from == b.member).map(|t| t.amount).sum();
                Balance::new(b.member.clone(), b.amount - inflow + outflow)
            })
            .collect();

        let again = SettlementEngine::calculate_settlements(&settled);
        prop_assert!(again.is_empty(), "second pass found {} transfers", again.len());
    }

    // ===================================================================
    // INVARIANT 6: Determinism.
    //
    // Identical input produces identical balances and transfers. No
    // randomness, no hidden state.
    // ===================================================================
    #[test]
    fn settlement_is_deterministic(log in arb_expense_log()) {
        let roster = full_roster();
        let plan1 = SettlementEngine::plan(&log, &roster);
        let plan2 = SettlementEngine::plan(&log, &roster);
        prop_assert_eq!(plan1.balances(), plan2.balances());
        prop_assert_eq!(plan1.transfers(), plan2.transfers());
    }

    // ===================================================================
    // INVARIANT 7: Transfer count bound.
    //
    // The greedy scan emits at most creditors + debtors − 1 transfers.
    // ===================================================================
    #[test]
    fn transfer_count_is_bounded(log in arb_expense_log()) {
        let plan = SettlementEngine::plan(&log, &full_roster());
        let creditors = plan.balances().iter().filter(|b| b.is_creditor()).count();
        let debtors = plan.balances().iter().filter(|b| b.is_debtor()).count();
        if creditors + debtors > 0 {
            prop_assert!(
                plan.transfer_count() <= creditors + debtors - 1,
                "{} transfers for {} creditors and {} debtors",
                plan.transfer_count(),
                creditors,
                debtors
            );
        } else {
            prop_assert_eq!(plan.transfer_count(), 0);
        }
    }
}
