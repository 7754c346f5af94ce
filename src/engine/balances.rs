use crate::core::balance::{Balance, BalanceSheet};
use crate::core::expense::ExpenseLog;
use crate::core::member::MemberId;
use crate::core::money::format_currency;
use crate::engine::SettlementEngine;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

impl SettlementEngine {
    /// Fold an expense log into one net balance per member.
    ///
    /// The roster defines the output domain: every roster member appears
    /// exactly once, zero included. Members referenced only by expenses
    /// (as payer or in a split) are appended after the roster in
    /// first-seen order — nothing is rejected.
    ///
    /// # Algorithm
    ///
    /// 1. Seed a balance sheet with every roster member at zero.
    /// 2. For each expense, in input order: credit the payer by the
    ///    expense total, debit each split member by their share.
    /// 3. Round every balance to cents, once, at the end.
    pub fn calculate_balances(expenses: &ExpenseLog, roster: &[MemberId]) -> Vec<Balance> {
        let mut sheet = BalanceSheet::with_roster(roster);
        for expense in expenses.expenses() {
            sheet.apply_expense(expense);
        }
        log::debug!(
            "balances: {} expenses over {} members, credit {} / debit {}",
            expenses.len(),
            sheet.len(),
            sheet.total_credit(),
            sheet.total_debit()
        );
        sheet.balances()
    }

    /// Like [`calculate_balances`](Self::calculate_balances), wrapped in a
    /// summary with group-level totals.
    pub fn summarize(expenses: &ExpenseLog, roster: &[MemberId]) -> BalanceSummary {
        let mut sheet = BalanceSheet::with_roster(roster);
        for expense in expenses.expenses() {
            sheet.apply_expense(expense);
        }
        BalanceSummary {
            balances: sheet.balances(),
            gross_total: expenses.gross_total(),
            total_credit: sheet.total_credit(),
            total_debit: sheet.total_debit(),
        }
    }
}

/// Result of a balance calculation over a whole group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// One balance per member, roster order first.
    balances: Vec<Balance>,
    /// Gross total of all expenses folded in.
    gross_total: Decimal,
    /// Sum of all positive positions.
    total_credit: Decimal,
    /// Sum of magnitudes of all negative positions.
    total_debit: Decimal,
}

impl BalanceSummary {
    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    pub fn gross_total(&self) -> Decimal {
        self.gross_total
    }

    pub fn total_credit(&self) -> Decimal {
        self.total_credit
    }

    pub fn total_debit(&self) -> Decimal {
        self.total_debit
    }

    /// The balance of a specific member, zero if unknown.
    pub fn balance_for(&self, member: &MemberId) -> Decimal {
        self.balances
            .iter()
            .find(|b| &b.member == member)
            .map(|b| b.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Whether credits and debits cancel within the settlement tolerance.
    pub fn is_balanced(&self) -> bool {
        let sum: Decimal = self.balances.iter().map(|b| b.amount).sum();
        sum.abs() < crate::core::money::SETTLEMENT_EPSILON
    }

    /// Whether everyone is effectively settled.
    pub fn is_settled(&self) -> bool {
        self.balances.iter().all(Balance::is_settled)
    }
}

impl std::fmt::Display for BalanceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Balances ===")?;
        writeln!(f, "Expenses total:  {}", format_currency(self.gross_total))?;
        writeln!(f, "Owed to members: {}", format_currency(self.total_credit))?;
        writeln!(f, "Owed by members: {}", format_currency(self.total_debit))?;
        for balance in &self.balances {
            let status = if balance.is_creditor() {
                "CREDITOR"
            } else if balance.is_debtor() {
                "DEBTOR"
            } else {
                "SETTLED"
            };
            writeln!(
                f,
                "  {:<24} {:>12}  [{}]",
                balance.member.short(),
                format_currency(balance.amount),
                status
            )?;
        }
        Ok(())
    }
}
