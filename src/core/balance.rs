use crate::core::expense::Expense;
use crate::core::member::MemberId;
use crate::core::money::{round2, SETTLEMENT_EPSILON};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A member's net position in the group.
///
/// Positive means the member is owed money in aggregate (net creditor).
/// Negative means the member owes money (net debtor). Magnitudes at or
/// below one cent are treated as settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub member: MemberId,
    pub amount: Decimal,
}

impl Balance {
    pub fn new(member: impl Into<MemberId>, amount: Decimal) -> Self {
        Self {
            member: member.into(),
            amount,
        }
    }

    pub fn is_creditor(&self) -> bool {
        self.amount > SETTLEMENT_EPSILON
    }

    pub fn is_debtor(&self) -> bool {
        self.amount < -SETTLEMENT_EPSILON
    }

    pub fn is_settled(&self) -> bool {
        !self.is_creditor() && !self.is_debtor()
    }
}

/// Accumulates each member's running signed position while expenses fold in.
///
/// Keys are whatever member identifiers appear: the sheet is seeded from the
/// group roster, and members referenced only by expenses are added on first
/// sight. Iteration order is insertion order — roster first, then extras —
/// which fixes the output order of [`balances`](BalanceSheet::balances).
///
/// The sheet is ephemeral: it is rebuilt from scratch on every calculation
/// and never persisted.
#[derive(Debug, Clone, Default)]
pub struct BalanceSheet {
    order: Vec<MemberId>,
    amounts: HashMap<MemberId, Decimal>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sheet with every roster member at zero.
    pub fn with_roster(roster: &[MemberId]) -> Self {
        let mut sheet = Self::new();
        for member in roster {
            sheet.entry(member);
        }
        sheet
    }

    fn entry(&mut self, member: &MemberId) -> &mut Decimal {
        if !self.amounts.contains_key(member) {
            self.order.push(member.clone());
        }
        self.amounts.entry(member.clone()).or_insert(Decimal::ZERO)
    }

    /// Increase a member's position (they are owed more).
    pub fn credit(&mut self, member: &MemberId, amount: Decimal) {
        *self.entry(member) += amount;
    }

    /// Decrease a member's position (they owe more).
    pub fn debit(&mut self, member: &MemberId, amount: Decimal) {
        *self.entry(member) -= amount;
    }

    /// Apply an expense: the payer fronted the total and is owed it back,
    /// each split member owes their share.
    pub fn apply_expense(&mut self, expense: &Expense) {
        self.credit(expense.payer(), expense.total());
        for split in expense.splits() {
            self.debit(&split.member, split.amount);
        }
    }

    /// The raw (unrounded) position of a member, zero if unknown.
    pub fn amount_for(&self, member: &MemberId) -> Decimal {
        self.amounts.get(member).copied().unwrap_or(Decimal::ZERO)
    }

    /// Number of members tracked.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Extract the balances in insertion order, each rounded to cents.
    ///
    /// Rounding happens here, once per member, rather than per expense —
    /// accumulating raw amounts first keeps many small shares from
    /// compounding rounding error.
    pub fn balances(&self) -> Vec<Balance> {
        self.order
            .iter()
            .map(|member| Balance::new(member.clone(), round2(self.amount_for(member))))
            .collect()
    }

    /// Sum of all positive positions.
    pub fn total_credit(&self) -> Decimal {
        self.amounts
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .sum()
    }

    /// Sum of magnitudes of all negative positions.
    pub fn total_debit(&self) -> Decimal {
        self.amounts
            .values()
            .filter(|v| **v < Decimal::ZERO)
            .map(|v| -*v)
            .sum()
    }

    /// Whether credits and debits cancel out, within the settlement
    /// tolerance. Holds whenever every expense's shares sum to its total;
    /// expenses recorded with mismatched shares leak imbalance in here.
    pub fn is_balanced(&self) -> bool {
        let sum: Decimal = self.amounts.values().sum();
        sum.abs() < SETTLEMENT_EPSILON
    }

    /// Whether every member is effectively settled.
    pub fn is_settled(&self) -> bool {
        self.balances().iter().all(Balance::is_settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Split;
    use rust_decimal_macros::dec;

    fn member(id: &str) -> MemberId {
        MemberId::new(id)
    }

    #[test]
    fn test_sheet_credit_debit() {
        let mut sheet = BalanceSheet::new();
        sheet.credit(&member("alice"), dec!(100));
        sheet.debit(&member("alice"), dec!(40));
        sheet.debit(&member("bob"), dec!(60));

        assert_eq!(sheet.amount_for(&member("alice")), dec!(60));
        assert_eq!(sheet.amount_for(&member("bob")), dec!(-60));
        assert_eq!(sheet.amount_for(&member("carol")), Decimal::ZERO);
    }

    #[test]
    fn test_apply_expense() {
        let mut sheet = BalanceSheet::new();
        let expense = Expense::new(
            member("alice"),
            dec!(100),
            vec![
                Split::new("alice", dec!(50)),
                Split::new("bob", dec!(50)),
            ],
        );
        sheet.apply_expense(&expense);

        assert_eq!(sheet.amount_for(&member("alice")), dec!(50));
        assert_eq!(sheet.amount_for(&member("bob")), dec!(-50));
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_roster_order_preserved() {
        let roster = vec![member("carol"), member("alice"), member("bob")];
        let mut sheet = BalanceSheet::with_roster(&roster);
        // A member outside the roster shows up after it
        sheet.debit(&member("dave"), dec!(10));

        let balances = sheet.balances();
        let order: Vec<&str> = balances.iter().map(|b| b.member.as_str()).collect();
        assert_eq!(order, vec!["carol", "alice", "bob", "dave"]);
    }

    #[test]
    fn test_rounding_applied_once_at_extraction() {
        let mut sheet = BalanceSheet::new();
        // Three thirds accumulate exactly before the terminal rounding
        for _ in 0..3 {
            sheet.credit(&member("alice"), dec!(0.333333));
        }
        assert_eq!(sheet.amount_for(&member("alice")), dec!(0.999999));
        assert_eq!(sheet.balances()[0].amount, dec!(1.00));
    }

    #[test]
    fn test_is_settled_within_tolerance() {
        let mut sheet = BalanceSheet::new();
        sheet.credit(&member("alice"), dec!(0.005));
        sheet.debit(&member("bob"), dec!(0.005));
        assert!(sheet.is_settled());
    }

    #[test]
    fn test_balance_predicates() {
        assert!(Balance::new("a", dec!(5)).is_creditor());
        assert!(Balance::new("b", dec!(-5)).is_debtor());
        assert!(Balance::new("c", dec!(0.005)).is_settled());
        assert!(Balance::new("d", dec!(0.01)).is_settled());
    }
}
