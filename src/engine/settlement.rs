use crate::core::balance::Balance;
use crate::core::expense::ExpenseLog;
use crate::core::member::MemberId;
use crate::core::money::{format_currency, round2, SETTLEMENT_EPSILON};
use crate::engine::SettlementEngine;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A proposed payment from one member to another.
///
/// Amounts are strictly positive by construction: `from` should pay `to`
/// exactly `amount` to move both toward zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Decimal,
}

impl Transfer {
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {}  {}",
            self.from.short(),
            self.to.short(),
            format_currency(self.amount)
        )
    }
}

impl SettlementEngine {
    /// Compute a transfer list that zeroes out the given balances.
    ///
    /// Greedy largest-creditor/largest-debtor matching: creditors sorted
    /// descending, debtors sorted most-negative-first (stable, so equal
    /// amounts keep their input order), then a two-cursor scan pairs the
    /// current largest on each side and moves `min(credit, |debt|)`
    /// between them. O(n log n) for the sorts, O(n) for the scan.
    ///
    /// The result is deterministic for a fixed input order but not unique
    /// in general, and the transfer count is a heuristic minimum — exact
    /// minimum-transfer settlement is a combinatorial problem this engine
    /// deliberately does not solve.
    ///
    /// Balances within one cent of zero are skipped. If total credit and
    /// total debit disagree, the residual is silently dropped when one
    /// side runs out.
    pub fn calculate_settlements(balances: &[Balance]) -> Vec<Transfer> {
        // Working copies: the scan mutates amounts, never the caller's data.
        let mut creditors: Vec<(MemberId, Decimal)> = balances
            .iter()
            .filter(|b| b.amount > SETTLEMENT_EPSILON)
            .map(|b| (b.member.clone(), b.amount))
            .collect();
        let mut debtors: Vec<(MemberId, Decimal)> = balances
            .iter()
            .filter(|b| b.amount < -SETTLEMENT_EPSILON)
            .map(|b| (b.member.clone(), b.amount))
            .collect();

        creditors.sort_by(|a, b| b.1.cmp(&a.1));
        debtors.sort_by(|a, b| a.1.cmp(&b.1));

        let mut transfers = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < creditors.len() && j < debtors.len() {
            let amount = creditors[i].1.min(debtors[j].1.abs());
            if amount > SETTLEMENT_EPSILON {
                let transfer =
                    Transfer::new(debtors[j].0.clone(), creditors[i].0.clone(), round2(amount));
                log::debug!("settle: {}", transfer);
                transfers.push(transfer);
            }
            // Applied even when below the emission threshold, so both
            // cursors still make progress toward zero.
            creditors[i].1 -= amount;
            debtors[j].1 += amount;

            if creditors[i].1 < SETTLEMENT_EPSILON {
                i += 1;
            }
            if debtors[j].1.abs() < SETTLEMENT_EPSILON {
                j += 1;
            }
        }

        transfers
    }

    /// Full pipeline: expenses → balances → transfers, wrapped in a plan.
    pub fn plan(expenses: &ExpenseLog, roster: &[MemberId]) -> SettlementPlan {
        let balances = Self::calculate_balances(expenses, roster);
        let transfers = Self::calculate_settlements(&balances);
        SettlementPlan {
            balances,
            transfers,
        }
    }
}

/// Result of a settlement computation: the balances it was derived from
/// and the transfers that zero them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
    balances: Vec<Balance>,
    transfers: Vec<Transfer>,
}

impl SettlementPlan {
    /// Build a plan directly from precomputed balances.
    pub fn from_balances(balances: Vec<Balance>) -> Self {
        let transfers = SettlementEngine::calculate_settlements(&balances);
        Self {
            balances,
            transfers,
        }
    }

    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Total value moved by the plan.
    pub fn total_moved(&self) -> Decimal {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// How many transfers the plan saves against naive settlement, where
    /// every debtor pays every creditor a proportional share, as a
    /// percentage of the naive count.
    pub fn transfer_savings_percent(&self) -> f64 {
        let creditors = self.balances.iter().filter(|b| b.is_creditor()).count();
        let debtors = self.balances.iter().filter(|b| b.is_debtor()).count();
        let naive = creditors * debtors;
        if naive == 0 {
            return 0.0;
        }
        (naive - self.transfers.len()) as f64 * 100.0 / naive as f64
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        writeln!(f, "Transfers:   {}", self.transfer_count())?;
        writeln!(f, "Total moved: {}", format_currency(self.total_moved()))?;
        writeln!(f, "Savings:     {:.1}%", self.transfer_savings_percent())?;
        for transfer in &self.transfers {
            writeln!(f, "  {}", transfer)?;
        }
        if self.transfers.is_empty() {
            writeln!(f, "  (already settled)")?;
        }
        Ok(())
    }
}
