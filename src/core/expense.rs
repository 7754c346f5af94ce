use crate::core::member::MemberId;
use crate::core::money::round2;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One member's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub member: MemberId,
    pub amount: Decimal,
}

impl Split {
    pub fn new(member: impl Into<MemberId>, amount: Decimal) -> Self {
        Self {
            member: member.into(),
            amount,
        }
    }
}

/// A shared cost fronted by one member and split among several.
///
/// Expenses are immutable once created. The engine never mutates them and
/// never validates them: shares are not required to sum to the total, and
/// amounts are not range-checked. Anything the caller records is folded
/// into the arithmetic as given.
///
/// # Examples
///
/// ```
/// use split_engine::core::expense::{Expense, Split};
/// use split_engine::core::member::MemberId;
/// use rust_decimal_macros::dec;
///
/// let dinner = Expense::new(
///     MemberId::new("alice"),
///     dec!(90),
///     vec![
///         Split::new("alice", dec!(30)),
///         Split::new("bob", dec!(30)),
///         Split::new("carol", dec!(30)),
///     ],
/// );
///
/// assert_eq!(dinner.total(), dec!(90));
/// assert_eq!(dinner.splits().len(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense.
    id: Uuid,
    /// The member who fronted the full cost.
    payer: MemberId,
    /// The full cost of the expense.
    total: Decimal,
    /// Each member's share of the total, in recorded order.
    splits: Vec<Split>,
    /// When this expense was recorded.
    created_at: DateTime<Utc>,
    /// Optional human-readable label ("Dinner", "Fuel", ...).
    description: Option<String>,
}

impl Expense {
    /// Create a new expense.
    pub fn new(payer: MemberId, total: Decimal, splits: Vec<Split>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payer,
            total,
            splits,
            created_at: Utc::now(),
            description: None,
        }
    }

    /// Create an expense with a specific ID (useful for testing / determinism).
    pub fn with_id(id: Uuid, payer: MemberId, total: Decimal, splits: Vec<Split>) -> Self {
        Self {
            id,
            payer,
            total,
            splits,
            created_at: Utc::now(),
            description: None,
        }
    }

    /// Create an expense split evenly among `participants`.
    ///
    /// Each participant's share is the total divided by the head count,
    /// rounded to cents; the last participant absorbs the cent remainder so
    /// the shares sum exactly to the total. With no participants the
    /// expense carries no splits at all.
    pub fn split_evenly(payer: MemberId, total: Decimal, participants: &[MemberId]) -> Self {
        let mut splits = Vec::with_capacity(participants.len());
        if !participants.is_empty() {
            let share = round2(total / Decimal::from(participants.len()));
            let mut allocated = Decimal::ZERO;
            for (idx, member) in participants.iter().enumerate() {
                let amount = if idx + 1 == participants.len() {
                    total - allocated
                } else {
                    share
                };
                allocated += amount;
                splits.push(Split::new(member.clone(), amount));
            }
        }
        Self::new(payer, total, splits)
    }

    /// Set a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn payer(&self) -> &MemberId {
        &self.payer
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// An ordered log of expenses for a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseLog {
    expenses: Vec<Expense>,
}

impl ExpenseLog {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
        }
    }

    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Total value of all expenses in the log.
    pub fn gross_total(&self) -> Decimal {
        self.expenses.iter().map(|e| e.total()).sum()
    }

    /// All unique members referenced in this log (payers and split members).
    pub fn members(&self) -> Vec<MemberId> {
        let mut members: Vec<MemberId> = self
            .expenses
            .iter()
            .flat_map(|e| {
                std::iter::once(e.payer().clone())
                    .chain(e.splits().iter().map(|s| s.member.clone()))
            })
            .collect();
        members.sort();
        members.dedup();
        members
    }
}

impl FromIterator<Expense> for ExpenseLog {
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}
