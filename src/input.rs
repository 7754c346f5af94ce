//! JSON group-file loading for the CLI.
//!
//! The engine itself has no wire format; this module defines the group
//! file the binary consumes and converts it into domain types. Amounts
//! travel as strings to keep cent precision intact.

use crate::core::expense::{Expense, ExpenseLog, Split};
use crate::core::member::MemberId;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors arising from loading a group file.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read group file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse group file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid amount '{amount}' in expense '{context}'")]
    Amount { amount: String, context: String },
}

/// On-disk schema for a group.
#[derive(Debug, Deserialize)]
pub struct GroupFile {
    #[serde(default)]
    pub name: Option<String>,
    pub members: Vec<String>,
    pub expenses: Vec<ExpenseInput>,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseInput {
    pub payer: String,
    pub total: String,
    #[serde(default)]
    pub description: Option<String>,
    pub splits: Vec<SplitInput>,
}

#[derive(Debug, Deserialize)]
pub struct SplitInput {
    pub member: String,
    pub amount: String,
}

/// A group ready for the engine: roster plus expense log.
#[derive(Debug)]
pub struct Group {
    pub name: Option<String>,
    pub roster: Vec<MemberId>,
    pub expenses: ExpenseLog,
}

/// Load and convert a group file.
pub fn load_group(path: impl AsRef<Path>) -> Result<Group, InputError> {
    let content = std::fs::read_to_string(path)?;
    let file: GroupFile = serde_json::from_str(&content)?;
    group_from_file(file)
}

fn parse_amount(raw: &str, context: &str) -> Result<Decimal, InputError> {
    raw.parse().map_err(|_| InputError::Amount {
        amount: raw.to_string(),
        context: context.to_string(),
    })
}

fn group_from_file(file: GroupFile) -> Result<Group, InputError> {
    let roster: Vec<MemberId> = file.members.iter().map(|m| MemberId::new(m.as_str())).collect();

    let mut expenses = ExpenseLog::new();
    for input in file.expenses {
        let context = input
            .description
            .clone()
            .unwrap_or_else(|| format!("paid by {}", input.payer));
        let total = parse_amount(&input.total, &context)?;

        let mut splits = Vec::with_capacity(input.splits.len());
        for split in &input.splits {
            splits.push(Split::new(
                MemberId::new(split.member.as_str()),
                parse_amount(&split.amount, &context)?,
            ));
        }

        let mut expense = Expense::new(MemberId::new(input.payer.as_str()), total, splits);
        if let Some(description) = input.description {
            expense = expense.with_description(description);
        }
        expenses.add(expense);
    }

    Ok(Group {
        name: file.name,
        roster,
        expenses,
    })
}
