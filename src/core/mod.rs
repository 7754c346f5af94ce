//! Foundational domain types: members, money, expenses, balance sheets.

pub mod balance;
pub mod expense;
pub mod member;
pub mod money;
