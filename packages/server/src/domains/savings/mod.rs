//! Savings domain - current balance snapshot per member
//!
//! The newest ledger row is the balance; older rows are history only.

pub mod activities;
pub mod models;

pub use activities::current_savings;
pub use models::{SavingsEntry, SavingsSnapshot};
