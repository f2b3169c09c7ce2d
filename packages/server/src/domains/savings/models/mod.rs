pub mod savings_entry;

pub use savings_entry::{SavingsEntry, SavingsSnapshot};
