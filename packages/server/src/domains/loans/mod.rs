//! Loans domain - loan records as read by the registry and eligibility checks
//!
//! Disbursement and repayment are handled elsewhere; this domain only reads
//! statuses and pending balances.

pub mod models;

pub use models::{LoanRecord, LoanStatus};
