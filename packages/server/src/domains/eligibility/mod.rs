//! Eligibility domain - may this member take a new loan, and how much?
//!
//! `evaluator` is pure policy logic; `activities` gathers its inputs.

pub mod activities;
pub mod evaluator;

pub use activities::{assess_member, require_policy};
pub use evaluator::{
    evaluate, installments_for, months_since_join, EligibilityOutcome, Verdict,
    MAX_INSTALLMENTS, MIN_INSTALLMENTS,
};
