use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domains::loans::LoanStatus;
use crate::domains::organization::OrganizationPolicy;
use crate::domains::savings::SavingsSnapshot;

pub const MIN_INSTALLMENTS: i32 = 5;
pub const MAX_INSTALLMENTS: i32 = 50;

/// Amount covered by one installment when sizing a loan
const INSTALLMENT_UNIT: i64 = 1000;

/// Approximate month length used for tenure
const DAYS_PER_MONTH: i64 = 30;

/// Which rule decided the outcome (first match wins, in this order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NotCleared,
    TooNew,
    Eligible,
}

/// Result of a loan eligibility check.
///
/// Amount and installments are always filled in, even when not eligible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityOutcome {
    pub verdict: Verdict,
    pub eligible: bool,
    pub message: String,
    pub months_since_join: Option<i64>,
    pub eligibility_base: Decimal,
    pub eligible_amount: Decimal,
    pub eligible_installments: i32,
}

/// Whole 30-day months between joining and `today`. A join date in the
/// future counts as zero.
pub fn months_since_join(join_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - join_date).num_days().max(0) / DAYS_PER_MONTH
}

/// One installment per 1000 of the amount (half rounds up), within [5, 50].
pub fn installments_for(eligible_amount: Decimal) -> i32 {
    let raw = (eligible_amount / Decimal::from(INSTALLMENT_UNIT))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX);

    raw.clamp(MIN_INSTALLMENTS as i64, MAX_INSTALLMENTS as i64) as i32
}

/// Decide whether a member may take a new loan.
///
/// A member without a join date is too new only under a non-zero tenure minimum.
pub fn evaluate(
    join_date: Option<NaiveDate>,
    loans: &[LoanStatus],
    savings: &SavingsSnapshot,
    policy: &OrganizationPolicy,
    today: NaiveDate,
) -> EligibilityOutcome {
    let months = join_date.map(|d| months_since_join(d, today));

    let eligibility_base = savings.eligibility_base();
    let eligible_amount = eligibility_base * policy.eligibility_factor;
    let eligible_installments = installments_for(eligible_amount);

    let (verdict, message) = if loans.iter().any(|status| !status.is_cleared()) {
        (
            Verdict::NotCleared,
            "Not eligible, previous loan(s) not cleared.".to_string(),
        )
    } else if months.map_or(policy.min_membership_months > 0, |m| {
        m < policy.min_membership_months as i64
    }) {
        (
            Verdict::TooNew,
            format!(
                "Not eligible, membership duration less than {} months.",
                policy.min_membership_months
            ),
        )
    } else {
        (Verdict::Eligible, "New loan eligible".to_string())
    };

    EligibilityOutcome {
        eligible: verdict == Verdict::Eligible,
        verdict,
        message,
        months_since_join: months,
        eligibility_base,
        eligible_amount,
        eligible_installments,
    }
}
