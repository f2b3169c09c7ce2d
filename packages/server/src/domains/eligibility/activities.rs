//! Eligibility activities - load policy and loan history, then evaluate

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::common::{CoreError, CoreResult, OrganizationId};
use crate::domains::eligibility::evaluator::{evaluate, EligibilityOutcome};
use crate::domains::loans::{LoanRecord, LoanStatus};
use crate::domains::member::models::Member;
use crate::domains::organization::OrganizationPolicy;
use crate::domains::savings::SavingsSnapshot;

/// Load the loan policy of an organization.
///
/// A missing policy is a configuration fault, never an "ineligible" result.
pub async fn require_policy(
    organization_id: OrganizationId,
    pool: &PgPool,
) -> CoreResult<OrganizationPolicy> {
    match OrganizationPolicy::find_by_organization(organization_id, pool).await? {
        Some(policy) => Ok(policy),
        None => {
            warn!(organization_id = %organization_id, "No loan policy configured");
            Err(CoreError::PolicyNotFound(organization_id))
        }
    }
}

/// Evaluate a member's eligibility against its organization's policy.
pub async fn assess_member(
    member: &Member,
    savings: &SavingsSnapshot,
    today: NaiveDate,
    pool: &PgPool,
) -> CoreResult<EligibilityOutcome> {
    let policy = require_policy(member.organization_id, pool).await?;

    let loans: Vec<LoanStatus> = LoanRecord::find_by_member(&member.member_no, pool)
        .await?
        .iter()
        .map(LoanRecord::loan_status)
        .collect();

    let outcome = evaluate(member.join_date, &loans, savings, &policy, today);

    info!(
        member_no = %member.member_no,
        organization_id = %member.organization_id,
        verdict = ?outcome.verdict,
        loans = loans.len(),
        "Evaluated loan eligibility"
    );

    Ok(outcome)
}
