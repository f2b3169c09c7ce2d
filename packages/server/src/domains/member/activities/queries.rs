//! Member read activities - list, detail, pickers and eligibility

use chrono::NaiveDate;
use tracing::debug;

use crate::common::{CoreResult, OrganizationScope, Page, ValidatedPageArgs};
use crate::domains::eligibility::{assess_member, months_since_join};
use crate::domains::loans::{LoanRecord, LoanStatus};
use crate::domains::member::activities::load_scoped_member;
use crate::domains::member::data::{
    EligibilityCheckData, InProcessItem, MemberData, MemberDetailData, MemberListItem,
    MemberNumberItem,
};
use crate::domains::member::models::Member;
use crate::domains::savings::current_savings;
use crate::kernel::ServerDeps;

/// Paginated, searchable list of active members with their savings totals
pub async fn list_members(
    scope: &OrganizationScope,
    search: Option<&str>,
    args: &ValidatedPageArgs,
    deps: &ServerDeps,
) -> CoreResult<Page<MemberListItem>> {
    let (rows, total) =
        Member::search_paginated(scope.organization_id, search, args, &deps.db_pool).await?;

    debug!(
        organization_id = %scope.organization_id,
        search = ?search,
        page = args.page,
        rows = rows.len(),
        total,
        "Listed members"
    );

    let items = rows
        .into_iter()
        .map(|row| -> CoreResult<MemberListItem> {
            let token = deps.codec.encode(&row.member_no)?;
            Ok(MemberListItem::new(row, token))
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(Page::new(items, total, args))
}

/// Full member detail: record, savings, pending loan and eligibility
pub async fn get_member_detail(
    scope: &OrganizationScope,
    token: &str,
    today: NaiveDate,
    deps: &ServerDeps,
) -> CoreResult<MemberDetailData> {
    let member = load_scoped_member(scope, token, deps).await?;

    let savings = current_savings(&member.member_no, &deps.db_pool).await?;
    let eligibility = assess_member(&member, &savings, today, &deps.db_pool).await?;

    let loan_pending = LoanRecord::find_latest_with_status(
        &member.member_no,
        LoanStatus::PendingDisbursement,
        &deps.db_pool,
    )
    .await?
    .map(|loan| loan.pending_balance);

    let months = member.join_date.map(|d| months_since_join(d, today));

    Ok(MemberDetailData {
        member: MemberData::new(member, token.to_string()),
        months_since_join: months,
        loan_pending,
        total_savings: savings.total(),
        savings,
        eligibility,
    })
}

/// Active member numbers of the scope, newest first
pub async fn list_member_numbers(
    scope: &OrganizationScope,
    deps: &ServerDeps,
) -> CoreResult<Vec<MemberNumberItem>> {
    Member::find_active_numbers(scope.organization_id, &deps.db_pool)
        .await?
        .into_iter()
        .map(|row| -> CoreResult<MemberNumberItem> {
            let token = deps.codec.encode(&row.member_no)?;
            Ok(MemberNumberItem::new(row, token))
        })
        .collect()
}

/// Active members with a loan application under processing
pub async fn list_in_process(
    scope: &OrganizationScope,
    deps: &ServerDeps,
) -> CoreResult<Vec<InProcessItem>> {
    Member::find_with_loan_status(scope.organization_id, LoanStatus::IN_PROCESS, &deps.db_pool)
        .await?
        .into_iter()
        .map(|row| -> CoreResult<InProcessItem> {
            let token = deps.codec.encode(&row.member_no)?;
            Ok(InProcessItem::new(row, token))
        })
        .collect()
}

/// Loan eligibility check for one member
pub async fn check_eligibility(
    scope: &OrganizationScope,
    token: &str,
    today: NaiveDate,
    deps: &ServerDeps,
) -> CoreResult<EligibilityCheckData> {
    let member = load_scoped_member(scope, token, deps).await?;

    let savings = current_savings(&member.member_no, &deps.db_pool).await?;
    let outcome = assess_member(&member, &savings, today, &deps.db_pool).await?;

    Ok(EligibilityCheckData::new(member, token.to_string(), outcome))
}
