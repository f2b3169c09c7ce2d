//! Member detail and loan eligibility against stored savings, loans and policy

mod common;

use crate::common::*;
use rust_decimal::Decimal;
use server_core::common::CoreError;
use server_core::domains::eligibility::Verdict;
use server_core::domains::loans::LoanStatus;
use server_core::domains::member::activities::{check_eligibility, get_member_detail};
use std::str::FromStr;
use test_context::test_context;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn eligible_member_gets_amount_and_installments(ctx: &TestHarness) {
    let org = unique_organization();
    let scope = ctx.scope(org);
    create_policy(&ctx.db_pool, org, dec("0.5"), 6).await.unwrap();

    let member = register_test_member(&ctx.deps, &scope, "Ravi", date(2023, 1, 1))
        .await
        .unwrap();
    add_savings(&ctx.db_pool, &member.member.member_no, [10_000, 2_000, 400, 50])
        .await
        .unwrap();
    add_loan(&ctx.db_pool, &member.member.member_no, LoanStatus::Cleared, 0)
        .await
        .unwrap();

    let check = check_eligibility(&scope, &member.token, date(2024, 1, 1), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(check.outcome.verdict, Verdict::Eligible);
    assert!(check.outcome.eligible);
    assert_eq!(check.outcome.message, "New loan eligible");
    assert_eq!(check.outcome.eligibility_base, Decimal::from(12_000));
    assert_eq!(check.outcome.eligible_amount, Decimal::from(6_000));
    assert_eq!(check.outcome.eligible_installments, 6);
    assert_eq!(check.outcome.months_since_join, Some(12));
    assert_eq!(check.member_no, member.member.member_no);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn open_loan_makes_member_ineligible(ctx: &TestHarness) {
    let org = unique_organization();
    let scope = ctx.scope(org);
    create_policy(&ctx.db_pool, org, dec("0.5"), 6).await.unwrap();

    let member = register_test_member(&ctx.deps, &scope, "Ravi", date(2020, 1, 1))
        .await
        .unwrap();
    add_savings(&ctx.db_pool, &member.member.member_no, [50_000, 0, 0, 0])
        .await
        .unwrap();
    add_loan(&ctx.db_pool, &member.member.member_no, LoanStatus::Cleared, 0)
        .await
        .unwrap();
    add_loan(&ctx.db_pool, &member.member.member_no, LoanStatus::Other(42), 3_000)
        .await
        .unwrap();

    let check = check_eligibility(&scope, &member.token, date(2024, 1, 1), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(check.outcome.verdict, Verdict::NotCleared);
    assert!(!check.outcome.eligible);
    assert_eq!(check.outcome.message, "Not eligible, previous loan(s) not cleared.");
    assert_eq!(check.outcome.eligible_amount, Decimal::from(25_000));
    assert_eq!(check.outcome.eligible_installments, 25);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn short_tenure_makes_member_ineligible(ctx: &TestHarness) {
    let org = unique_organization();
    let scope = ctx.scope(org);
    create_policy(&ctx.db_pool, org, dec("0.5"), 6).await.unwrap();

    let member = register_test_member(&ctx.deps, &scope, "Ravi", date(2024, 1, 1))
        .await
        .unwrap();

    let check = check_eligibility(&scope, &member.token, date(2024, 4, 1), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(check.outcome.verdict, Verdict::TooNew);
    assert_eq!(check.outcome.months_since_join, Some(3));
    assert_eq!(
        check.outcome.message,
        "Not eligible, membership duration less than 6 months."
    );
    assert_eq!(check.outcome.eligible_amount, Decimal::ZERO);
    assert_eq!(check.outcome.eligible_installments, 5);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn missing_policy_is_a_fault(ctx: &TestHarness) {
    let org = unique_organization();
    let scope = ctx.scope(org);
    let member = register_test_member(&ctx.deps, &scope, "Ravi", date(2020, 1, 1))
        .await
        .unwrap();

    let check = check_eligibility(&scope, &member.token, date(2024, 1, 1), &ctx.deps).await;
    assert!(matches!(check, Err(CoreError::PolicyNotFound(o)) if o == org));

    let detail = get_member_detail(&scope, &member.token, date(2024, 1, 1), &ctx.deps).await;
    assert!(matches!(detail, Err(CoreError::PolicyNotFound(_))));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn detail_uses_newest_savings_entry_and_pending_loan(ctx: &TestHarness) {
    let org = unique_organization();
    let scope = ctx.scope(org);
    create_policy(&ctx.db_pool, org, dec("0.75"), 3).await.unwrap();

    let member = register_test_member(&ctx.deps, &scope, "Ravi", date(2023, 10, 1))
        .await
        .unwrap();
    let member_no = &member.member.member_no;

    add_savings(&ctx.db_pool, member_no, [9_999, 9_999, 9_999, 9_999])
        .await
        .unwrap();
    add_savings(&ctx.db_pool, member_no, [4_000, 1_000, 120, 30])
        .await
        .unwrap();
    add_loan(&ctx.db_pool, member_no, LoanStatus::PendingDisbursement, 7_000)
        .await
        .unwrap();
    add_loan(&ctx.db_pool, member_no, LoanStatus::PendingDisbursement, 2_500)
        .await
        .unwrap();

    let detail = get_member_detail(&scope, &member.token, date(2024, 1, 1), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(detail.savings.opening_balance, Decimal::from(4_000));
    assert_eq!(detail.total_savings, Decimal::from(5_150));
    assert_eq!(detail.loan_pending, Some(Decimal::from(2_500)));
    assert_eq!(detail.months_since_join, Some(3));
    assert_eq!(detail.eligibility.eligibility_base, Decimal::from(5_000));
    assert_eq!(detail.eligibility.eligible_amount, dec("3750"));
    assert_eq!(detail.eligibility.eligible_installments, 5);
    // Pending-disbursement loans are not cleared
    assert_eq!(detail.eligibility.verdict, Verdict::NotCleared);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn member_without_savings_or_loans(ctx: &TestHarness) {
    let org = unique_organization();
    let scope = ctx.scope(org);
    create_policy(&ctx.db_pool, org, dec("0.5"), 0).await.unwrap();

    let member = register_test_member(&ctx.deps, &scope, "Ravi", date(2023, 1, 1))
        .await
        .unwrap();

    let detail = get_member_detail(&scope, &member.token, date(2024, 1, 1), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(detail.total_savings, Decimal::ZERO);
    assert_eq!(detail.loan_pending, None);
    assert_eq!(detail.eligibility.verdict, Verdict::Eligible);
    assert_eq!(detail.eligibility.eligible_installments, 5);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn detail_of_foreign_member_is_not_found(ctx: &TestHarness) {
    let owner = ctx.scope(unique_organization());
    let other_org = unique_organization();
    create_policy(&ctx.db_pool, other_org, dec("0.5"), 0).await.unwrap();

    let member = register_test_member(&ctx.deps, &owner, "Ravi", date(2023, 1, 1))
        .await
        .unwrap();

    let result = get_member_detail(&ctx.scope(other_org), &member.token, date(2024, 1, 1), &ctx.deps).await;

    assert!(matches!(result, Err(CoreError::NotFound(_))));
}
