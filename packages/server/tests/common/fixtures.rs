//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods and activities directly.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use server_core::common::{MemberNo, OrganizationId, OrganizationScope};
use server_core::domains::loans::{LoanRecord, LoanStatus};
use server_core::domains::member::activities::register_member;
use server_core::domains::member::MemberData;
use server_core::domains::organization::OrganizationPolicy;
use server_core::domains::savings::SavingsEntry;
use server_core::kernel::ServerDeps;
use sqlx::PgPool;
use uuid::Uuid;

/// A fresh organization ID no other test uses.
///
/// Tests share one database, so each works inside its own organization.
pub fn unique_organization() -> OrganizationId {
    let random = (Uuid::new_v4().as_u128() % 90_000_000) as i64;
    OrganizationId::new(10_000_000 + random)
}

/// Convert a `json!` object literal into a request body
pub fn body(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Register a member with a name and join date through the registry
pub async fn register_test_member(
    deps: &ServerDeps,
    scope: &OrganizationScope,
    name: &str,
    join_date: NaiveDate,
) -> Result<MemberData> {
    let input = body(json!({
        "name": name,
        "join_date": join_date.to_string(),
    }));

    Ok(register_member(scope, &input, deps).await?)
}

/// Configure an organization's loan policy
pub async fn create_policy(
    pool: &PgPool,
    organization_id: OrganizationId,
    eligibility_factor: Decimal,
    min_membership_months: i32,
) -> Result<OrganizationPolicy> {
    OrganizationPolicy {
        organization_id,
        eligibility_factor,
        min_membership_months,
    }
    .upsert(pool)
    .await
}

/// Append a savings ledger line (opening, added, interest on opening, interest on added)
pub async fn add_savings(
    pool: &PgPool,
    member_no: &MemberNo,
    values: [i64; 4],
) -> Result<SavingsEntry> {
    SavingsEntry::create(
        member_no,
        Decimal::from(values[0]),
        Decimal::from(values[1]),
        Decimal::from(values[2]),
        Decimal::from(values[3]),
        pool,
    )
    .await
}

pub async fn add_loan(
    pool: &PgPool,
    member_no: &MemberNo,
    status: LoanStatus,
    pending_balance: i64,
) -> Result<LoanRecord> {
    LoanRecord::create(member_no, status, Decimal::from(pending_balance), pool).await
}

/// Insert a member row directly with a chosen member number
pub async fn insert_member_with_number(
    pool: &PgPool,
    organization_id: OrganizationId,
    member_no: &str,
    name: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO members (organization_id, member_no, name, created_by)
         VALUES ($1, $2, $3, 'fixture')",
    )
    .bind(organization_id)
    .bind(member_no)
    .bind(name)
    .execute(pool)
    .await?;
    Ok(())
}
