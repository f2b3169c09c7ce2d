use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::common::{CoreError, CoreResult, MemberNo, OrganizationId, ValidatedPageArgs};
use crate::domains::identifier::next_member_no;
use crate::domains::member::models::patch::{FieldValue, MemberPatch};

/// Member model - SQL persistence layer
///
/// Scoped by organization; `member_no` is unique within the organization and
/// never reused. Members are deactivated (`is_active = false`), never deleted.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Member {
    #[serde(skip_serializing)]
    pub id: i64,
    pub organization_id: OrganizationId,
    pub member_no: MemberNo,

    // Identity
    pub name: String,
    pub alias_name: Option<String>,
    pub surname: Option<String>,
    pub designation: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub birth_date: Option<NaiveDate>,
    pub occupation: Option<String>,

    // KYC
    pub national_id: Option<String>,
    pub tax_id: Option<String>,

    // Household
    pub staying_with: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_occupation: Option<String>,
    pub nominee_name: Option<String>,
    pub nominee_relation: Option<String>,
    pub family_members: Option<i32>,
    pub female_count: Option<i32>,
    pub male_count: Option<i32>,

    // Contact
    pub mobile1: Option<String>,
    pub mobile2: Option<String>,
    pub landline: Option<String>,
    pub referrer_member_no: Option<String>,
    pub owns_residence: Option<bool>,

    // Temporary address
    pub temp_house_no: Option<String>,
    pub temp_colony: Option<String>,
    pub temp_mandal: Option<String>,
    pub temp_district: Option<String>,
    pub temp_landmark: Option<String>,
    pub temp_pin: Option<String>,

    // Permanent address
    pub perm_house_no: Option<String>,
    pub perm_colony: Option<String>,
    pub perm_mandal: Option<String>,
    pub perm_district: Option<String>,
    pub perm_landmark: Option<String>,
    pub perm_pin: Option<String>,

    // Bank
    pub account_no: Option<String>,
    pub account_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub bank_name: Option<String>,

    // Suspension / withdrawal
    pub is_suspended: bool,
    pub withdrawal_status_date: Option<NaiveDate>,
    pub withdrawal_status: Option<String>,
    pub withdrawal_reason_code: Option<String>,
    pub withdrawal_reason: Option<String>,
    pub withdrawal_approved_by: Option<String>,
    pub withdrawal_applicant_name: Option<String>,
    pub withdrawal_applicant_relation: Option<String>,
    pub surety_member_no: Option<String>,
    pub reason: Option<String>,

    pub image: Option<String>,
    pub is_active: bool,

    // Audit
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// List row: member plus current savings total
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MemberSummary {
    pub member_no: MemberNo,
    pub name: String,
    pub surname: Option<String>,
    pub national_id: Option<String>,
    pub mobile1: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub total_saving: Decimal,
}

/// Member number picker row
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MemberNumberRow {
    pub member_no: MemberNo,
    pub image: Option<String>,
    pub join_date: Option<NaiveDate>,
}

/// Member joined with one of its loans
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MemberLoanRow {
    pub member_no: MemberNo,
    pub name: String,
    pub loan_id: i64,
    pub status: i32,
}

/// Active members of an organization, optionally narrowed by a search
/// pattern ($2) over name, surname, member number and national ID.
const SEARCH_FILTER: &str = "m.organization_id = $1
       AND m.is_active = TRUE
       AND ($2::TEXT IS NULL
            OR m.name ILIKE $2
            OR m.surname ILIKE $2
            OR m.member_no ILIKE $2
            OR m.national_id ILIKE $2)";

/// Numeric ordering of member numbers within one organization
const NEWEST_FIRST: &str = "length(m.member_no) DESC, m.member_no DESC";

/// Build a case-insensitive substring pattern, escaping LIKE wildcards.
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|s| !s.is_empty())?;

    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');

    Some(escaped)
}

impl Member {
    /// Find a member by number within an organization
    pub async fn find_in_scope(
        organization_id: OrganizationId,
        member_no: &MemberNo,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM members WHERE organization_id = $1 AND member_no = $2",
        )
        .bind(organization_id)
        .bind(member_no)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Highest member number currently held in an organization
    pub async fn find_highest_member_no<'c, E>(
        organization_id: OrganizationId,
        executor: E,
    ) -> Result<Option<MemberNo>>
    where
        E: PgExecutor<'c>,
    {
        sqlx::query_scalar::<_, MemberNo>(&format!(
            "SELECT m.member_no FROM members m WHERE m.organization_id = $1 ORDER BY {} LIMIT 1",
            NEWEST_FIRST
        ))
        .bind(organization_id)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    /// Allocate the next member number and insert the member, atomically.
    ///
    /// Allocation is serialized per organization with a transaction-scoped
    /// advisory lock; the unique (organization_id, member_no) index reports
    /// anything that slips past it as `AllocationConflict`.
    pub async fn register(
        organization_id: OrganizationId,
        patch: &MemberPatch,
        created_by: &str,
        pool: &PgPool,
    ) -> CoreResult<Self> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(organization_id.as_i64())
            .execute(&mut *tx)
            .await?;

        let highest = Self::find_highest_member_no(organization_id, &mut *tx).await?;
        let member_no = next_member_no(organization_id, highest.as_ref())?;

        debug!(
            organization_id = %organization_id,
            highest = ?highest,
            member_no = %member_no,
            "Allocated member number"
        );

        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO members (organization_id, member_no, created_by, created_at",
        );
        for column in patch.columns() {
            qb.push(", ");
            qb.push(column);
        }
        qb.push(") VALUES (");
        qb.push_bind(organization_id);
        qb.push(", ");
        qb.push_bind(member_no.clone());
        qb.push(", ");
        qb.push_bind(created_by.to_string());
        qb.push(", NOW()");
        for (_, value) in patch.iter() {
            qb.push(", ");
            push_value(&mut qb, value);
        }
        qb.push(") RETURNING *");

        let member = qb
            .build_query_as::<Self>()
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| CoreError::from_insert(e, organization_id))?;

        tx.commit().await?;

        Ok(member)
    }

    /// Apply an allow-listed patch to a member; returns rows affected.
    ///
    /// Audit columns are always touched, even for an empty patch.
    pub async fn apply_patch(
        organization_id: OrganizationId,
        member_no: &MemberNo,
        patch: &MemberPatch,
        modified_by: &str,
        pool: &PgPool,
    ) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE members SET modified_by = ");
        qb.push_bind(modified_by.to_string());
        qb.push(", modified_at = NOW()");

        for (column, value) in patch.iter() {
            qb.push(", ");
            qb.push(column);
            qb.push(" = ");
            push_value(&mut qb, value);
        }

        qb.push(" WHERE organization_id = ");
        qb.push_bind(organization_id);
        qb.push(" AND member_no = ");
        qb.push_bind(member_no.clone());

        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Record the stored image filename
    pub async fn set_image(
        organization_id: OrganizationId,
        member_no: &MemberNo,
        filename: &str,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE members SET image = $3 WHERE organization_id = $1 AND member_no = $2",
        )
        .bind(organization_id)
        .bind(member_no)
        .bind(filename)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// One page of active members with their current savings total, plus the
    /// total number of matching members.
    pub async fn search_paginated(
        organization_id: OrganizationId,
        search: Option<&str>,
        args: &ValidatedPageArgs,
        pool: &PgPool,
    ) -> Result<(Vec<MemberSummary>, i64)> {
        let pattern = search_pattern(search);

        let rows = sqlx::query_as::<_, MemberSummary>(&format!(
            "SELECT m.member_no, m.name, m.surname, m.national_id, m.mobile1, m.join_date, m.image,
                    COALESCE(s.opening_balance + s.added + s.interest_on_opening + s.interest_on_added, 0)
                        AS total_saving
             FROM members m
             LEFT JOIN LATERAL (
                 SELECT * FROM savings_entries se
                 WHERE se.member_no = m.member_no
                 ORDER BY se.id DESC
                 LIMIT 1
             ) s ON TRUE
             WHERE {}
             ORDER BY {}
             LIMIT $3 OFFSET $4",
            SEARCH_FILTER, NEWEST_FIRST
        ))
        .bind(organization_id)
        .bind(pattern.as_deref())
        .bind(args.per_page)
        .bind(args.offset())
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM members m WHERE {}",
            SEARCH_FILTER
        ))
        .bind(organization_id)
        .bind(pattern.as_deref())
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }

    /// Active member numbers of an organization, newest first
    pub async fn find_active_numbers(
        organization_id: OrganizationId,
        pool: &PgPool,
    ) -> Result<Vec<MemberNumberRow>> {
        sqlx::query_as::<_, MemberNumberRow>(&format!(
            "SELECT m.member_no, m.image, m.join_date
             FROM members m
             WHERE m.organization_id = $1 AND m.is_active = TRUE
             ORDER BY {}",
            NEWEST_FIRST
        ))
        .bind(organization_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Active members having a loan in the given status code
    pub async fn find_with_loan_status(
        organization_id: OrganizationId,
        status: i32,
        pool: &PgPool,
    ) -> Result<Vec<MemberLoanRow>> {
        sqlx::query_as::<_, MemberLoanRow>(&format!(
            "SELECT m.member_no, m.name, l.id AS loan_id, l.status
             FROM members m
             JOIN loan_records l ON l.member_no = m.member_no
             WHERE m.organization_id = $1 AND m.is_active = TRUE AND l.status = $2
             ORDER BY {}, l.id DESC",
            NEWEST_FIRST
        ))
        .bind(organization_id)
        .bind(status)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Text(s) => {
            qb.push_bind(s.clone());
        }
        FieldValue::Date(d) => {
            qb.push_bind(*d);
        }
        FieldValue::Integer(i) => {
            qb.push_bind(*i);
        }
        FieldValue::Flag(b) => {
            qb.push_bind(*b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_wraps_term() {
        assert_eq!(search_pattern(Some("ram")), Some("%ram%".to_string()));
        assert_eq!(search_pattern(Some("  ram ")), Some("%ram%".to_string()));
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern(Some("50%")), Some("%50\\%%".to_string()));
        assert_eq!(search_pattern(Some("a_b")), Some("%a\\_b%".to_string()));
        assert_eq!(search_pattern(Some("a\\b")), Some("%a\\\\b%".to_string()));
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("")), None);
        assert_eq!(search_pattern(Some("   ")), None);
    }
}
