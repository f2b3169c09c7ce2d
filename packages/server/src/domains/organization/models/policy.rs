use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::OrganizationId;

/// Loan eligibility configuration of one organization
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationPolicy {
    pub organization_id: OrganizationId,
    /// Fraction of the eligibility base that may be lent (e.g. 0.5)
    pub eligibility_factor: Decimal,
    /// Minimum tenure before a member may take a loan
    pub min_membership_months: i32,
}

impl OrganizationPolicy {
    pub async fn find_by_organization(
        organization_id: OrganizationId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM organization_policies WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert or replace an organization's policy
    pub async fn upsert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO organization_policies (organization_id, eligibility_factor, min_membership_months)
             VALUES ($1, $2, $3)
             ON CONFLICT (organization_id) DO UPDATE
             SET eligibility_factor = EXCLUDED.eligibility_factor,
                 min_membership_months = EXCLUDED.min_membership_months
             RETURNING *",
        )
        .bind(self.organization_id)
        .bind(self.eligibility_factor)
        .bind(self.min_membership_months)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Number of organizations with a loan policy configured
    pub async fn count_configured(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT count(*) FROM organization_policies")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
