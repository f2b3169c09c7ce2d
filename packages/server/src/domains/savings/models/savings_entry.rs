use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::MemberNo;

/// One savings ledger line for a member
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct SavingsEntry {
    pub id: i64,
    pub member_no: MemberNo,
    pub opening_balance: Decimal,
    pub added: Decimal,
    pub interest_on_opening: Decimal,
    pub interest_on_added: Decimal,
    pub created_at: DateTime<Utc>,
}

impl SavingsEntry {
    /// Most recently created entry for a member (greatest id)
    pub async fn find_latest_for_member(
        member_no: &MemberNo,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM savings_entries WHERE member_no = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(member_no)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Append a ledger line
    pub async fn create(
        member_no: &MemberNo,
        opening_balance: Decimal,
        added: Decimal,
        interest_on_opening: Decimal,
        interest_on_added: Decimal,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO savings_entries (
                member_no,
                opening_balance,
                added,
                interest_on_opening,
                interest_on_added
             )
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(member_no)
        .bind(opening_balance)
        .bind(added)
        .bind(interest_on_opening)
        .bind(interest_on_added)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

/// Point-in-time savings balance of a member.
///
/// Absent savings data is the all-zero snapshot, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SavingsSnapshot {
    pub opening_balance: Decimal,
    pub added: Decimal,
    pub interest_on_opening: Decimal,
    pub interest_on_added: Decimal,
}

impl SavingsSnapshot {
    pub fn from_entry(entry: Option<&SavingsEntry>) -> Self {
        match entry {
            Some(e) => Self {
                opening_balance: e.opening_balance,
                added: e.added,
                interest_on_opening: e.interest_on_opening,
                interest_on_added: e.interest_on_added,
            },
            None => Self::default(),
        }
    }

    /// Principal plus all accrued interest
    pub fn total(&self) -> Decimal {
        self.opening_balance + self.added + self.interest_on_opening + self.interest_on_added
    }

    /// Principal only; interest is excluded from loan sizing.
    pub fn eligibility_base(&self) -> Decimal {
        self.opening_balance + self.added
    }
}
