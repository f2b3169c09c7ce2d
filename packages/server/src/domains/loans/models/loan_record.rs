use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::MemberNo;

/// Loan lifecycle status (stored as the legacy integer code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Approved, waiting for disbursement (40)
    PendingDisbursement,
    /// Fully repaid (43)
    Cleared,
    /// Application under processing (44)
    InProcess,
    /// Any other lifecycle code (issued, outstanding, ...)
    Other(i32),
}

impl LoanStatus {
    pub const PENDING_DISBURSEMENT: i32 = 40;
    pub const CLEARED: i32 = 43;
    pub const IN_PROCESS: i32 = 44;

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::PENDING_DISBURSEMENT => LoanStatus::PendingDisbursement,
            Self::CLEARED => LoanStatus::Cleared,
            Self::IN_PROCESS => LoanStatus::InProcess,
            other => LoanStatus::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            LoanStatus::PendingDisbursement => Self::PENDING_DISBURSEMENT,
            LoanStatus::Cleared => Self::CLEARED,
            LoanStatus::InProcess => Self::IN_PROCESS,
            LoanStatus::Other(code) => *code,
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, LoanStatus::Cleared)
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanStatus::PendingDisbursement => write!(f, "pending_disbursement"),
            LoanStatus::Cleared => write!(f, "cleared"),
            LoanStatus::InProcess => write!(f, "in_process"),
            LoanStatus::Other(code) => write!(f, "status_{}", code),
        }
    }
}

/// Loan record - one per loan application/issuance
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct LoanRecord {
    pub id: i64,
    pub member_no: MemberNo,
    pub status: i32,
    pub pending_balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl LoanRecord {
    pub fn loan_status(&self) -> LoanStatus {
        LoanStatus::from_code(self.status)
    }

    /// All loans of a member, newest first
    pub async fn find_by_member(member_no: &MemberNo, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM loan_records WHERE member_no = $1 ORDER BY id DESC",
        )
        .bind(member_no)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Most recent loan of a member in the given status
    pub async fn find_latest_with_status(
        member_no: &MemberNo,
        status: LoanStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM loan_records
             WHERE member_no = $1 AND status = $2
             ORDER BY id DESC
             LIMIT 1",
        )
        .bind(member_no)
        .bind(status.code())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a loan record
    pub async fn create(
        member_no: &MemberNo,
        status: LoanStatus,
        pending_balance: Decimal,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO loan_records (member_no, status, pending_balance)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(member_no)
        .bind(status.code())
        .bind(pending_balance)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for code in [40, 41, 42, 43, 44, 99] {
            assert_eq!(LoanStatus::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_only_cleared_is_cleared() {
        assert!(LoanStatus::from_code(43).is_cleared());
        assert!(!LoanStatus::from_code(40).is_cleared());
        assert!(!LoanStatus::from_code(44).is_cleared());
        assert!(!LoanStatus::from_code(41).is_cleared());
    }

    #[test]
    fn test_display() {
        assert_eq!(LoanStatus::InProcess.to_string(), "in_process");
        assert_eq!(LoanStatus::Other(41).to_string(), "status_41");
    }
}
