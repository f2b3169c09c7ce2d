//! Savings aggregation

use anyhow::Result;
use sqlx::PgPool;
use tracing::debug;

use crate::common::MemberNo;
use crate::domains::savings::models::{SavingsEntry, SavingsSnapshot};

/// Current savings snapshot for a member: the newest ledger entry, or zeros.
pub async fn current_savings(member_no: &MemberNo, pool: &PgPool) -> Result<SavingsSnapshot> {
    let latest = SavingsEntry::find_latest_for_member(member_no, pool).await?;

    debug!(
        member_no = %member_no,
        entry_id = ?latest.as_ref().map(|e| e.id),
        "Loaded savings snapshot"
    );

    Ok(SavingsSnapshot::from_entry(latest.as_ref()))
}
