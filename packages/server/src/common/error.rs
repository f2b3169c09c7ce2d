use thiserror::Error;

use super::OrganizationId;

/// Faults raised by the registry core.
///
/// Business outcomes (not cleared, too new, eligible) are never errors; they
/// travel inside `EligibilityOutcome`. Everything here is a genuine fault.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{0} not found")]
    NotFound(String),

    /// The opaque member token could not be decoded. Reported to callers as
    /// "not found" so the token format is not leaked.
    #[error("Invalid member token")]
    InvalidToken,

    #[error("No loan policy configured for organization {0}")]
    PolicyNotFound(OrganizationId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Member number allocation conflicted for organization {0}")]
    AllocationConflict(OrganizationId),

    /// The 3-digit sequence of the member number encoding is used up.
    #[error("Organization {0} has used all 999 member numbers")]
    SequenceExhausted(OrganizationId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Stable, machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            // Decode failures look exactly like an unknown member
            CoreError::NotFound(_) | CoreError::InvalidToken => "not_found",
            CoreError::PolicyNotFound(_) => "policy_not_found",
            CoreError::Validation(_) => "validation",
            CoreError::AllocationConflict(_) => "allocation_conflict",
            CoreError::SequenceExhausted(_) => "sequence_exhausted",
            CoreError::Storage(_) => "storage",
            CoreError::Database(_) | CoreError::Internal(_) => "internal",
        }
    }

    /// Message safe to show to API callers.
    pub fn public_message(&self) -> String {
        match self {
            CoreError::InvalidToken => "Member not found".to_string(),
            CoreError::Database(_) | CoreError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn member_not_found() -> Self {
        CoreError::NotFound("Member".to_string())
    }

    /// Map an insert failure, turning a unique violation on the member number
    /// into an allocation conflict.
    pub fn from_insert(err: sqlx::Error, organization_id: OrganizationId) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return CoreError::AllocationConflict(organization_id);
            }
        }
        CoreError::Database(err)
    }
}
