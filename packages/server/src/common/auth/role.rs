use serde::{Deserialize, Serialize};

/// Role carried on a staff token.
///
/// A superadmin works across organizations and picks one per session; every
/// other role is pinned to the organization on its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Superadmin,
    Staff,
}

impl StaffRole {
    pub fn is_superadmin(&self) -> bool {
        matches!(self, StaffRole::Superadmin)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffRole::Superadmin => write!(f, "superadmin"),
            StaffRole::Staff => write!(f, "staff"),
        }
    }
}
