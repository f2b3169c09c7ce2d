//! Typed identifiers for registry entities.
//!
//! Organization IDs and member numbers are both "just" an integer and a
//! string in the database; wrapping them keeps call sites from swapping a
//! member number for a free-text field or an organization ID for a row ID.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Identifier of an owning organization (cooperative / company).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct OrganizationId(i64);

impl OrganizationId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for OrganizationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal, organization-scoped member number (e.g. `3007` = organization
/// `3`, sequence `007`).
///
/// Never exposed to callers directly; see `BaseIdentifierCodec` for the
/// opaque form that crosses the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct MemberNo(String);

impl MemberNo {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for MemberNo {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MemberNo {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for MemberNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for MemberNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_no_serializes_as_plain_string() {
        let no = MemberNo::new("3007");
        assert_eq!(serde_json::to_string(&no).unwrap(), "\"3007\"");
        assert_eq!(no.to_string(), "3007");
    }

    #[test]
    fn test_organization_id_display() {
        assert_eq!(OrganizationId::new(12).to_string(), "12");
        assert_eq!(OrganizationId::from(12).as_i64(), 12);
    }
}
