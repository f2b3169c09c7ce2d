// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (allocation, eligibility) lives in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseIdentifierCodec, BaseImageStorage)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{CoreResult, MemberNo, OrganizationId};

// =============================================================================
// Identifier Codec Trait (Infrastructure - opaque member tokens)
// =============================================================================

/// Reversible translation between internal member numbers and the opaque
/// tokens handed to API callers.
pub trait BaseIdentifierCodec: Send + Sync {
    /// Encrypt a member number into a URL/JSON-safe token.
    ///
    /// Two calls for the same member number may return different tokens.
    fn encode(&self, member_no: &MemberNo) -> CoreResult<String>;

    /// Recover the member number from a token produced by `encode`.
    ///
    /// Fails with `CoreError::InvalidToken` for anything else.
    fn decode(&self, token: &str) -> CoreResult<MemberNo>;
}

// =============================================================================
// Image Storage Trait (Infrastructure - member photos)
// =============================================================================

#[async_trait]
pub trait BaseImageStorage: Send + Sync {
    /// Store a member image and return the stored filename
    /// (`<member_no>.<extension>`).
    async fn store_member_image(
        &self,
        member_no: &MemberNo,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String>;
}

// =============================================================================
// Organization Selection Trait (Infrastructure - superadmin session state)
// =============================================================================

#[async_trait]
pub trait BaseOrganizationSelection: Send + Sync {
    /// Organization currently selected by a superadmin, if any.
    async fn selected(&self, staff_id: &str) -> Option<OrganizationId>;

    /// Record the organization a superadmin works on.
    async fn select(&self, staff_id: &str, organization_id: OrganizationId);
}
