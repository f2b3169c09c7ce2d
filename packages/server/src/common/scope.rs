//! Explicit organization scope for every registry operation.
//!
//! The HTTP layer resolves who the caller is and which organization they act
//! for; domain code only ever sees the resulting `OrganizationScope`.

use super::{OrganizationId, StaffRole};
use crate::kernel::BaseOrganizationSelection;

/// Organization used when a superadmin has not selected one yet.
/// No members are ever registered under it.
pub const UNSELECTED_ORGANIZATION: OrganizationId = OrganizationId::new(0);

/// The organization a request acts on, plus the staff member acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationScope {
    pub organization_id: OrganizationId,
    /// Staff identifier recorded in created_by / modified_by
    pub actor: String,
}

impl OrganizationScope {
    pub fn new(organization_id: OrganizationId, actor: impl Into<String>) -> Self {
        Self {
            organization_id,
            actor: actor.into(),
        }
    }
}

/// Resolve the scope of a request.
///
/// Superadmins act on the organization currently selected for their session;
/// everyone else acts on their own organization.
pub async fn resolve_scope(
    staff_id: &str,
    role: StaffRole,
    own_organization: OrganizationId,
    selection: &dyn BaseOrganizationSelection,
) -> OrganizationScope {
    let organization_id = if role.is_superadmin() {
        selection
            .selected(staff_id)
            .await
            .unwrap_or(UNSELECTED_ORGANIZATION)
    } else {
        own_organization
    };

    OrganizationScope::new(organization_id, staff_id)
}
