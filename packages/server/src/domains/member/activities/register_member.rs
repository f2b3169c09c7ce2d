//! Register member activity - allocates the member number and persists

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::common::{CoreError, CoreResult, OrganizationScope, UNSELECTED_ORGANIZATION};
use crate::domains::member::data::MemberData;
use crate::domains::member::models::{Member, MemberPatch};
use crate::kernel::ServerDeps;

/// Allocation attempts before an `AllocationConflict` is surfaced
const ALLOCATION_ATTEMPTS: u32 = 2;

/// Register a new member in the caller's organization.
///
/// Accepts the same field vocabulary as an update; `name` is required.
pub async fn register_member(
    scope: &OrganizationScope,
    input: &Map<String, Value>,
    deps: &ServerDeps,
) -> CoreResult<MemberData> {
    if scope.organization_id == UNSELECTED_ORGANIZATION {
        return Err(CoreError::Validation(
            "No organization selected".to_string(),
        ));
    }

    let patch = MemberPatch::from_json(input)?;
    if !patch.contains("name") {
        return Err(CoreError::Validation("name is required".to_string()));
    }

    let mut attempt = 1;
    let member = loop {
        match Member::register(scope.organization_id, &patch, &scope.actor, &deps.db_pool).await {
            Err(CoreError::AllocationConflict(organization_id))
                if attempt < ALLOCATION_ATTEMPTS =>
            {
                warn!(
                    organization_id = %organization_id,
                    attempt,
                    "Member number allocation conflicted, retrying"
                );
                attempt += 1;
            }
            result => break result?,
        }
    };

    let token = deps.codec.encode(&member.member_no)?;

    info!(
        organization_id = %member.organization_id,
        member_no = %member.member_no,
        created_by = %scope.actor,
        fields = patch.len(),
        "Member registered"
    );

    Ok(MemberData::new(member, token))
}
