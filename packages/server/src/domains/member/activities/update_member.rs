//! Update member activity - allow-listed partial update

use serde_json::{Map, Value};
use tracing::info;

use crate::common::{CoreError, CoreResult, OrganizationScope};
use crate::domains::member::activities::load_scoped_member;
use crate::domains::member::data::MemberData;
use crate::domains::member::models::{Member, MemberPatch};
use crate::kernel::ServerDeps;

/// Apply a partial update to a member of the caller's organization.
///
/// Blank values are dropped, never written; an update with nothing left still
/// records who touched the member and when.
pub async fn update_member(
    scope: &OrganizationScope,
    token: &str,
    input: &Map<String, Value>,
    deps: &ServerDeps,
) -> CoreResult<MemberData> {
    let patch = MemberPatch::from_json(input)?;
    let member = load_scoped_member(scope, token, deps).await?;

    let updated = Member::apply_patch(
        scope.organization_id,
        &member.member_no,
        &patch,
        &scope.actor,
        &deps.db_pool,
    )
    .await?;

    if updated == 0 {
        return Err(CoreError::member_not_found());
    }

    info!(
        organization_id = %scope.organization_id,
        member_no = %member.member_no,
        modified_by = %scope.actor,
        columns = ?patch.columns(),
        "Member updated"
    );

    let member = Member::find_in_scope(scope.organization_id, &member.member_no, &deps.db_pool)
        .await?
        .ok_or_else(CoreError::member_not_found)?;

    Ok(MemberData::new(member, token.to_string()))
}
