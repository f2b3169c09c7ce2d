//! Member domain activities - business logic functions
//!
//! Every activity takes the caller's `OrganizationScope` and the shared
//! `ServerDeps`; members are addressed by opaque token from the outside.

mod queries;
mod register_member;
mod update_member;
mod upload_image;

pub use queries::{
    check_eligibility, get_member_detail, list_in_process, list_member_numbers, list_members,
};
pub use register_member::register_member;
pub use update_member::update_member;
pub use upload_image::{image_extension, upload_member_image, MAX_IMAGE_BYTES};

use tracing::warn;

use crate::common::{CoreError, CoreResult, MemberNo, OrganizationScope};
use crate::domains::member::models::Member;
use crate::kernel::ServerDeps;

/// Decode a member token and load the member within the caller's scope.
///
/// Undecodable tokens and members of other organizations both surface as
/// "member not found".
pub(crate) async fn load_scoped_member(
    scope: &OrganizationScope,
    token: &str,
    deps: &ServerDeps,
) -> CoreResult<Member> {
    let member_no: MemberNo = deps.codec.decode(token).map_err(|e| {
        warn!(organization_id = %scope.organization_id, "Rejected member token");
        e
    })?;

    Member::find_in_scope(scope.organization_id, &member_no, &deps.db_pool)
        .await?
        .ok_or_else(CoreError::member_not_found)
}
