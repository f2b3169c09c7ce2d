//! Member image upload

use tracing::{error, info};

use crate::common::{CoreError, CoreResult, OrganizationScope};
use crate::domains::member::activities::load_scoped_member;
use crate::domains::member::data::MemberData;
use crate::domains::member::models::Member;
use crate::kernel::ServerDeps;

/// Largest accepted image
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Lower-cased image extension of an uploaded file name.
pub fn image_extension(file_name: &str) -> CoreResult<String> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image type '{}'",
            file_name
        )))
    }
}

/// Store a member photo as `<member_no>.<ext>` and record the filename.
pub async fn upload_member_image(
    scope: &OrganizationScope,
    token: &str,
    file_name: &str,
    bytes: Vec<u8>,
    deps: &ServerDeps,
) -> CoreResult<MemberData> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("Image is empty".to_string()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(format!(
            "Image exceeds {} bytes",
            MAX_IMAGE_BYTES
        )));
    }
    let extension = image_extension(file_name)?;

    let mut member = load_scoped_member(scope, token, deps).await?;
    let size = bytes.len();

    let stored = deps
        .image_storage
        .store_member_image(&member.member_no, &extension, bytes)
        .await
        .map_err(|e| {
            error!(member_no = %member.member_no, error = %e, "Failed to store member image");
            CoreError::Storage(e.to_string())
        })?;

    Member::set_image(scope.organization_id, &member.member_no, &stored, &deps.db_pool).await?;

    info!(
        organization_id = %scope.organization_id,
        member_no = %member.member_no,
        filename = %stored,
        size,
        "Member image stored"
    );

    member.image = Some(stored);
    Ok(MemberData::new(member, token.to_string()))
}
