//! Session routes - superadmin organization selection

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{AuthError, CoreError, OrganizationId};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::ApiError;

#[derive(Debug, Deserialize)]
pub struct SelectOrganizationRequest {
    pub organization_id: OrganizationId,
}

#[derive(Debug, Serialize)]
pub struct SelectOrganizationResponse {
    pub success: bool,
    pub organization_id: OrganizationId,
}

/// Select the organization a superadmin works on for this session
pub async fn select_organization_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(request): Json<SelectOrganizationRequest>,
) -> Result<Json<SelectOrganizationResponse>, ApiError> {
    if !user.role.is_superadmin() {
        return Err(AuthError::SuperadminRequired.into());
    }
    if request.organization_id.as_i64() <= 0 {
        return Err(CoreError::Validation("organization_id must be positive".to_string()).into());
    }

    state
        .deps
        .organization_selection
        .select(&user.staff_id, request.organization_id)
        .await;

    info!(
        staff_id = %user.staff_id,
        organization_id = %request.organization_id,
        "Superadmin selected organization"
    );

    Ok(Json(SelectOrganizationResponse {
        success: true,
        organization_id: request.organization_id,
    }))
}
