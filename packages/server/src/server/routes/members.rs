//! Member registry routes
//!
//! Members are addressed by opaque token; every handler resolves the caller's
//! organization scope before touching the registry.

use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::common::{CoreError, Page, PageArgs};
use crate::domains::member::activities;
use crate::domains::member::{
    EligibilityCheckData, InProcessItem, MemberData, MemberDetailData, MemberListItem,
    MemberNumberItem,
};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::ApiError;

/// Multipart field carrying the member photo
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default, Deserialize)]
pub struct ListMembersQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// GET /api/members
pub async fn list_members_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Query(query): Query<ListMembersQuery>,
) -> Result<Json<Page<MemberListItem>>, ApiError> {
    let scope = user.scope(state.deps.organization_selection.as_ref()).await;
    let args = PageArgs {
        page: query.page,
        per_page: query.per_page,
    }
    .validate(state.default_page_size);

    let page =
        activities::list_members(&scope, query.search.as_deref(), &args, &state.deps).await?;
    Ok(Json(page))
}

/// POST /api/members
pub async fn create_member_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(input): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<MemberData>), ApiError> {
    let scope = user.scope(state.deps.organization_selection.as_ref()).await;
    let member = activities::register_member(&scope, &input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/members/numbers
pub async fn member_numbers_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<MemberNumberItem>>, ApiError> {
    let scope = user.scope(state.deps.organization_selection.as_ref()).await;
    Ok(Json(activities::list_member_numbers(&scope, &state.deps).await?))
}

/// GET /api/members/in-process
pub async fn in_process_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<InProcessItem>>, ApiError> {
    let scope = user.scope(state.deps.organization_selection.as_ref()).await;
    Ok(Json(activities::list_in_process(&scope, &state.deps).await?))
}

/// GET /api/members/:token
pub async fn member_detail_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(token): Path<String>,
) -> Result<Json<MemberDetailData>, ApiError> {
    let scope = user.scope(state.deps.organization_selection.as_ref()).await;
    let today = Utc::now().date_naive();
    Ok(Json(
        activities::get_member_detail(&scope, &token, today, &state.deps).await?,
    ))
}

/// PUT /api/members/:token
pub async fn update_member_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(token): Path<String>,
    Json(input): Json<Map<String, Value>>,
) -> Result<Json<MemberData>, ApiError> {
    let scope = user.scope(state.deps.organization_selection.as_ref()).await;
    Ok(Json(
        activities::update_member(&scope, &token, &input, &state.deps).await?,
    ))
}

/// POST /api/members/:token/image
pub async fn upload_image_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(token): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<MemberData>, ApiError> {
    let scope = user.scope(state.deps.organization_selection.as_ref()).await;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CoreError::Validation(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| CoreError::Validation(format!("Malformed upload: {}", e)))?;

        let member = activities::upload_member_image(
            &scope,
            &token,
            &file_name,
            bytes.to_vec(),
            &state.deps,
        )
        .await?;
        return Ok(Json(member));
    }

    Err(CoreError::Validation(format!("Missing '{}' file field", IMAGE_FIELD)).into())
}

/// GET /api/members/:token/eligibility
pub async fn eligibility_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(token): Path<String>,
) -> Result<Json<EligibilityCheckData>, ApiError> {
    let scope = user.scope(state.deps.organization_selection.as_ref()).await;
    let today = Utc::now().date_naive();
    Ok(Json(
        activities::check_eligibility(&scope, &token, today, &state.deps).await?,
    ))
}
