use crate::common::{resolve_scope, AuthError, OrganizationId, OrganizationScope, StaffRole};
use crate::domains::auth::JwtService;
use crate::kernel::BaseOrganizationSelection;
use crate::server::routes::ApiError;
use axum::{
    async_trait, extract::FromRequestParts, http::request::Parts, middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated staff member from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub staff_id: String,
    pub organization_id: OrganizationId,
    pub role: StaffRole,
}

impl AuthUser {
    /// Organization scope this staff member acts on for the current request
    pub async fn scope(&self, selection: &dyn BaseOrganizationSelection) -> OrganizationScope {
        resolve_scope(&self.staff_id, self.role, self.organization_id, selection).await
    }
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds AuthUser to request extensions.
/// If no token or invalid token, request continues without AuthUser; handlers
/// that need a caller reject it through the `AuthUser` extractor.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(
            staff_id = %user.staff_id,
            organization_id = %user.organization_id,
            role = %user.role,
            "Authenticated staff member"
        );
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    // Verify token
    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        staff_id: claims.staff_id,
        organization_id: claims.organization_id,
        role: claims.role,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AuthError::AuthenticationRequired.into())
    }
}
