//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domains::member::activities::MAX_IMAGE_BYTES;
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    create_member_handler, eligibility_handler, health_handler, in_process_handler,
    list_members_handler, member_detail_handler, member_numbers_handler,
    select_organization_handler, update_member_handler, upload_image_handler,
};

/// Upper bound on handling a single request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Room for multipart framing around the image bytes
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// `per_page` used when a list request does not give one
    pub default_page_size: i64,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, allowed_origins: &[String], default_page_size: i64) -> Router {
    let jwt_service = deps.jwt_service.clone();

    let app_state = AppState {
        deps: Arc::new(deps),
        default_page_size,
    };

    let member_routes = Router::new()
        .route(
            "/",
            get(list_members_handler).post(create_member_handler),
        )
        .route("/numbers", get(member_numbers_handler))
        .route("/in-process", get(in_process_handler))
        .route(
            "/:token",
            get(member_detail_handler).put(update_member_handler),
        )
        .route(
            "/:token/image",
            post(upload_image_handler)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + MULTIPART_OVERHEAD)),
        )
        .route("/:token/eligibility", get(eligibility_handler));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/session/organization", put(select_organization_handler))
        .nest("/api/members", member_routes)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        })) // JWT authentication
        .layer(Extension(app_state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
