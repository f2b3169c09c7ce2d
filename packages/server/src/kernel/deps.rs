//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! activities. External collaborators use trait abstractions so tests can swap them.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::{BaseIdentifierCodec, BaseImageStorage, BaseOrganizationSelection};

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Opaque member token codec
    pub codec: Arc<dyn BaseIdentifierCodec>,
    pub image_storage: Arc<dyn BaseImageStorage>,
    /// Superadmin organization selection (session state)
    pub organization_selection: Arc<dyn BaseOrganizationSelection>,
    /// JWT service for staff tokens
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        codec: Arc<dyn BaseIdentifierCodec>,
        image_storage: Arc<dyn BaseImageStorage>,
        organization_selection: Arc<dyn BaseOrganizationSelection>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            db_pool,
            codec,
            image_storage,
            organization_selection,
            jwt_service,
        }
    }
}
