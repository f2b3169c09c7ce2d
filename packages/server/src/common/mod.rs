// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod pagination;
pub mod scope;

pub use auth::{AuthError, StaffRole};
pub use entity_ids::*;
pub use error::{CoreError, CoreResult};
pub use pagination::{Page, PageArgs, ValidatedPageArgs};
pub use scope::{resolve_scope, OrganizationScope, UNSELECTED_ORGANIZATION};
