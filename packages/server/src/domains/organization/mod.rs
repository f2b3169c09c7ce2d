//! Organization domain - per-organization loan policy

pub mod models;

pub use models::OrganizationPolicy;
