// Cooperative Back Office - Member Registry Core
//
// This crate provides the backend API for the member registry: member number
// allocation, opaque member tokens, savings snapshots and loan eligibility.
// Architecture follows domain-driven design; every domain operation receives
// an explicit OrganizationScope.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
