//! Auth domain - staff token issuing and verification
//!
//! Responsibilities:
//! - Staff JWTs carrying staff id, organization and role
//! - Verification for the HTTP middleware

pub mod jwt;

pub use jwt::{Claims, JwtService};
