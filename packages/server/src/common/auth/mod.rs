/// Authorization primitives for the back office
///
/// Staff authenticate with a JWT; the role on the token decides how the
/// organization scope of a request is resolved (see `common::scope`).

mod errors;
mod role;

pub use errors::AuthError;
pub use role::StaffRole;
