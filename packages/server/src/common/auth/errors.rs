use thiserror::Error;

/// Authorization errors for the back office API
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Superadmin access required")]
    SuperadminRequired,
}
