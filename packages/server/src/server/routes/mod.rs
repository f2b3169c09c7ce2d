// HTTP routes
pub mod error;
pub mod health;
pub mod members;
pub mod session;

pub use error::*;
pub use health::*;
pub use members::*;
pub use session::*;
