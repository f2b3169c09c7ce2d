//! Kernel module - server infrastructure and dependencies.

pub mod codec;
pub mod deps;
pub mod selection;
pub mod storage;
pub mod test_dependencies;
pub mod traits;

pub use codec::AesGcmIdentifierCodec;
pub use deps::ServerDeps;
pub use selection::InMemoryOrganizationSelection;
pub use storage::LocalImageStorage;
pub use traits::*;
