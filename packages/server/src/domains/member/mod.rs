//! Member domain - the organization-scoped member registry
//!
//! Handlers resolve an `OrganizationScope` and call the activities here;
//! activities translate opaque tokens, touch the models and assemble `data`
//! types for the API.

pub mod activities;
pub mod data;
pub mod models;

// Re-export commonly used types
pub use data::{
    EligibilityCheckData, InProcessItem, MemberData, MemberDetailData, MemberListItem,
    MemberNumberItem,
};
pub use models::{Member, MemberPatch};
