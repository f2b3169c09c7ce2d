pub mod member;

pub use member::{
    EligibilityCheckData, InProcessItem, MemberData, MemberDetailData, MemberListItem,
    MemberNumberItem,
};
