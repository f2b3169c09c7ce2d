pub mod member;
pub mod patch;

pub use member::{search_pattern, Member, MemberLoanRow, MemberNumberRow, MemberSummary};
pub use patch::{FieldKind, FieldValue, MemberPatch, MUTABLE_FIELDS};
