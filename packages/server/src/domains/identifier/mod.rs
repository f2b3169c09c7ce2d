//! Identifier domain - member number allocation scheme
//!
//! Member numbers are `organization_id || zero_pad(sequence, 3)`. Allocation
//! itself (lock, read highest, insert) is driven by the member registry; this
//! module owns the encoding. Opaque tokens live behind `BaseIdentifierCodec`.

pub mod allocation;

pub use allocation::{compose_member_no, next_member_no, sequence_of, MAX_SEQUENCE};
