use anyhow::anyhow;

use crate::common::{CoreError, CoreResult, MemberNo, OrganizationId};

/// Digits reserved for the per-organization sequence
pub const SEQUENCE_WIDTH: usize = 3;

/// Largest sequence the encoding can hold without becoming ambiguous
pub const MAX_SEQUENCE: u32 = 999;

/// Build the member number for a sequence within an organization.
pub fn compose_member_no(organization_id: OrganizationId, sequence: u32) -> MemberNo {
    MemberNo::from(format!(
        "{}{:0width$}",
        organization_id,
        sequence,
        width = SEQUENCE_WIDTH
    ))
}

/// Parse the sequence suffix of a member number belonging to `organization_id`.
pub fn sequence_of(organization_id: OrganizationId, member_no: &MemberNo) -> CoreResult<u32> {
    let prefix = organization_id.to_string();

    let suffix = member_no
        .as_str()
        .strip_prefix(prefix.as_str())
        .filter(|s| s.len() == SEQUENCE_WIDTH && s.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| {
            CoreError::Internal(anyhow!(
                "member number {} is not a sequence of organization {}",
                member_no,
                organization_id
            ))
        })?;

    suffix
        .parse::<u32>()
        .map_err(|e| CoreError::Internal(anyhow!("bad sequence in {}: {}", member_no, e)))
}

/// Next member number after `highest` (the current maximum for the
/// organization, if any). Sequences start at 1.
pub fn next_member_no(
    organization_id: OrganizationId,
    highest: Option<&MemberNo>,
) -> CoreResult<MemberNo> {
    let current = match highest {
        Some(member_no) => sequence_of(organization_id, member_no)?,
        None => 0,
    };

    let next = current + 1;
    if next > MAX_SEQUENCE {
        return Err(CoreError::SequenceExhausted(organization_id));
    }

    Ok(compose_member_no(organization_id, next))
}
