//! Member flag invariants, re-established synchronously after each edit.
//!
//! - At most one member per organization is the representative.
//! - Only an activated member can be the representative.

use tracing::debug;

use crate::form::model::FormOrgField;

/// Set or clear the representative flag of `org.members[index]`.
///
/// Setting clears every sibling first. Returns whether the flag now has the
/// requested value; an out-of-range index or an inactive member is refused.
pub fn set_representation(org: &mut FormOrgField, index: usize, value: bool) -> bool {
    let Some(member) = org.members.get(index) else {
        return false;
    };
    if !value {
        org.members[index].representation = false;
        return true;
    }
    if !member.activated {
        debug!(
            "set_representation: refusing inactive member {:?} in {}",
            member.name, org.identifier
        );
        return false;
    }
    for (i, m) in org.members.iter_mut().enumerate() {
        m.representation = i == index;
    }
    true
}

/// Activate or deactivate `org.members[index]`; deactivation drops the
/// representative flag. Returns false for an out-of-range index.
pub fn set_activated(org: &mut FormOrgField, index: usize, value: bool) -> bool {
    let Some(member) = org.members.get_mut(index) else {
        return false;
    };
    member.activated = value;
    if !value {
        member.representation = false;
    }
    true
}
