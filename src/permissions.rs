use serde::Serialize;

use crate::graph::PersonIndex;
use crate::roles::{Role, resolve_role};

/// Which relative slots the acting user may fill on a target's card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_add_parents: bool,
    pub can_add_siblings: bool,
    pub can_add_partner: bool,
    pub can_add_children: bool,
}

impl Capabilities {
    pub const fn all() -> Self {
        Self {
            can_add_parents: true,
            can_add_siblings: true,
            can_add_partner: true,
            can_add_children: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            can_add_parents: false,
            can_add_siblings: false,
            can_add_partner: false,
            can_add_children: false,
        }
    }
}

/// Capabilities of `acting_user_id` over `target_id`'s card. Editing your own
/// card is always unrestricted. Admins get a widened set derived from the
/// target's role relative to the tree root; everyone else falls back to
/// structural rules keyed on whether the target married into the tree.
pub fn resolve_permissions(
    index: &PersonIndex<'_>,
    target_id: &str,
    acting_user_id: &str,
    is_admin: bool,
    root_id: &str,
) -> Capabilities {
    if target_id == acting_user_id {
        return Capabilities::all();
    }
    let Some(target) = index.get(target_id) else {
        return Capabilities::none();
    };
    let role = resolve_role(index, root_id, target_id);

    if is_admin {
        return admin_overrides(role);
    }

    let in_law = target.is_in_law();
    Capabilities {
        can_add_parents: !in_law,
        can_add_siblings: !in_law,
        can_add_partner: !(in_law || role == Some(Role::Sister)),
        can_add_children: true,
    }
}

/// Per-role admin capability table. The tighter rows keep an admin from
/// growing the tree sideways through relatives whose own branches belong to
/// another tree.
fn admin_overrides(role: Option<Role>) -> Capabilities {
    match role {
        Some(Role::Father) => Capabilities::all(),
        Some(Role::Mother)
        | Some(Role::Partner)
        | Some(Role::BrotherWife)
        | Some(Role::SisterHusband)
        | Some(Role::SonWife)
        | Some(Role::DaughterHusband) => Capabilities {
            can_add_parents: false,
            can_add_siblings: false,
            can_add_partner: false,
            can_add_children: true,
        },
        Some(Role::Brother) | Some(Role::Sister) => Capabilities {
            can_add_parents: false,
            can_add_siblings: false,
            can_add_partner: true,
            can_add_children: true,
        },
        Some(Role::Son) | Some(Role::Daughter) => Capabilities {
            can_add_parents: false,
            can_add_siblings: true,
            can_add_partner: true,
            can_add_children: true,
        },
        None => Capabilities {
            can_add_parents: false,
            can_add_siblings: false,
            can_add_partner: true,
            can_add_children: true,
        },
    }
}

/// The relative slot an add action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddKind {
    Parents,
    Siblings,
    Partner,
    Children,
}

/// Advisory precondition failures surfaced to the UI before an add. These do
/// not veto the capability itself; the caller decides how to present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardViolation {
    /// Adding siblings needs both parents on record to attach them to.
    MissingParents,
    /// Adding children needs a partner on record to co-parent.
    MissingPartner,
}

/// Check the precondition for one add action on the target.
pub fn validate_add(
    index: &PersonIndex<'_>,
    target_id: &str,
    kind: AddKind,
) -> Option<GuardViolation> {
    let Some(target) = index.get(target_id) else {
        return None;
    };
    let rel = &target.relationships;
    match kind {
        AddKind::Siblings => {
            if rel.father_id.is_none() || rel.mother_id.is_none() {
                Some(GuardViolation::MissingParents)
            } else {
                None
            }
        }
        AddKind::Children => {
            if rel.partner_id.is_none() {
                Some(GuardViolation::MissingPartner)
            } else {
                None
            }
        }
        AddKind::Parents | AddKind::Partner => None,
    }
}

/// First violation across all add kinds, in fixed order: missing parents is
/// reported before a missing partner.
pub fn first_guard_violation(index: &PersonIndex<'_>, target_id: &str) -> Option<GuardViolation> {
    validate_add(index, target_id, AddKind::Siblings)
        .or_else(|| validate_add(index, target_id, AddKind::Children))
}
