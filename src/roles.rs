use std::collections::{HashSet, VecDeque};

use crate::graph::{Gender, PersonIndex};

/// Upper bound on ancestors examined per role resolution. Consistent records
/// never get close; the cap only guards against cyclic parent links.
const ANCESTOR_VISIT_CAP: usize = 100;
/// Upper bound on father-chain steps when classifying a distant ancestor.
const PATERNAL_STEP_CAP: usize = 50;

/// Relationship of a person to the tree root, as shown on their card.
/// Distant ancestors roll up onto the parent roles: anyone on the root's
/// unbroken father line reads `Father`, every other ancestor reads `Mother`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Father,
    Mother,
    Partner,
    Brother,
    Sister,
    Son,
    Daughter,
    /// Wife of a brother of the root.
    BrotherWife,
    /// Husband of a sister of the root.
    SisterHusband,
    /// Wife of a son of the root.
    SonWife,
    /// Husband of a daughter of the root.
    DaughterHusband,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Father => "father",
            Role::Mother => "mother",
            Role::Partner => "partner",
            Role::Brother => "brother",
            Role::Sister => "sister",
            Role::Son => "son",
            Role::Daughter => "daughter",
            Role::BrotherWife => "brother's wife",
            Role::SisterHusband => "sister's husband",
            Role::SonWife => "son's wife",
            Role::DaughterHusband => "daughter's husband",
        }
    }
}

/// Resolve `target_id`'s role relative to `root_id`. Returns `None` for the
/// root themselves, for unknown ids, and for anyone whose relationship does
/// not map onto a [`Role`] (cousins, grandchildren, people of unspecified
/// gender in gendered slots).
pub fn resolve_role(index: &PersonIndex<'_>, root_id: &str, target_id: &str) -> Option<Role> {
    if root_id == target_id {
        return None;
    }
    let root = index.get(root_id)?;
    let target = index.get(target_id)?;
    let root_rel = &root.relationships;

    if root_rel.father_id.as_deref() == Some(target_id) {
        return Some(Role::Father);
    }
    if root_rel.mother_id.as_deref() == Some(target_id) {
        return Some(Role::Mother);
    }

    if is_ancestor(index, root_id, target_id) {
        return Some(if on_paternal_line(index, root_id, target_id) {
            Role::Father
        } else {
            Role::Mother
        });
    }

    if root_rel.partner_id.as_deref() == Some(target_id)
        || target.relationships.partner_id.as_deref() == Some(root_id)
    {
        return Some(Role::Partner);
    }

    if index.are_siblings(root_id, target_id) {
        return match target.gender {
            Gender::Male => Some(Role::Brother),
            Gender::Female => Some(Role::Sister),
            Gender::Other => None,
        };
    }

    if index.is_child_of(target_id, root_id) {
        return match target.gender {
            Gender::Male => Some(Role::Son),
            Gender::Female => Some(Role::Daughter),
            Gender::Other => None,
        };
    }

    // Partner of a sibling or child of the root.
    if let Some(pid) = target.relationships.partner_id.as_deref()
        && let Some(partner) = index.get(pid)
    {
        if index.are_siblings(root_id, pid) {
            return match partner.gender {
                Gender::Male => Some(Role::BrotherWife),
                Gender::Female => Some(Role::SisterHusband),
                Gender::Other => None,
            };
        }
        if index.is_child_of(pid, root_id) {
            return match partner.gender {
                Gender::Male => Some(Role::SonWife),
                Gender::Female => Some(Role::DaughterHusband),
                Gender::Other => None,
            };
        }
    }

    None
}

/// Bounded upward BFS over father/mother links.
fn is_ancestor(index: &PersonIndex<'_>, root_id: &str, target_id: &str) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(root_id);
    visited.insert(root_id);

    while let Some(id) = queue.pop_front() {
        if visited.len() > ANCESTOR_VISIT_CAP {
            return false;
        }
        let Some(person) = index.get(id) else {
            continue;
        };
        let rel = &person.relationships;
        for parent in [rel.father_id.as_deref(), rel.mother_id.as_deref()] {
            let Some(pid) = parent else {
                continue;
            };
            if pid == target_id {
                return true;
            }
            if visited.insert(pid) {
                queue.push_back(pid);
            }
        }
    }
    false
}

/// Whether `target_id` sits on the root's unbroken father chain.
fn on_paternal_line(index: &PersonIndex<'_>, root_id: &str, target_id: &str) -> bool {
    let mut current = root_id;
    for _ in 0..PATERNAL_STEP_CAP {
        let Some(fid) = index
            .get(current)
            .and_then(|p| p.relationships.father_id.as_deref())
        else {
            return false;
        };
        if fid == target_id {
            return true;
        }
        current = fid;
    }
    false
}
