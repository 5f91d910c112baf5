use std::collections::HashSet;

use crate::graph::{Person, PersonIndex};

/// Ids the acting user should not see: the parents and siblings of each
/// in-law adjacent to them. The in-laws considered are the user's partner,
/// that partner's siblings, the user's mother, and each child's partner.
/// The in-laws themselves (and the user) are never hidden.
pub fn hidden_in_law_relatives(index: &PersonIndex<'_>, current_user_id: &str) -> HashSet<String> {
    let Some(user) = index.get(current_user_id) else {
        return HashSet::new();
    };

    let mut in_laws: Vec<&Person> = Vec::new();
    if let Some(pid) = user.relationships.partner_id.as_deref()
        && let Some(partner) = index.get(pid)
    {
        in_laws.push(partner);
        for sid in &partner.relationships.sibling_ids {
            if let Some(sibling) = index.get(sid) {
                in_laws.push(sibling);
            }
        }
    }
    if let Some(mid) = user.relationships.mother_id.as_deref()
        && let Some(mother) = index.get(mid)
    {
        in_laws.push(mother);
    }
    for cid in &user.relationships.children_ids {
        if let Some(child) = index.get(cid)
            && let Some(pid) = child.relationships.partner_id.as_deref()
            && let Some(child_partner) = index.get(pid)
        {
            in_laws.push(child_partner);
        }
    }

    let mut hidden = HashSet::new();
    for in_law in &in_laws {
        let rel = &in_law.relationships;
        for parent in [rel.father_id.as_deref(), rel.mother_id.as_deref()] {
            if let Some(id) = parent {
                hidden.insert(id.to_string());
            }
        }
        for sid in &rel.sibling_ids {
            hidden.insert(sid.clone());
        }
    }
    // Sibling sets overlap across the listed in-laws; none of them may end up
    // hidden through each other.
    for in_law in &in_laws {
        hidden.remove(&in_law.id);
    }
    hidden.remove(current_user_id);
    hidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Gender, Relationships};

    fn person(id: &str, rel: Relationships) -> Person {
        Person {
            id: id.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            gender: Gender::Other,
            date_of_birth: None,
            date_of_death: None,
            relationships: rel,
        }
    }

    #[test]
    fn partner_parents_hidden_partner_siblings_visible() {
        let people = vec![
            person(
                "me",
                Relationships {
                    partner_id: Some("wife".into()),
                    ..Relationships::default()
                },
            ),
            person(
                "wife",
                Relationships {
                    partner_id: Some("me".into()),
                    father_id: Some("wf".into()),
                    mother_id: Some("wm".into()),
                    sibling_ids: vec!["wsib".into()],
                    ..Relationships::default()
                },
            ),
            person(
                "wsib",
                Relationships {
                    father_id: Some("wf".into()),
                    mother_id: Some("wm".into()),
                    sibling_ids: vec!["wife".into()],
                    ..Relationships::default()
                },
            ),
            person("wf", Relationships::default()),
            person("wm", Relationships::default()),
        ];
        let index = PersonIndex::new(&people);
        let hidden = hidden_in_law_relatives(&index, "me");
        assert!(hidden.contains("wf"));
        assert!(hidden.contains("wm"));
        // wsib is itself a listed in-law; wife is wsib's sibling. Neither may
        // be hidden.
        assert!(!hidden.contains("wsib"));
        assert!(!hidden.contains("wife"));
        assert!(!hidden.contains("me"));
    }

    #[test]
    fn mothers_side_branch_hidden() {
        let people = vec![
            person(
                "me",
                Relationships {
                    mother_id: Some("mom".into()),
                    ..Relationships::default()
                },
            ),
            person(
                "mom",
                Relationships {
                    father_id: Some("mgf".into()),
                    sibling_ids: vec!["aunt".into()],
                    children_ids: vec!["me".into()],
                    ..Relationships::default()
                },
            ),
            person("mgf", Relationships::default()),
            person("aunt", Relationships::default()),
        ];
        let index = PersonIndex::new(&people);
        let hidden = hidden_in_law_relatives(&index, "me");
        assert!(hidden.contains("mgf"));
        assert!(hidden.contains("aunt"));
        assert!(!hidden.contains("mom"));
    }

    #[test]
    fn unknown_user_hides_nothing() {
        let people = vec![person("a", Relationships::default())];
        let index = PersonIndex::new(&people);
        assert!(hidden_in_law_relatives(&index, "ghost").is_empty());
    }
}
