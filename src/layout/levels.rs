use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::{PersonIndex, Tree};

/// Traversal start: the current user, then the tree root, then the first
/// visible person in snapshot order.
pub fn resolve_start_id<'a>(
    index: &PersonIndex<'a>,
    hidden: &HashSet<String>,
    current_user_id: &str,
    tree: &Tree,
) -> Option<&'a str> {
    if let Some(user) = index.get(current_user_id)
        && !hidden.contains(current_user_id)
    {
        return Some(user.id.as_str());
    }
    if let Some(root_id) = tree.root_person_id.as_deref()
        && let Some(root) = index.get(root_id)
        && !hidden.contains(root_id)
    {
        return Some(root.id.as_str());
    }
    index.ids().find(|id| !hidden.contains(*id))
}

/// BFS generation assignment from `start_id`: siblings and partners share the
/// level, children sit one below, parents one above. Each id is visited once;
/// hidden and dangling ids are skipped, and anyone unreached stays out of the
/// layout. A bounded fixed-point pass then raises any level that undercuts
/// `max(father, mother) + 1`, repairing levels that arrived through a
/// sibling/partner edge before the parent edge.
pub fn assign_levels(
    index: &PersonIndex<'_>,
    hidden: &HashSet<String>,
    start_id: &str,
    repair_passes: usize,
) -> HashMap<String, i32> {
    let mut levels: HashMap<String, i32> = HashMap::new();
    if !index.contains(start_id) || hidden.contains(start_id) {
        return levels;
    }

    let mut queue: VecDeque<(&str, i32)> = VecDeque::new();
    levels.insert(start_id.to_string(), 0);
    queue.push_back((start_id, 0));

    while let Some((id, level)) = queue.pop_front() {
        let Some(person) = index.get(id) else {
            continue;
        };
        let rel = &person.relationships;
        let mut neighbors: Vec<(&str, i32)> = Vec::new();
        for sid in &rel.sibling_ids {
            neighbors.push((sid, level));
        }
        if let Some(pid) = rel.partner_id.as_deref() {
            neighbors.push((pid, level));
        }
        for cid in &rel.children_ids {
            neighbors.push((cid, level + 1));
        }
        if let Some(fid) = rel.father_id.as_deref() {
            neighbors.push((fid, level - 1));
        }
        if let Some(mid) = rel.mother_id.as_deref() {
            neighbors.push((mid, level - 1));
        }
        for (next_id, next_level) in neighbors {
            if hidden.contains(next_id) || levels.contains_key(next_id) {
                continue;
            }
            let Some(next) = index.get(next_id) else {
                continue;
            };
            levels.insert(next.id.clone(), next_level);
            queue.push_back((next.id.as_str(), next_level));
        }
    }

    for _ in 0..repair_passes {
        let mut changed = false;
        for id in index.ids() {
            let Some(&level) = levels.get(id) else {
                continue;
            };
            let Some(person) = index.get(id) else {
                continue;
            };
            let rel = &person.relationships;
            let mut required: Option<i32> = None;
            for parent in [rel.father_id.as_deref(), rel.mother_id.as_deref()] {
                if let Some(pid) = parent
                    && let Some(&parent_level) = levels.get(pid)
                {
                    let candidate = parent_level + 1;
                    required = Some(required.map_or(candidate, |r: i32| r.max(candidate)));
                }
            }
            if let Some(required) = required
                && level < required
            {
                levels.insert(id.to_string(), required);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Gender, Person, Relationships};

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

    fn three_generations() -> Vec<Person> {
        vec![
            person(
                "f",
                Relationships {
                    children_ids: vec!["me".into(), "sib".into()],
                    ..Relationships::default()
                },
            ),
            person(
                "me",
                Relationships {
                    father_id: Some("f".into()),
                    sibling_ids: vec!["sib".into()],
                    children_ids: vec!["kid".into()],
                    ..Relationships::default()
                },
            ),
            person(
                "sib",
                Relationships {
                    father_id: Some("f".into()),
                    sibling_ids: vec!["me".into()],
                    ..Relationships::default()
                },
            ),
            person(
                "kid",
                Relationships {
                    father_id: Some("me".into()),
                    ..Relationships::default()
                },
            ),
            person("island", Relationships::default()),
        ]
    }

    #[test]
    fn bfs_levels_follow_generation_edges() {
        let people = three_generations();
        let index = PersonIndex::new(&people);
        let levels = assign_levels(&index, &HashSet::new(), "me", 10);
        assert_eq!(levels.get("me"), Some(&0));
        assert_eq!(levels.get("sib"), Some(&0));
        assert_eq!(levels.get("f"), Some(&-1));
        assert_eq!(levels.get("kid"), Some(&1));
        assert!(!levels.contains_key("island"));
    }

    #[test]
    fn repair_pass_lifts_child_above_parent() {
        // kid reached through the sibling edge first at the same level as its
        // own father.
        let people = vec![
            person(
                "me",
                Relationships {
                    sibling_ids: vec!["kid".into()],
                    ..Relationships::default()
                },
            ),
            person(
                "kid",
                Relationships {
                    sibling_ids: vec!["me".into()],
                    father_id: Some("me".into()),
                    ..Relationships::default()
                },
            ),
        ];
        let index = PersonIndex::new(&people);
        let levels = assign_levels(&index, &HashSet::new(), "me", 10);
        assert!(levels["kid"] > levels["me"]);
    }

    #[test]
    fn cyclic_parent_links_terminate() {
        let people = vec![
            person(
                "a",
                Relationships {
                    father_id: Some("b".into()),
                    ..Relationships::default()
                },
            ),
            person(
                "b",
                Relationships {
                    father_id: Some("a".into()),
                    ..Relationships::default()
                },
            ),
        ];
        let index = PersonIndex::new(&people);
        // Best-effort output; the pass cap guarantees termination.
        let levels = assign_levels(&index, &HashSet::new(), "a", 10);
        assert_eq!(levels.len(), 2);
    }

    #[test]
    fn start_falls_back_from_user_to_root_to_first_visible() {
        let people = three_generations();
        let index = PersonIndex::new(&people);
        let hidden = HashSet::new();
        let tree = Tree {
            root_person_id: Some("f".into()),
            guardian_id: None,
        };
        assert_eq!(resolve_start_id(&index, &hidden, "me", &tree), Some("me"));
        assert_eq!(resolve_start_id(&index, &hidden, "ghost", &tree), Some("f"));
        let empty_tree = Tree::default();
        assert_eq!(
            resolve_start_id(&index, &hidden, "ghost", &empty_tree),
            Some("f")
        );
    }
}
