use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Explicit id-reference fields; targets may be absent from the snapshot
/// (dangling ids are tolerated everywhere downstream).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Relationships {
    pub father_id: Option<String>,
    pub mother_id: Option<String>,
    pub partner_id: Option<String>,
    pub sibling_ids: Vec<String>,
    pub children_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub gender: Gender,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub date_of_death: Option<String>,
    #[serde(default)]
    pub relationships: Relationships,
}

impl Person {
    pub fn has_recorded_parent(&self) -> bool {
        self.relationships.father_id.is_some() || self.relationships.mother_id.is_some()
    }

    /// An in-law hangs off the network through a partner link only, with no
    /// own parent or sibling links recorded in it.
    pub fn is_in_law(&self) -> bool {
        self.relationships.partner_id.is_some()
            && !self.has_recorded_parent()
            && self.relationships.sibling_ids.is_empty()
    }
}

/// Transient grouping of 1-2 partners plus their shared children. Drives edge
/// synthesis only; the person table stays the authoritative relationship
/// source, so duplicate or partial family records are expected input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyUnit {
    #[serde(default)]
    pub id: Option<String>,
    pub partner_ids: Vec<String>,
    #[serde(default)]
    pub children_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tree {
    pub root_person_id: Option<String>,
    pub guardian_id: Option<String>,
}

/// One immutable read of the external graph source. Everything derived from
/// it (levels, widths, positions, roles, capabilities) is recomputed from
/// scratch per invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub people: Vec<Person>,
    #[serde(default)]
    pub families: Vec<FamilyUnit>,
    #[serde(default)]
    pub tree: Tree,
}

pub fn parse_snapshot(input: &str) -> Result<Snapshot, SnapshotError> {
    Ok(serde_json::from_str(input)?)
}

/// Derived adjacency view over a snapshot: constant-time id lookup plus the
/// original insertion order, which keeps unit and group ordering (and with it
/// the whole layout) deterministic.
#[derive(Debug)]
pub struct PersonIndex<'a> {
    order: Vec<&'a str>,
    by_id: HashMap<&'a str, &'a Person>,
}

impl<'a> PersonIndex<'a> {
    pub fn new(people: &'a [Person]) -> Self {
        let mut order = Vec::with_capacity(people.len());
        let mut by_id = HashMap::with_capacity(people.len());
        for person in people {
            // First record wins on duplicate ids.
            if by_id.insert(person.id.as_str(), person).is_none() {
                order.push(person.id.as_str());
            }
        }
        Self { order, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Person> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in snapshot order.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.order.iter().copied()
    }

    /// People in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Person> + '_ {
        self.order.iter().filter_map(|id| self.get(id))
    }

    /// True when `a` records `b` as a sibling or vice versa. Sibling sets are
    /// symmetric by invariant, but one-sided records are tolerated.
    pub fn are_siblings(&self, a: &str, b: &str) -> bool {
        let forward = self
            .get(a)
            .map(|p| p.relationships.sibling_ids.iter().any(|id| id == b))
            .unwrap_or(false);
        if forward {
            return true;
        }
        self.get(b)
            .map(|p| p.relationships.sibling_ids.iter().any(|id| id == a))
            .unwrap_or(false)
    }

    /// True when `child` is a recorded child of `parent`, from either side.
    pub fn is_child_of(&self, child: &str, parent: &str) -> bool {
        if let Some(p) = self.get(parent)
            && p.relationships.children_ids.iter().any(|id| id == child)
        {
            return true;
        }
        self.get(child)
            .map(|c| {
                c.relationships.father_id.as_deref() == Some(parent)
                    || c.relationships.mother_id.as_deref() == Some(parent)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, gender: Gender) -> Person {
        Person {
            id: id.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            gender,
            date_of_birth: None,
            date_of_death: None,
            relationships: Relationships::default(),
        }
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let mut a = person("a", Gender::Male);
        a.first_name = "first".to_string();
        let mut dup = person("a", Gender::Male);
        dup.first_name = "second".to_string();
        let people = vec![a, dup, person("b", Gender::Female)];
        let index = PersonIndex::new(&people);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").unwrap().first_name, "first");
    }

    #[test]
    fn sibling_check_covers_one_sided_records() {
        let mut a = person("a", Gender::Male);
        a.relationships.sibling_ids = vec!["b".to_string()];
        let b = person("b", Gender::Female);
        let people = vec![a, b];
        let index = PersonIndex::new(&people);
        assert!(index.are_siblings("a", "b"));
        assert!(index.are_siblings("b", "a"));
        assert!(!index.are_siblings("a", "missing"));
    }

    #[test]
    fn in_law_requires_partner_and_no_blood_links() {
        let mut spouse = person("spouse", Gender::Female);
        spouse.relationships.partner_id = Some("root".to_string());
        assert!(spouse.is_in_law());

        spouse.relationships.father_id = Some("f".to_string());
        assert!(!spouse.is_in_law());
    }

    #[test]
    fn snapshot_decodes_camel_case() {
        let raw = r#"{
            "people": [
                {
                    "id": "p1",
                    "firstName": "Ada",
                    "gender": "female",
                    "relationships": { "childrenIds": ["p2"] }
                }
            ],
            "tree": { "rootPersonId": "p1" }
        }"#;
        let snapshot = parse_snapshot(raw).unwrap();
        assert_eq!(snapshot.people[0].relationships.children_ids, ["p2"]);
        assert_eq!(snapshot.tree.root_person_id.as_deref(), Some("p1"));
    }

    #[test]
    fn malformed_snapshot_reports_decode_error() {
        let err = parse_snapshot("{ not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Decode(_)));
    }
}
