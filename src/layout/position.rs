use std::collections::{BTreeMap, HashMap};

use crate::config::LayoutConfig;
use crate::graph::PersonIndex;

use super::types::{NodeKind, PositionedNode};
use super::units::{LevelGrid, Unit, units_at_level};

struct SiblingGroup {
    /// Midpoint of the already-placed parent unit; `None` for units with no
    /// positioned parent, which are placed by cursor alone.
    parent_mid: Option<f32>,
    units: Vec<Unit>,
}

/// Top-down placement, shallowest level first, with a running horizontal
/// cursor per level. Units sharing a parent unit form a sibling group
/// centered under the parent's midpoint; the group is then shifted so the
/// average of its blood-relative centers (not the naive box center, which
/// in-law partners would skew) lands on that midpoint, keeping descent lines
/// to blood children vertical.
pub(crate) fn position_nodes(
    index: &PersonIndex<'_>,
    grid: &LevelGrid,
    levels: &HashMap<String, i32>,
    widths: &HashMap<String, f32>,
    config: &LayoutConfig,
) -> BTreeMap<String, PositionedNode> {
    let mut nodes: BTreeMap<String, PositionedNode> = BTreeMap::new();
    let min_level = grid.min_level();

    for &level in &grid.ordered_levels {
        let y = (level - min_level) as f32 * config.level_height;
        let members = grid
            .members
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let units = units_at_level(index, members, level, levels);
        let mut groups = collect_sibling_groups(index, units, levels, &nodes);
        // Order groups under their parents' existing x to reduce crossings;
        // parentless groups trail in encounter order.
        groups.sort_by(|a, b| {
            let ax = a.parent_mid.unwrap_or(f32::INFINITY);
            let bx = b.parent_mid.unwrap_or(f32::INFINITY);
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut cursor = 0.0f32;
        for group in &groups {
            place_group(group, index, widths, config, &mut cursor, y, level, &mut nodes);
        }
    }

    nodes
}

fn collect_sibling_groups(
    index: &PersonIndex<'_>,
    units: Vec<Unit>,
    levels: &HashMap<String, i32>,
    nodes: &BTreeMap<String, PositionedNode>,
) -> Vec<SiblingGroup> {
    let mut groups: Vec<SiblingGroup> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();
    for unit in units {
        let Some(anchor) = parent_anchor(index, &unit, nodes) else {
            groups.push(SiblingGroup {
                parent_mid: None,
                units: vec![unit],
            });
            continue;
        };
        let (key, mid) = parent_unit_key(index, &anchor, levels, nodes);
        if let Some(&idx) = by_key.get(&key) {
            groups[idx].units.push(unit);
        } else {
            by_key.insert(key, groups.len());
            groups.push(SiblingGroup {
                parent_mid: Some(mid),
                units: vec![unit],
            });
        }
    }
    groups
}

/// The representative parent id for sibling-group lookup: the first member
/// with a recorded and already-positioned parent wins, so a blood member
/// outranks an in-law partner.
fn parent_anchor(
    index: &PersonIndex<'_>,
    unit: &Unit,
    nodes: &BTreeMap<String, PositionedNode>,
) -> Option<String> {
    for member in unit.members() {
        let person = index.get(member)?;
        let rel = &person.relationships;
        for parent in [rel.father_id.as_deref(), rel.mother_id.as_deref()] {
            if let Some(pid) = parent
                && nodes.contains_key(pid)
            {
                return Some(pid.to_string());
            }
        }
    }
    None
}

/// Canonical key and midpoint for the anchor's unit. Children recording
/// different halves of the same couple land in the same group, and the
/// midpoint averages both partners' centers.
fn parent_unit_key(
    index: &PersonIndex<'_>,
    anchor: &str,
    levels: &HashMap<String, i32>,
    nodes: &BTreeMap<String, PositionedNode>,
) -> (String, f32) {
    let anchor_node = &nodes[anchor];
    let partner = index
        .get(anchor)
        .and_then(|p| p.relationships.partner_id.as_deref())
        .filter(|pid| levels.get(*pid) == Some(&anchor_node.level) && nodes.contains_key(*pid));
    match partner {
        Some(pid) => {
            let partner_node = &nodes[pid];
            let (lo, hi) = if anchor < pid { (anchor, pid) } else { (pid, anchor) };
            (format!("{lo}|{hi}"), (anchor_node.x + partner_node.x) / 2.0)
        }
        None => (anchor.to_string(), anchor_node.x),
    }
}

#[allow(clippy::too_many_arguments)]
fn place_group(
    group: &SiblingGroup,
    index: &PersonIndex<'_>,
    widths: &HashMap<String, f32>,
    config: &LayoutConfig,
    cursor: &mut f32,
    y: f32,
    level: i32,
    nodes: &mut BTreeMap<String, PositionedNode>,
) {
    let unit_widths: Vec<f32> = group
        .units
        .iter()
        .map(|u| widths.get(&u.first).copied().unwrap_or(config.node_width))
        .collect();
    let block: f32 = unit_widths.iter().sum::<f32>()
        + config.sibling_gap * (group.units.len().saturating_sub(1)) as f32;

    let mut start = match group.parent_mid {
        Some(mid) => mid - block / 2.0,
        None => *cursor,
    };

    // Naive box-centered placement: each unit centered in its subtree slot,
    // couples straddling the slot midpoint.
    let mut placements: Vec<(String, f32)> = Vec::new();
    let mut slot = start;
    for (unit, width) in group.units.iter().zip(&unit_widths) {
        let mid = slot + width / 2.0;
        match &unit.second {
            Some(second) => {
                placements.push((unit.first.clone(), mid - config.partner_spacing / 2.0));
                placements.push((second.clone(), mid + config.partner_spacing / 2.0));
            }
            None => placements.push((unit.first.clone(), mid)),
        }
        slot += width + config.sibling_gap;
    }

    // Lineage correction: shift so the blood-relative average, not the box
    // center, sits under the parent midpoint.
    if let Some(parent_mid) = group.parent_mid {
        let blood: Vec<f32> = placements
            .iter()
            .filter(|(id, _)| has_positioned_parent(index, id, nodes))
            .map(|(_, x)| *x)
            .collect();
        if !blood.is_empty() {
            let delta = parent_mid - blood.iter().sum::<f32>() / blood.len() as f32;
            for (_, x) in &mut placements {
                *x += delta;
            }
            start += delta;
        }
    }

    // Never back up past material already placed on this level.
    if start < *cursor {
        let bump = *cursor - start;
        for (_, x) in &mut placements {
            *x += bump;
        }
        start = *cursor;
    }

    for (id, x) in placements {
        nodes.insert(
            id.clone(),
            PositionedNode {
                id,
                x,
                y,
                kind: NodeKind::Person,
                level,
            },
        );
    }
    *cursor = start + block + config.sibling_gap;
}

fn has_positioned_parent(
    index: &PersonIndex<'_>,
    id: &str,
    nodes: &BTreeMap<String, PositionedNode>,
) -> bool {
    let Some(person) = index.get(id) else {
        return false;
    };
    let rel = &person.relationships;
    [rel.father_id.as_deref(), rel.mother_id.as_deref()]
        .into_iter()
        .flatten()
        .any(|pid| nodes.contains_key(pid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Gender, Person, Relationships};
    use crate::layout::levels::assign_levels;
    use crate::layout::width::compute_subtree_widths;
    use std::collections::HashSet;

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

    fn layout_nodes(people: &[Person], start: &str) -> BTreeMap<String, PositionedNode> {
        let index = PersonIndex::new(people);
        let levels = assign_levels(&index, &HashSet::new(), start, 10);
        let grid = LevelGrid::build(&index, &levels);
        let config = LayoutConfig::default();
        let widths = compute_subtree_widths(&index, &grid, &levels, &config);
        position_nodes(&index, &grid, &levels, &widths, &config)
    }

    fn family_with_in_law() -> Vec<Person> {
        vec![
            person(
                "g1",
                Relationships {
                    partner_id: Some("g2".into()),
                    children_ids: vec!["pa".into(), "aunt".into()],
                    ..Relationships::default()
                },
            ),
            person(
                "g2",
                Relationships {
                    partner_id: Some("g1".into()),
                    children_ids: vec!["pa".into(), "aunt".into()],
                    ..Relationships::default()
                },
            ),
            person(
                "pa",
                Relationships {
                    father_id: Some("g1".into()),
                    mother_id: Some("g2".into()),
                    sibling_ids: vec!["aunt".into()],
                    partner_id: Some("ma".into()),
                    ..Relationships::default()
                },
            ),
            // In-law partner with no blood links in the network.
            person(
                "ma",
                Relationships {
                    partner_id: Some("pa".into()),
                    ..Relationships::default()
                },
            ),
            person(
                "aunt",
                Relationships {
                    father_id: Some("g1".into()),
                    mother_id: Some("g2".into()),
                    sibling_ids: vec!["pa".into()],
                    ..Relationships::default()
                },
            ),
        ]
    }

    #[test]
    fn partners_sit_exactly_partner_spacing_apart() {
        let config = LayoutConfig::default();
        let nodes = layout_nodes(&family_with_in_law(), "pa");
        assert_eq!((nodes["pa"].x - nodes["ma"].x).abs(), config.partner_spacing);
        assert_eq!((nodes["g1"].x - nodes["g2"].x).abs(), config.partner_spacing);
        assert_eq!(nodes["pa"].y, nodes["ma"].y);
    }

    #[test]
    fn blood_centers_average_to_the_parent_midpoint() {
        let nodes = layout_nodes(&family_with_in_law(), "pa");
        let parent_mid = (nodes["g1"].x + nodes["g2"].x) / 2.0;
        let blood_avg = (nodes["pa"].x + nodes["aunt"].x) / 2.0;
        assert!((blood_avg - parent_mid).abs() < 1e-3);
    }

    #[test]
    fn generations_descend_by_level_height() {
        let config = LayoutConfig::default();
        let nodes = layout_nodes(&family_with_in_law(), "pa");
        assert_eq!(nodes["pa"].y - nodes["g1"].y, config.level_height);
    }

    #[test]
    fn lone_blood_child_with_in_law_partner_stays_under_parents() {
        // Drop the aunt: pa is the only blood child, so the descent line to
        // pa must stay vertical despite the in-law widening the unit.
        let mut people = family_with_in_law();
        people.retain(|p| p.id != "aunt");
        for p in &mut people {
            p.relationships.children_ids.retain(|id| id != "aunt");
            p.relationships.sibling_ids.retain(|id| id != "aunt");
        }
        let nodes = layout_nodes(&people, "pa");
        let parent_mid = (nodes["g1"].x + nodes["g2"].x) / 2.0;
        assert!((nodes["pa"].x - parent_mid).abs() < 1e-3);
    }

    #[test]
    fn parentless_units_are_placed_by_cursor_in_order() {
        let config = LayoutConfig::default();
        let people = vec![
            person("a", Relationships::default()),
            person("b", Relationships {
                sibling_ids: vec!["a".into()],
                ..Relationships::default()
            }),
            person("c", Relationships {
                sibling_ids: vec!["a".into()],
                ..Relationships::default()
            }),
        ];
        // Make them reachable from one another.
        let mut people = people;
        people[0].relationships.sibling_ids = vec!["b".into(), "c".into()];
        let nodes = layout_nodes(&people, "a");
        assert!(nodes["a"].x < nodes["b"].x);
        assert!(nodes["b"].x < nodes["c"].x);
        assert_eq!(nodes["b"].x - nodes["a"].x, config.node_width + config.sibling_gap);
    }
}
