use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::graph::FamilyUnit;

use super::types::{EdgeKind, EdgeLayout, NodeKind, PositionedNode};

fn hue_for(level: i32) -> usize {
    level.rem_euclid(6) as usize
}

/// Synthesize marriage edges, junction nodes and parent->child edges from the
/// family records. Junction ids derive from the sorted partner pair, so
/// duplicate family records collapse onto one junction and one marriage edge.
/// Each child keeps exactly one incoming edge: a junction source (priority 2)
/// beats a single visible parent (priority 1), and ties keep the first record.
pub(crate) fn build_edges(
    families: &[FamilyUnit],
    nodes: &mut BTreeMap<String, PositionedNode>,
    config: &LayoutConfig,
) -> Vec<EdgeLayout> {
    let mut marriages: Vec<EdgeLayout> = Vec::new();
    let mut junctions: Vec<PositionedNode> = Vec::new();
    let mut seen_couples: HashSet<String> = HashSet::new();
    let mut best: HashMap<String, (EdgeLayout, u8)> = HashMap::new();

    for family in families {
        let positioned: Vec<(String, f32, f32, i32)> = family
            .partner_ids
            .iter()
            .filter_map(|id| nodes.get(id))
            .filter(|n| n.kind == NodeKind::Person)
            .map(|n| (n.id.clone(), n.x, n.y, n.level))
            .collect();

        let (source_id, sx, sy, priority) = match positioned.as_slice() {
            [a, b] => {
                let (lo, hi) = if a.0 <= b.0 { (a, b) } else { (b, a) };
                let junction_id = format!("__junction_{}_{}__", lo.0, hi.0);
                let jx = (lo.1 + hi.1) / 2.0;
                let jy = (lo.2 + hi.2) / 2.0;
                if seen_couples.insert(junction_id.clone()) {
                    marriages.push(EdgeLayout {
                        from: lo.0.clone(),
                        to: hi.0.clone(),
                        kind: EdgeKind::Marriage,
                        points: vec![(lo.1, lo.2), (hi.1, hi.2)],
                        hue: hue_for(lo.3),
                    });
                    junctions.push(PositionedNode {
                        id: junction_id.clone(),
                        x: jx,
                        y: jy,
                        kind: NodeKind::Junction,
                        level: lo.3,
                    });
                }
                (junction_id, jx, jy, 2u8)
            }
            [only] => (only.0.clone(), only.1, only.2, 1u8),
            _ => continue,
        };

        for child_id in &family.children_ids {
            let Some(child) = nodes.get(child_id) else {
                continue;
            };
            if child.kind != NodeKind::Person {
                continue;
            }
            let elbow_y = (sy + child.y) / 2.0;
            let edge = EdgeLayout {
                from: source_id.clone(),
                to: child.id.clone(),
                kind: EdgeKind::Descent,
                points: vec![(sx, sy), (child.x, elbow_y), (child.x, child.y)],
                hue: hue_for(child.level),
            };
            let kept = best.get(child_id).map(|(_, p)| *p).unwrap_or(0);
            if priority > kept {
                best.insert(child_id.clone(), (edge, priority));
            }
        }
    }

    // When both halves of a couple have their own parent lines, raise one
    // elbow so the connectors do not overlap. Cosmetic.
    for marriage in &marriages {
        if best.contains_key(&marriage.from) && best.contains_key(&marriage.to) {
            let from_x = nodes.get(&marriage.from).map(|n| n.x).unwrap_or(0.0);
            let to_x = nodes.get(&marriage.to).map(|n| n.x).unwrap_or(0.0);
            let right = if from_x > to_x {
                &marriage.from
            } else {
                &marriage.to
            };
            if let Some((edge, _)) = best.get_mut(right) {
                edge.points[1].1 -= config.connector_offset;
            }
        }
    }

    for junction in junctions {
        nodes.insert(junction.id.clone(), junction);
    }

    let mut edges = marriages;
    let mut descents: Vec<(String, EdgeLayout)> = best
        .into_iter()
        .map(|(child, (edge, _))| (child, edge))
        .collect();
    descents.sort_by(|a, b| a.0.cmp(&b.0));
    edges.extend(descents.into_iter().map(|(_, edge)| edge));
    edges
}
