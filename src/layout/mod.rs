mod edges;
mod levels;
mod position;
mod types;
mod units;
mod visibility;
mod width;

use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::graph::{PersonIndex, Snapshot};

pub use types::{EdgeKind, EdgeLayout, Layout, NodeKind, PositionedNode};
pub use visibility::hidden_in_law_relatives;

use levels::{assign_levels, resolve_start_id};
use position::position_nodes;
use units::LevelGrid;
use width::compute_subtree_widths;

/// Compute the full diagram for one viewer. Pure: same snapshot, user and
/// config always give the same layout. Unreachable or hidden people simply do
/// not appear; no input produces an error.
pub fn compute_layout(snapshot: &Snapshot, current_user_id: &str, config: &LayoutConfig) -> Layout {
    let index = PersonIndex::new(&snapshot.people);
    let hidden = hidden_in_law_relatives(&index, current_user_id);
    let Some(start_id) = resolve_start_id(&index, &hidden, current_user_id, &snapshot.tree) else {
        return Layout::default();
    };

    let levels = assign_levels(&index, &hidden, start_id, config.level_repair_passes);
    let grid = LevelGrid::build(&index, &levels);
    let widths = compute_subtree_widths(&index, &grid, &levels, config);
    let mut nodes = position_nodes(&index, &grid, &levels, &widths, config);
    let mut edges = edges::build_edges(&snapshot.families, &mut nodes, config);

    normalize(&mut nodes, &mut edges, config)
}

/// Shift everything so the leftmost/topmost node center sits at half a node
/// from the origin, and derive the canvas size from the extremes.
fn normalize(
    nodes: &mut BTreeMap<String, PositionedNode>,
    edges: &mut Vec<EdgeLayout>,
    config: &LayoutConfig,
) -> Layout {
    if nodes.is_empty() {
        return Layout::default();
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for node in nodes.values() {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x);
        max_y = max_y.max(node.y);
    }

    let dx = config.node_width / 2.0 - min_x;
    let dy = config.node_height / 2.0 - min_y;
    for node in nodes.values_mut() {
        node.x += dx;
        node.y += dy;
    }
    for edge in edges.iter_mut() {
        for point in &mut edge.points {
            point.0 += dx;
            point.1 += dy;
        }
    }

    Layout {
        nodes: std::mem::take(nodes),
        edges: std::mem::take(edges),
        width: max_x - min_x + config.node_width,
        height: max_y - min_y + config.node_height,
    }
}
