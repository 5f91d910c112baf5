use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::graph::PersonIndex;

use super::units::{LevelGrid, Unit, units_at_level};

/// Bottom-up space requirement per unit, deepest level first. Children are
/// found by scanning the full next level for anyone whose father or mother is
/// a unit member, not by trusting cached child lists. The result is stored
/// under every member id; `subtree_width >= core_width` always, with equality
/// exactly when the unit has no positioned children.
pub(crate) fn compute_subtree_widths(
    index: &PersonIndex<'_>,
    grid: &LevelGrid,
    levels: &HashMap<String, i32>,
    config: &LayoutConfig,
) -> HashMap<String, f32> {
    let mut widths: HashMap<String, f32> = HashMap::new();
    let mut units_below: Vec<Unit> = Vec::new();

    for &level in grid.ordered_levels.iter().rev() {
        let members = grid
            .members
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let units = units_at_level(index, members, level, levels);

        for unit in &units {
            let core = unit.core_width(config);
            let children_block = children_block_width(index, unit, &units_below, &widths, config);
            let subtree = core.max(children_block);
            for member in unit.members() {
                widths.insert(member.to_string(), subtree);
            }
        }
        units_below = units;
    }

    widths
}

fn children_block_width(
    index: &PersonIndex<'_>,
    unit: &Unit,
    units_below: &[Unit],
    widths: &HashMap<String, f32>,
    config: &LayoutConfig,
) -> f32 {
    let mut total = 0.0f32;
    let mut count = 0usize;
    for child_unit in units_below {
        if !unit_has_parent_in(index, child_unit, unit) {
            continue;
        }
        total += widths.get(&child_unit.first).copied().unwrap_or(0.0);
        count += 1;
    }
    if count > 1 {
        total += config.sibling_gap * (count as f32 - 1.0);
    }
    total
}

/// True when any member of `child_unit` records a member of `parent_unit` as
/// father or mother.
pub(crate) fn unit_has_parent_in(
    index: &PersonIndex<'_>,
    child_unit: &Unit,
    parent_unit: &Unit,
) -> bool {
    for member in child_unit.members() {
        let Some(person) = index.get(member) else {
            continue;
        };
        let rel = &person.relationships;
        for parent in [rel.father_id.as_deref(), rel.mother_id.as_deref()] {
            if let Some(pid) = parent
                && parent_unit.contains(pid)
            {
                return true;
            }
        }
    }
    false
}
