use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::graph::PersonIndex;

/// A layout atom: a person plus their same-level partner, processed once.
#[derive(Debug, Clone)]
pub(crate) struct Unit {
    /// First member in level order; drawn on the left of the unit core.
    pub first: String,
    pub second: Option<String>,
}

impl Unit {
    pub fn members(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.first.as_str()).chain(self.second.as_deref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.first == id || self.second.as_deref() == Some(id)
    }

    pub fn core_width(&self, config: &LayoutConfig) -> f32 {
        if self.second.is_some() {
            config.partner_spacing + config.node_width
        } else {
            config.node_width
        }
    }
}

/// Fold a level's members (in snapshot order) into units. A partner joins the
/// unit only when assigned the same level; cross-level partners stay separate
/// units so generation lines hold.
pub(crate) fn units_at_level(
    index: &PersonIndex<'_>,
    members: &[String],
    level: i32,
    levels: &HashMap<String, i32>,
) -> Vec<Unit> {
    let member_set: HashSet<&str> = members.iter().map(String::as_str).collect();
    let mut consumed: HashSet<&str> = HashSet::new();
    let mut units = Vec::new();
    for id in members {
        if consumed.contains(id.as_str()) {
            continue;
        }
        consumed.insert(id.as_str());
        let partner = index
            .get(id)
            .and_then(|p| p.relationships.partner_id.as_deref())
            .filter(|pid| {
                member_set.contains(pid)
                    && !consumed.contains(pid)
                    && levels.get(*pid) == Some(&level)
            });
        if let Some(pid) = partner {
            consumed.insert(pid);
            units.push(Unit {
                first: id.clone(),
                second: Some(pid.to_string()),
            });
        } else {
            units.push(Unit {
                first: id.clone(),
                second: None,
            });
        }
    }
    units
}

/// Level map reshaped for per-generation sweeps: distinct levels in ascending
/// order, members per level in snapshot order.
#[derive(Debug, Default)]
pub(crate) struct LevelGrid {
    pub ordered_levels: Vec<i32>,
    pub members: HashMap<i32, Vec<String>>,
}

impl LevelGrid {
    pub fn build(index: &PersonIndex<'_>, levels: &HashMap<String, i32>) -> Self {
        let mut members: HashMap<i32, Vec<String>> = HashMap::new();
        for id in index.ids() {
            if let Some(&level) = levels.get(id) {
                members.entry(level).or_default().push(id.to_string());
            }
        }
        let mut ordered_levels: Vec<i32> = members.keys().copied().collect();
        ordered_levels.sort_unstable();
        Self {
            ordered_levels,
            members,
        }
    }

    pub fn min_level(&self) -> i32 {
        self.ordered_levels.first().copied().unwrap_or(0)
    }
}
