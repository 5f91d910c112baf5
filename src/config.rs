use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal footprint of a person card.
    pub node_width: f32,
    /// Vertical footprint of a person card.
    pub node_height: f32,
    /// Center-to-center distance between same-level partners.
    pub partner_spacing: f32,
    /// Gap between adjacent units on the same level. Also used between
    /// sibling groups so nested subtree slots stay aligned.
    pub sibling_gap: f32,
    /// Vertical distance between generations.
    pub level_height: f32,
    /// Cosmetic vertical offset separating the connector from a partner's own
    /// parents when both members of a couple have parent lines.
    pub connector_offset: f32,
    /// Iteration cap for the parent/child level repair pass.
    pub level_repair_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 150.0,
            partner_spacing: 160.0,
            sibling_gap: 40.0,
            level_height: 220.0,
            connector_offset: 12.0,
            level_repair_passes: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Pretty-print the layout dump JSON.
    pub pretty: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub dump: DumpConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    layout: Option<PartialLayoutConfig>,
    dump: Option<DumpConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PartialLayoutConfig {
    node_width: Option<f32>,
    node_height: Option<f32>,
    partner_spacing: Option<f32>,
    sibling_gap: Option<f32>,
    level_height: Option<f32>,
    connector_offset: Option<f32>,
    level_repair_passes: Option<usize>,
}

/// Layer an optional JSON5 config file over the defaults. An absent file or
/// absent fields keep their defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.node_width {
            target.node_width = v;
        }
        if let Some(v) = layout.node_height {
            target.node_height = v;
        }
        if let Some(v) = layout.partner_spacing {
            target.partner_spacing = v;
        }
        if let Some(v) = layout.sibling_gap {
            target.sibling_gap = v;
        }
        if let Some(v) = layout.level_height {
            target.level_height = v;
        }
        if let Some(v) = layout.connector_offset {
            target.connector_offset = v;
        }
        if let Some(v) = layout.level_repair_passes {
            target.level_repair_passes = v;
        }
    }
    if let Some(dump) = parsed.dump {
        config.dump = dump;
    }

    Ok(config)
}
