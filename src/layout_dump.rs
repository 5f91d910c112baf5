use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::layout::{EdgeKind, Layout, NodeKind};

/// Serialized mirror of [`Layout`] for the JSON output surface. Kept separate
/// so the in-memory types stay free of serialization concerns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
    pub level: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub kind: &'static str,
    pub points: Vec<[f32; 2]>,
    pub hue: usize,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .values()
            .map(|n| NodeDump {
                id: n.id.clone(),
                kind: match n.kind {
                    NodeKind::Person => "person",
                    NodeKind::Junction => "junction",
                },
                x: n.x,
                y: n.y,
                level: n.level,
            })
            .collect();
        let edges = layout
            .edges
            .iter()
            .map(|e| EdgeDump {
                from: e.from.clone(),
                to: e.to.clone(),
                kind: match e.kind {
                    EdgeKind::Marriage => "marriage",
                    EdgeKind::Descent => "descent",
                },
                points: e.points.iter().map(|&(x, y)| [x, y]).collect(),
                hue: e.hue,
            })
            .collect();
        Self {
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
        }
    }

    pub fn write_to<W: Write>(&self, writer: W, pretty: bool) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Dump a layout as JSON to `path`, or to stdout when no path is given.
pub fn write_layout_dump(layout: &Layout, path: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            dump.write_to(file, pretty)
        }
        None => dump.write_to(io::stdout().lock(), pretty),
    }
}
