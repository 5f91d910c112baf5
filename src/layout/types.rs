use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Person,
    /// Zero-size synthetic node at a couple's visual midpoint; routes child
    /// edges only, carries no person data.
    Junction,
}

/// A placed node. `x`/`y` are the node's center; person cards take
/// `node_width` x `node_height` around it, junctions are zero-size.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub kind: NodeKind,
    /// Generation offset from the traversal start (0 = start's generation).
    pub level: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Horizontal line between two partners.
    Marriage,
    /// Parent (junction or single parent) down to a child.
    Descent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub points: Vec<(f32, f32)>,
    /// Cosmetic lineage-side color index for the rendering surface.
    pub hue: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub nodes: BTreeMap<String, PositionedNode>,
    pub edges: Vec<EdgeLayout>,
    pub width: f32,
    pub height: f32,
}
