//! Serializable description of a styled node tree and of its computed layout.
//!
//! Keywords use the same kebab-case text as the engine (`"row-reverse"`,
//! `"space-between"`); lengths accept a number of points or a string such as
//! `"50%"` or `"auto"`.

use serde::{Deserialize, Serialize};
use trellis::{
    Align, Direction, Display, Edge, FlexDirection, Justify, NodeType, Overflow, PositionType,
    Value, Wrap,
};

/// A tree to lay out, plus the space to lay it out in.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LayoutDocument {
    /// Available width; omitted means size to content.
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default = "default_direction")]
    pub direction: Direction,
    /// Pixel density for rounding. `0` disables rounding.
    #[serde(default)]
    pub point_scale_factor: Option<f32>,
    #[serde(default)]
    pub use_web_defaults: bool,
    pub root: NodeSpec,
}

fn default_direction() -> Direction {
    Direction::Ltr
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NodeSpec {
    pub id: String,
    #[serde(default)]
    pub style: StyleMap,
    /// Makes the node a measured leaf; such a node must have no children.
    #[serde(default)]
    pub measure: Option<MeasureSpec>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

/// Style properties. Unset fields keep the engine defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleMap {
    pub direction: Option<Direction>,
    pub flex_direction: Option<FlexDirection>,
    pub justify_content: Option<Justify>,
    pub align_content: Option<Align>,
    pub align_items: Option<Align>,
    pub align_self: Option<Align>,
    pub position_type: Option<PositionType>,
    pub flex_wrap: Option<Wrap>,
    pub overflow: Option<Overflow>,
    pub display: Option<Display>,
    pub node_type: Option<NodeType>,

    pub flex: Option<f32>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub flex_basis: Option<Value>,

    pub width: Option<Value>,
    pub height: Option<Value>,
    pub min_width: Option<Value>,
    pub min_height: Option<Value>,
    pub max_width: Option<Value>,
    pub max_height: Option<Value>,
    pub aspect_ratio: Option<f32>,

    pub margin: EdgeMap,
    pub padding: EdgeMap,
    /// Points only; percentages are rejected when loading.
    pub border: EdgeMap,
    pub position: EdgeMap,
}

/// Per-edge lengths. Specific edges override `horizontal`/`vertical`, which
/// override `all`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct EdgeMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<Value>,
}

impl EdgeMap {
    /// The edges that are set, in engine edge order.
    pub fn entries(&self) -> impl Iterator<Item = (Edge, Value)> {
        [
            (Edge::Left, self.left),
            (Edge::Top, self.top),
            (Edge::Right, self.right),
            (Edge::Bottom, self.bottom),
            (Edge::Start, self.start),
            (Edge::End, self.end),
            (Edge::Horizontal, self.horizontal),
            (Edge::Vertical, self.vertical),
            (Edge::All, self.all),
        ]
        .into_iter()
        .filter_map(|(edge, value)| value.map(|value| (edge, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// Fixed intrinsic content size, as a text box or an image would report.
///
/// Under an `at-most` constraint the reported size is clamped to the
/// constraint; under `exactly` the constraint wins.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MeasureSpec {
    pub width: f32,
    pub height: f32,
    /// Distance from the top to the first baseline, for baseline alignment.
    #[serde(default)]
    pub baseline: Option<f32>,
}

/// Computed geometry of one node, relative to its parent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub id: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutResult>,
}

impl LayoutResult {
    /// Depth-first search by id.
    pub fn find(&self, id: &str) -> Option<&LayoutResult> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}
