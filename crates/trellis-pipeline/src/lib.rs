//! Turns a [`LayoutDocument`] into a runnable [`LayoutTree`] and reads the
//! computed geometry back out as a [`LayoutResult`].

use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info};
use trellis::{
    Config, Direction, LayoutTree, MeasureMode, NodeId, PrintOptions, Size, Unit, Value,
};
use trellis_schema::{LayoutDocument, LayoutResult, MeasureSpec, NodeSpec, StyleMap};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate node id: {0:?}")]
    DuplicateId(String),
    #[error("Node {0:?} has a measure spec and children")]
    MeasuredWithChildren(String),
    #[error("Node {id:?}: border must be given in points, got {value}")]
    InvalidBorder { id: String, value: Value },
}

pub fn parse_document(json: &str) -> Result<LayoutDocument, PipelineError> {
    Ok(serde_json::from_str(json)?)
}

/// A document loaded into an arena, ready to lay out.
pub struct LoadedTree {
    tree: LayoutTree,
    root: NodeId,
    /// Document id of every node, indexed by arena slot.
    ids: Vec<Option<String>>,
    by_id: HashMap<String, NodeId>,
    width: f32,
    height: f32,
    direction: Direction,
}

/// Builds the arena for `document`, rejecting duplicate ids and measured
/// nodes with children before touching the tree.
pub fn load_document(document: &LayoutDocument) -> Result<LoadedTree, PipelineError> {
    let mut seen = HashSet::new();
    validate(&document.root, &mut seen)?;

    let mut config = Config::new();
    if let Some(factor) = document.point_scale_factor {
        config.set_point_scale_factor(factor);
    }
    config.set_use_web_defaults(document.use_web_defaults);

    let mut tree = LayoutTree::with_config(config);
    let mut ids = Vec::with_capacity(seen.len());
    let mut by_id = HashMap::with_capacity(seen.len());
    let root = build(&mut tree, &mut ids, &mut by_id, &document.root);

    let loaded = LoadedTree {
        tree,
        root,
        ids,
        by_id,
        width: document.width.unwrap_or(f32::NAN),
        height: document.height.unwrap_or(f32::NAN),
        direction: document.direction,
    };

    info!(nodes = loaded.tree.node_count(), "document loaded");
    Ok(loaded)
}

fn validate<'a>(spec: &'a NodeSpec, seen: &mut HashSet<&'a str>) -> Result<(), PipelineError> {
    if !seen.insert(spec.id.as_str()) {
        return Err(PipelineError::DuplicateId(spec.id.clone()));
    }
    if spec.measure.is_some() && !spec.children.is_empty() {
        return Err(PipelineError::MeasuredWithChildren(spec.id.clone()));
    }
    for (_, value) in spec.style.border.entries() {
        if value.unit != Unit::Point {
            return Err(PipelineError::InvalidBorder {
                id: spec.id.clone(),
                value,
            });
        }
    }
    spec.children
        .iter()
        .try_for_each(|child| validate(child, seen))
}

fn build(
    tree: &mut LayoutTree,
    ids: &mut Vec<Option<String>>,
    by_id: &mut HashMap<String, NodeId>,
    spec: &NodeSpec,
) -> NodeId {
    let node = tree.new_node();
    if ids.len() <= node.index() {
        ids.resize(node.index() + 1, None);
    }
    ids[node.index()] = Some(spec.id.clone());
    by_id.insert(spec.id.clone(), node);

    apply_style_map(tree, node, &spec.style);
    if let Some(measure) = spec.measure {
        attach_measure(tree, node, measure);
    }

    for child_spec in &spec.children {
        let child = build(tree, ids, by_id, child_spec);
        tree.add_child(node, child);
    }

    debug!(id = %spec.id, %node, "node built");
    node
}

impl LoadedTree {
    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut LayoutTree {
        &mut self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Arena handle of the node with document id `id`.
    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Overrides the available space and direction from the document.
    pub fn set_available(
        &mut self,
        width: Option<f32>,
        height: Option<f32>,
        direction: Option<Direction>,
    ) {
        if let Some(width) = width {
            self.width = width;
        }
        if let Some(height) = height {
            self.height = height;
        }
        if let Some(direction) = direction {
            self.direction = direction;
        }
    }

    pub fn compute(&mut self) {
        self.tree
            .calculate_layout(self.root, self.width, self.height, self.direction);
        let stats = self.tree.stats();
        info!(
            layouts = stats.layouts_computed,
            cache_hits = stats.cache_hits,
            measure_calls = stats.measure_calls,
            "layout computed"
        );
    }

    pub fn export(&self) -> LayoutResult {
        self.export_node(self.root)
    }

    fn export_node(&self, node: NodeId) -> LayoutResult {
        let layout = self.tree.layout(node);
        LayoutResult {
            id: self.ids[node.index()].clone().unwrap_or_default(),
            left: layout.left(),
            top: layout.top(),
            width: layout.width(),
            height: layout.height(),
            children: self
                .tree
                .children(node)
                .iter()
                .map(|&child| self.export_node(child))
                .collect(),
        }
    }

    /// Debug dump of the whole tree with layout and style.
    pub fn print(&self) -> String {
        self.tree.print(self.root, PrintOptions::ALL)
    }
}

fn apply_style_map(tree: &mut LayoutTree, node: NodeId, map: &StyleMap) {
    macro_rules! apply {
        ($($field:ident => $setter:ident),+ $(,)?) => {
            $(
                if let Some(value) = map.$field {
                    tree.$setter(node, value);
                }
            )+
        };
    }

    apply!(
        direction => set_direction,
        flex_direction => set_flex_direction,
        justify_content => set_justify_content,
        align_content => set_align_content,
        align_items => set_align_items,
        align_self => set_align_self,
        position_type => set_position_type,
        flex_wrap => set_flex_wrap,
        overflow => set_overflow,
        display => set_display,
        node_type => set_node_type,
        flex => set_flex,
        flex_grow => set_flex_grow,
        flex_shrink => set_flex_shrink,
        flex_basis => set_flex_basis,
        width => set_width,
        height => set_height,
        min_width => set_min_width,
        min_height => set_min_height,
        max_width => set_max_width,
        max_height => set_max_height,
        aspect_ratio => set_aspect_ratio,
    );

    for (edge, value) in map.margin.entries() {
        tree.set_margin(node, edge, value);
    }
    for (edge, value) in map.padding.entries() {
        tree.set_padding(node, edge, value);
    }
    for (edge, value) in map.border.entries() {
        tree.set_border(node, edge, value.value);
    }
    for (edge, value) in map.position.entries() {
        tree.set_position(node, edge, value);
    }
}

/// Reports the fixed content size, clamped by an `AtMost` constraint and
/// replaced by an `Exactly` one.
fn attach_measure(tree: &mut LayoutTree, node: NodeId, spec: MeasureSpec) {
    fn fit(content: f32, available: f32, mode: MeasureMode) -> f32 {
        match mode {
            MeasureMode::Exactly => available,
            MeasureMode::AtMost => content.min(available),
            MeasureMode::Undefined => content,
        }
    }

    tree.set_measure_func(
        node,
        move |width: f32, width_mode: MeasureMode, height: f32, height_mode: MeasureMode| {
            Size::new(
                fit(spec.width, width, width_mode),
                fit(spec.height, height, height_mode),
            )
        },
    );
    if let Some(baseline) = spec.baseline {
        tree.set_baseline_func(node, move |_: f32, _: f32| baseline);
    }
}
