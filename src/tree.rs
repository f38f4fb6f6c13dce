//! # Tree Module
//!
//! The arena that owns every node and config.
//!
//! ## Responsibilities
//! - **Storage**: nodes live in a `Vec<Option<Node>>` and are addressed by
//!   [`NodeId`]. Freed slots are recycled.
//! - **Hierarchy**: insertion, removal and teardown keep parent and child
//!   links consistent.
//! - **Invalidation**: every observable change marks the node and its
//!   ancestors dirty.
//! - **Style access**: one getter and setter per style property.
//!
//! Broken caller contracts (a child that already has a parent, children on a
//! measured node, a stale id) are reported through the node's
//! [`crate::Logger`] at `Fatal` level and panic.

use crate::algorithm::PassState;
use crate::config::{Config, ConfigId};
use crate::enums::{
    Align, Dimension, Direction, Display, Edge, FlexDirection, Justify, NodeType, Overflow,
    PositionType, Wrap,
};
use crate::layout::Layout;
use crate::node::{BaselineFunc, MeasureFunc, Node, NodeContent};
use crate::style::{Style, StyleEq};
use crate::value::{Value, UNDEFINED};
use std::fmt;

const MISSING_NODE: &str = "Node does not exist in this tree";
const MISSING_CONFIG: &str = "Config does not exist in this tree";
const MULTI_EDGE: &str = "Cannot get layout properties of multi-edge shorthands";
const MANUAL_DIRTY: &str =
    "Only leaf nodes with custom measure functions should manually mark themselves as dirty";

/// Handle to a node stored in a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Counters for the most recent [`LayoutTree::calculate_layout`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStats {
    /// Runs of the full flex algorithm, measure-only runs included.
    pub layouts_computed: usize,
    /// Requests answered from a node's cache.
    pub cache_hits: usize,
    /// Invocations of measure callbacks.
    pub measure_calls: usize,
    /// Deepest nesting reached.
    pub max_depth: usize,
}

/// Generates a getter and a dirtying setter per style field.
macro_rules! style_properties {
    ($($(#[$meta:meta])* $getter:ident, $setter:ident: $ty:ty => ($($place:tt)+);)+) => {
        $(
            $(#[$meta])*
            pub fn $getter(&self, node: NodeId) -> $ty {
                self.node(node).style.$($place)+
            }

            pub fn $setter(&mut self, node: NodeId, value: $ty) {
                let style = &mut self.node_mut(node).style;
                if !StyleEq::same(&style.$($place)+, &value) {
                    style.$($place)+ = value;
                    self.mark_dirty_internal(node);
                }
            }
        )+
    };
}

/// Generates edge-indexed getters and setters for the box properties.
macro_rules! edge_properties {
    ($($getter:ident, $setter:ident => $field:ident;)+) => {
        $(
            pub fn $getter(&self, node: NodeId, edge: Edge) -> Value {
                self.node(node).style.$field[edge]
            }

            pub fn $setter(&mut self, node: NodeId, edge: Edge, value: Value) {
                let style = &mut self.node_mut(node).style;
                if !StyleEq::same(&style.$field[edge], &value) {
                    style.$field[edge] = value;
                    self.mark_dirty_internal(node);
                }
            }
        )+
    };
}

/// Owns nodes and configs and runs layout over them.
pub struct LayoutTree {
    nodes: Vec<Option<Node>>,
    free_indices: Vec<usize>,
    default_config: Config,
    /// `ConfigId(n)` lives at `configs[n - 1]`.
    configs: Vec<Option<Config>>,
    free_configs: Vec<usize>,
    live_nodes: usize,
    pub(crate) generation: u32,
    pub(crate) pass: PassState,
    pub(crate) stats: LayoutStats,
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutTree")
            .field("nodes", &self.live_nodes)
            .field("configs", &self.config_count())
            .field("generation", &self.generation)
            .field("stats", &self.stats)
            .finish()
    }
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// A tree whose default config is `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: Vec::new(),
            free_indices: Vec::new(),
            default_config: config,
            configs: Vec::new(),
            free_configs: Vec::new(),
            live_nodes: 0,
            generation: 0,
            pass: PassState::default(),
            stats: LayoutStats::default(),
        }
    }

    // --- storage ---------------------------------------------------------

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.0) {
            Some(Some(node)) => node,
            _ => self.default_config.fatal(Some(id), MISSING_NODE),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => self.default_config.fatal(Some(id), MISSING_NODE),
        }
    }

    /// Reports a contract violation against `node` through its config.
    pub(crate) fn fatal(&self, node: NodeId, message: &str) -> ! {
        let config = self
            .nodes
            .get(node.0)
            .and_then(Option::as_ref)
            .and_then(|n| self.try_config(n.config))
            .unwrap_or(&self.default_config);
        config.fatal(Some(node), message)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node.0), Some(Some(_)))
    }

    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    /// Live nodes in this tree.
    pub fn node_count(&self) -> usize {
        self.live_nodes
    }

    /// Last layout pass counters.
    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    // --- lifecycle -------------------------------------------------------

    pub fn new_node(&mut self) -> NodeId {
        self.new_node_with_config(ConfigId::DEFAULT)
    }

    /// Creates a detached node with default style, or web defaults if
    /// `config` asks for them.
    pub fn new_node_with_config(&mut self, config: ConfigId) -> NodeId {
        let web = self.config(config).use_web_defaults;
        let node = Node::new(config, web);
        self.live_nodes += 1;
        if let Some(index) = self.free_indices.pop() {
            self.nodes[index] = Some(node);
            NodeId(index)
        } else {
            self.nodes.push(Some(node));
            NodeId(self.nodes.len() - 1)
        }
    }

    /// Frees `node`. Its parent loses it and its children become roots.
    pub fn free(&mut self, node: NodeId) {
        if let Some(parent) = self.node(node).parent {
            self.remove_child(parent, node);
        }

        let children = self.node(node).children().to_vec();
        for child in children {
            self.node_mut(child).parent = None;
        }

        self.nodes[node.0] = None;
        self.free_indices.push(node.0);
        self.live_nodes -= 1;
        tracing::trace!(node = %node, "freed node");
    }

    /// Frees `node` and its entire subtree.
    pub fn free_recursive(&mut self, node: NodeId) {
        while let Some(&child) = self.node(node).children().first() {
            self.remove_child(node, child);
            self.free_recursive(child);
        }
        self.free(node);
    }

    /// Restores a detached, childless node to its freshly created state.
    pub fn reset(&mut self, node: NodeId) {
        if !self.node(node).children().is_empty() {
            self.fatal(
                node,
                "Cannot reset a node which still has children attached",
            );
        }
        if self.node(node).parent.is_some() {
            self.fatal(node, "Cannot reset a node still attached to a parent");
        }

        let config = self.node(node).config;
        let web = self.config(config).use_web_defaults;
        *self.node_mut(node) = Node::new(config, web);
    }

    // --- hierarchy -------------------------------------------------------

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).children()
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.node(node).children().len()
    }

    pub fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.node(node).children().get(index).copied()
    }

    /// Unchecked child lookup for the algorithm's index loops.
    pub(crate) fn nth_child(&self, node: NodeId, index: usize) -> NodeId {
        self.node(node).children()[index]
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.child_count(parent);
        self.insert_child(parent, child, index);
    }

    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) {
        if self.node(child).parent.is_some() {
            self.fatal(
                child,
                "Child already has a parent, it must be removed first.",
            );
        }
        if self.node(parent).has_measure_func() {
            self.fatal(
                parent,
                "Cannot add child: Nodes with measure functions cannot have children.",
            );
        }

        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                self.fatal(
                    child,
                    "Cannot add child: the child is an ancestor of the parent.",
                );
            }
            ancestor = self.node(id).parent;
        }

        match &mut self.node_mut(parent).content {
            NodeContent::Children(children) if index <= children.len() => {
                children.insert(index, child)
            }
            _ => self.fatal(parent, "Child index out of range"),
        }
        self.node_mut(child).parent = Some(parent);
        self.mark_dirty_internal(parent);
    }

    /// Detaches `child` from `parent`. The child's layout is discarded.
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let removed = match &mut self.node_mut(parent).content {
            NodeContent::Children(children) => match children.iter().position(|&c| c == child) {
                Some(index) => {
                    children.remove(index);
                    true
                }
                None => false,
            },
            NodeContent::Measured(_) => false,
        };

        if removed {
            let node = self.node_mut(child);
            node.reset_layout();
            node.parent = None;
            self.mark_dirty_internal(parent);
        }
    }

    pub fn remove_all_children(&mut self, parent: NodeId) {
        let children = match &mut self.node_mut(parent).content {
            NodeContent::Children(children) => std::mem::take(children),
            NodeContent::Measured(_) => return,
        };
        if children.is_empty() {
            return;
        }

        for child in children {
            let node = self.node_mut(child);
            node.reset_layout();
            node.parent = None;
        }
        self.mark_dirty_internal(parent);
    }

    // --- dirtiness -------------------------------------------------------

    /// Marks `node` and its ancestors dirty, stopping at the first ancestor
    /// that already is.
    pub(crate) fn mark_dirty_internal(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let entry = self.node_mut(id);
            if entry.is_dirty {
                break;
            }
            entry.is_dirty = true;
            entry.layout.computed_flex_basis = UNDEFINED;
            if let Some(dirtied) = entry.dirtied.as_mut() {
                dirtied(id);
            }
            current = entry.parent;
        }
    }

    /// Invalidates a measured leaf whose content changed.
    pub fn mark_dirty(&mut self, node: NodeId) {
        if !self.node(node).has_measure_func() {
            self.fatal(node, MANUAL_DIRTY);
        }
        self.mark_dirty_internal(node);
    }

    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.node(node).is_dirty
    }

    pub fn has_new_layout(&self, node: NodeId) -> bool {
        self.node(node).has_new_layout
    }

    /// Hosts clear the flag once they have consumed a new layout.
    pub fn set_has_new_layout(&mut self, node: NodeId, has_new_layout: bool) {
        self.node_mut(node).has_new_layout = has_new_layout;
    }

    // --- callbacks -------------------------------------------------------

    /// Turns `node` into a measured leaf. The node must have no children.
    pub fn set_measure_func(&mut self, node: NodeId, measure: impl MeasureFunc + 'static) {
        if !self.node(node).children().is_empty() {
            self.fatal(
                node,
                "Cannot set measure function: Nodes with measure functions cannot have children.",
            );
        }
        let entry = self.node_mut(node);
        entry.content = NodeContent::Measured(Box::new(measure));
        entry.node_type = NodeType::Text;
        self.mark_dirty_internal(node);
    }

    pub fn unset_measure_func(&mut self, node: NodeId) {
        let entry = self.node_mut(node);
        if !entry.has_measure_func() {
            return;
        }
        entry.content = NodeContent::default();
        entry.node_type = NodeType::Default;
        self.mark_dirty_internal(node);
    }

    pub fn has_measure_func(&self, node: NodeId) -> bool {
        self.node(node).has_measure_func()
    }

    pub fn set_baseline_func(&mut self, node: NodeId, baseline: impl BaselineFunc + 'static) {
        self.node_mut(node).baseline = Some(Box::new(baseline));
        self.mark_dirty_internal(node);
    }

    pub fn unset_baseline_func(&mut self, node: NodeId) {
        if self.node_mut(node).baseline.take().is_some() {
            self.mark_dirty_internal(node);
        }
    }

    pub fn has_baseline_func(&self, node: NodeId) -> bool {
        self.node(node).has_baseline_func()
    }

    /// Called with the node's id whenever it goes from clean to dirty.
    pub fn set_dirtied_func(&mut self, node: NodeId, dirtied: impl FnMut(NodeId) + 'static) {
        self.node_mut(node).dirtied = Some(Box::new(dirtied));
    }

    pub fn unset_dirtied_func(&mut self, node: NodeId) {
        self.node_mut(node).dirtied = None;
    }

    pub fn node_type(&self, node: NodeId) -> NodeType {
        self.node(node).node_type
    }

    pub fn set_node_type(&mut self, node: NodeId, node_type: NodeType) {
        self.node_mut(node).node_type = node_type;
    }

    // --- style -----------------------------------------------------------

    pub fn style(&self, node: NodeId) -> &Style {
        &self.node(node).style
    }

    /// Replaces the whole style; dirties the node only if it changed.
    pub fn set_style(&mut self, node: NodeId, style: Style) {
        self.update_style(node, |current| *current = style);
    }

    /// Edits the style in place; dirties the node only if it changed.
    pub fn update_style(&mut self, node: NodeId, update: impl FnOnce(&mut Style)) {
        let entry = self.node_mut(node);
        let before = entry.style;
        update(&mut entry.style);
        if !entry.style.same(&before) {
            self.mark_dirty_internal(node);
        }
    }

    pub fn copy_style(&mut self, dst: NodeId, src: NodeId) {
        let style = self.node(src).style;
        self.set_style(dst, style);
    }

    style_properties! {
        direction, set_direction: Direction => (direction);
        flex_direction, set_flex_direction: FlexDirection => (flex_direction);
        justify_content, set_justify_content: Justify => (justify_content);
        align_content, set_align_content: Align => (align_content);
        align_items, set_align_items: Align => (align_items);
        align_self, set_align_self: Align => (align_self);
        position_type, set_position_type: PositionType => (position_type);
        flex_wrap, set_flex_wrap: Wrap => (flex_wrap);
        overflow, set_overflow: Overflow => (overflow);
        display, set_display: Display => (display);
        /// The raw `flex` shorthand; undefined when unset.
        flex, set_flex: f32 => (flex);
        flex_basis, set_flex_basis: Value => (flex_basis);
        width, set_width: Value => (dimensions[Dimension::Width.index()]);
        height, set_height: Value => (dimensions[Dimension::Height.index()]);
        min_width, set_min_width: Value => (min_dimensions[Dimension::Width.index()]);
        min_height, set_min_height: Value => (min_dimensions[Dimension::Height.index()]);
        max_width, set_max_width: Value => (max_dimensions[Dimension::Width.index()]);
        max_height, set_max_height: Value => (max_dimensions[Dimension::Height.index()]);
        /// Width divided by height; undefined when unset.
        aspect_ratio, set_aspect_ratio: f32 => (aspect_ratio);
    }

    edge_properties! {
        margin, set_margin => margin;
        padding, set_padding => padding;
        position, set_position => position;
    }

    /// Effective grow factor; `0` when unset.
    pub fn flex_grow(&self, node: NodeId) -> f32 {
        self.node(node).style.flex_grow_or_default()
    }

    pub fn set_flex_grow(&mut self, node: NodeId, value: f32) {
        let style = &mut self.node_mut(node).style;
        if !StyleEq::same(&style.flex_grow, &value) {
            style.flex_grow = value;
            self.mark_dirty_internal(node);
        }
    }

    /// Effective shrink factor; the config's default when unset.
    pub fn flex_shrink(&self, node: NodeId) -> f32 {
        let web = self.web_defaults(node);
        self.node(node).style.flex_shrink_or_default(web)
    }

    pub fn set_flex_shrink(&mut self, node: NodeId, value: f32) {
        let style = &mut self.node_mut(node).style;
        if !StyleEq::same(&style.flex_shrink, &value) {
            style.flex_shrink = value;
            self.mark_dirty_internal(node);
        }
    }

    pub fn border(&self, node: NodeId, edge: Edge) -> f32 {
        self.node(node).style.border[edge].resolve(0.0)
    }

    /// Borders are points only.
    pub fn set_border(&mut self, node: NodeId, edge: Edge, value: f32) {
        let value = Value::point(value);
        let style = &mut self.node_mut(node).style;
        if !StyleEq::same(&style.border[edge], &value) {
            style.border[edge] = value;
            self.mark_dirty_internal(node);
        }
    }

    // --- computed layout -------------------------------------------------

    pub fn layout(&self, node: NodeId) -> &Layout {
        &self.node(node).layout
    }

    pub fn layout_margin(&self, node: NodeId, edge: Edge) -> f32 {
        let layout = &self.node(node).layout;
        layout
            .resolved_edge(&layout.margin, edge)
            .unwrap_or_else(|| self.fatal(node, MULTI_EDGE))
    }

    pub fn layout_border(&self, node: NodeId, edge: Edge) -> f32 {
        let layout = &self.node(node).layout;
        layout
            .resolved_edge(&layout.border, edge)
            .unwrap_or_else(|| self.fatal(node, MULTI_EDGE))
    }

    pub fn layout_padding(&self, node: NodeId, edge: Edge) -> f32 {
        let layout = &self.node(node).layout;
        layout
            .resolved_edge(&layout.padding, edge)
            .unwrap_or_else(|| self.fatal(node, MULTI_EDGE))
    }

    // --- configs ---------------------------------------------------------

    fn try_config(&self, id: ConfigId) -> Option<&Config> {
        if id == ConfigId::DEFAULT {
            return Some(&self.default_config);
        }
        self.configs.get(id.0 - 1).and_then(Option::as_ref)
    }

    pub fn config(&self, id: ConfigId) -> &Config {
        match self.try_config(id) {
            Some(config) => config,
            None => self.default_config.fatal(None, MISSING_CONFIG),
        }
    }

    pub fn config_mut(&mut self, id: ConfigId) -> &mut Config {
        if id == ConfigId::DEFAULT {
            return &mut self.default_config;
        }
        match self.configs.get_mut(id.0 - 1) {
            Some(Some(config)) => config,
            _ => self.default_config.fatal(None, MISSING_CONFIG),
        }
    }

    pub(crate) fn node_config(&self, node: NodeId) -> &Config {
        self.config(self.node(node).config)
    }

    pub(crate) fn web_defaults(&self, node: NodeId) -> bool {
        self.node_config(node).use_web_defaults
    }

    pub fn new_config(&mut self, config: Config) -> ConfigId {
        if let Some(slot) = self.free_configs.pop() {
            self.configs[slot] = Some(config);
            ConfigId(slot + 1)
        } else {
            self.configs.push(Some(config));
            ConfigId(self.configs.len())
        }
    }

    /// Overwrites `dest` with a copy of `src`.
    pub fn copy_config(&mut self, dest: ConfigId, src: ConfigId) {
        let copy = self.config(src).clone();
        *self.config_mut(dest) = copy;
    }

    /// Removes a config no live node refers to.
    pub fn remove_config(&mut self, id: ConfigId) {
        let default = &self.default_config;
        if id == ConfigId::DEFAULT {
            default.fatal(None, "The default config cannot be removed");
        }
        if self.try_config(id).is_none() {
            default.fatal(None, MISSING_CONFIG);
        }
        if self.nodes.iter().flatten().any(|node| node.config == id) {
            default.fatal(None, "Cannot remove a config that nodes still use");
        }
        self.configs[id.0 - 1] = None;
        self.free_configs.push(id.0 - 1);
    }

    /// Live configs, the default one included.
    pub fn config_count(&self) -> usize {
        1 + self.configs.iter().flatten().count()
    }

    pub fn set_node_config(&mut self, node: NodeId, config: ConfigId) {
        if self.try_config(config).is_none() {
            self.fatal(node, MISSING_CONFIG);
        }
        let entry = self.node_mut(node);
        if entry.config != config {
            entry.config = config;
            self.mark_dirty_internal(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::MeasureMode;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_free_slots_are_recycled() {
        let mut tree = LayoutTree::new();
        let a = tree.new_node();
        let b = tree.new_node();
        assert_eq!(tree.node_count(), 2);

        tree.free(a);
        assert_eq!(tree.node_count(), 1);
        assert!(!tree.contains(a));

        let c = tree.new_node();
        assert_eq!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn test_insert_and_remove_children() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let first = tree.new_node();
        let second = tree.new_node();

        tree.add_child(root, second);
        tree.insert_child(root, first, 0);
        assert_eq!(tree.children(root), &[first, second]);
        assert_eq!(tree.parent(first), Some(root));
        assert_eq!(tree.child(root, 5), None);

        tree.remove_child(root, first);
        assert_eq!(tree.children(root), &[second]);
        assert_eq!(tree.parent(first), None);

        tree.remove_all_children(root);
        assert_eq!(tree.child_count(root), 0);
        assert_eq!(tree.parent(second), None);
    }

    #[test]
    fn test_free_orphans_children_and_detaches_from_parent() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let middle = tree.new_node();
        let leaf = tree.new_node();
        tree.add_child(root, middle);
        tree.add_child(middle, leaf);

        tree.free(middle);
        assert_eq!(tree.child_count(root), 0);
        assert_eq!(tree.parent(leaf), None);
    }

    #[test]
    fn test_free_recursive_releases_subtree() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        for _ in 0..3 {
            let child = tree.new_node();
            tree.add_child(root, child);
            let grandchild = tree.new_node();
            tree.add_child(child, grandchild);
        }
        assert_eq!(tree.node_count(), 7);

        tree.free_recursive(root);
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_setter_dirties_only_on_change() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let child = tree.new_node();
        tree.add_child(root, child);
        tree.calculate_layout(root, 100.0, 100.0, Direction::Ltr);
        assert!(!tree.is_dirty(root));

        tree.set_width(child, Value::AUTO);
        tree.set_flex(child, f32::NAN);
        tree.set_margin(child, Edge::Left, Value::UNDEFINED);
        assert!(!tree.is_dirty(child));
        assert!(!tree.is_dirty(root));

        tree.set_width(child, Value::point(20.0));
        assert!(tree.is_dirty(child));
        assert!(tree.is_dirty(root));
    }

    #[test]
    fn test_update_style_dirties_only_on_change() {
        let mut tree = LayoutTree::new();
        let node = tree.new_node();
        tree.calculate_layout(node, 10.0, 10.0, Direction::Ltr);

        tree.update_style(node, |style| style.flex_wrap = Wrap::NoWrap);
        assert!(!tree.is_dirty(node));

        tree.update_style(node, |style| style.flex_wrap = Wrap::Wrap);
        assert!(tree.is_dirty(node));
    }

    #[test]
    fn test_tiny_changes_dirty_through_every_setter() {
        let mut tree = LayoutTree::new();
        let by_property = tree.new_node();
        let by_style = tree.new_node();
        for node in [by_property, by_style] {
            tree.set_width(node, Value::point(10.0));
            tree.set_flex_grow(node, 1.0);
            tree.calculate_layout(node, 100.0, 100.0, Direction::Ltr);
            assert!(!tree.is_dirty(node));
        }

        tree.set_width(by_property, Value::point(10.00001));
        tree.update_style(by_style, |style| {
            style.dimensions[Dimension::Width.index()] = Value::point(10.00001)
        });
        assert!(tree.is_dirty(by_property));
        assert!(tree.is_dirty(by_style));

        tree.calculate_layout(by_property, 100.0, 100.0, Direction::Ltr);
        tree.calculate_layout(by_style, 100.0, 100.0, Direction::Ltr);
        tree.set_flex_grow(by_property, 1.00001);
        tree.update_style(by_style, |style| style.flex_grow = 1.00001);
        assert!(tree.is_dirty(by_property));
        assert!(tree.is_dirty(by_style));
    }

    #[test]
    fn test_copy_style() {
        let mut tree = LayoutTree::new();
        let src = tree.new_node();
        let dst = tree.new_node();
        tree.set_flex_direction(src, FlexDirection::Row);
        tree.set_padding(src, Edge::All, Value::point(4.0));

        tree.copy_style(dst, src);
        assert_eq!(tree.style(dst), tree.style(src));
        assert!(tree.is_dirty(dst));
    }

    #[test]
    fn test_dirtied_callback_fires_on_transition() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();
        tree.set_dirtied_func(root, move |id| seen.borrow_mut().push(id));

        tree.set_height(root, Value::point(10.0));
        tree.set_height(root, Value::point(20.0));
        assert_eq!(*calls.borrow(), vec![root]);
    }

    #[test]
    fn test_web_defaults_config() {
        let mut tree = LayoutTree::new();
        let mut config = Config::default();
        config.set_use_web_defaults(true);
        let web = tree.new_config(config);

        let node = tree.new_node_with_config(web);
        assert_eq!(tree.flex_direction(node), FlexDirection::Row);
        assert_eq!(tree.align_content(node), Align::Stretch);
        assert_eq!(tree.flex_shrink(node), 1.0);

        let plain = tree.new_node();
        assert_eq!(tree.flex_direction(plain), FlexDirection::Column);
        assert_eq!(tree.flex_shrink(plain), 0.0);
    }

    #[test]
    fn test_config_lifecycle() {
        let mut tree = LayoutTree::new();
        let mut config = Config::default();
        config.set_point_scale_factor(3.0);
        let id = tree.new_config(config);
        assert_eq!(tree.config_count(), 2);

        let copy = tree.new_config(Config::default());
        tree.copy_config(copy, id);
        assert_eq!(tree.config(copy).point_scale_factor(), 3.0);

        tree.remove_config(id);
        tree.remove_config(copy);
        assert_eq!(tree.config_count(), 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut tree = LayoutTree::new();
        let node = tree.new_node();
        tree.set_flex_grow(node, 2.0);
        tree.set_measure_func(node, |_: f32, _: MeasureMode, _: f32, _: MeasureMode| {
            crate::Size::new(1.0, 1.0)
        });

        tree.reset(node);
        assert_eq!(tree.flex_grow(node), 0.0);
        assert!(!tree.has_measure_func(node));
        assert_eq!(tree.node_type(node), NodeType::Default);
    }

    #[test]
    #[should_panic(expected = "Child already has a parent")]
    fn test_insert_parented_child_is_fatal() {
        let mut tree = LayoutTree::new();
        let a = tree.new_node();
        let b = tree.new_node();
        let child = tree.new_node();
        tree.add_child(a, child);
        tree.add_child(b, child);
    }

    #[test]
    #[should_panic(expected = "Nodes with measure functions cannot have children")]
    fn test_children_on_measured_node_is_fatal() {
        let mut tree = LayoutTree::new();
        let leaf = tree.new_node();
        let child = tree.new_node();
        tree.set_measure_func(leaf, |_: f32, _: MeasureMode, _: f32, _: MeasureMode| {
            crate::Size::ZERO
        });
        tree.add_child(leaf, child);
    }

    #[test]
    #[should_panic(expected = "ancestor")]
    fn test_cycles_are_fatal() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let child = tree.new_node();
        tree.add_child(root, child);
        tree.add_child(child, root);
    }

    #[test]
    #[should_panic(expected = "still attached to a parent")]
    fn test_reset_attached_node_is_fatal() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let child = tree.new_node();
        tree.add_child(root, child);
        tree.reset(child);
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn test_stale_id_is_fatal() {
        let mut tree = LayoutTree::new();
        let node = tree.new_node();
        tree.free(node);
        tree.width(node);
    }
}
