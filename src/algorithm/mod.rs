//! # Algorithm Module
//!
//! Flexbox resolution over a [`LayoutTree`].
//!
//! ## Responsibilities
//! - **Entry point**: [`LayoutTree::calculate_layout`] sizes the root from its
//!   style and the available space, then rounds the result.
//! - **Memoization**: every recursive request goes through
//!   `layout_node`, which answers from the node's cache when the node is clean
//!   and the constraints match a previous answer.
//! - **Flex passes**: `flexbox` holds the main algorithm, `basis` the
//!   hypothetical main size of items, `leaf` the terminal cases and `absolute`
//!   out-of-flow children.

mod absolute;
mod basis;
mod flexbox;
mod leaf;

use crate::cache::CachedMeasurement;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::enums::{Align, Dimension, Direction, Edge, FlexDirection, MeasureMode, PositionType};
use crate::layout::Layout;
use crate::print::PrintOptions;
use crate::tree::{LayoutStats, LayoutTree, NodeId};
use crate::value::{is_undefined, UNDEFINED};
use tracing::{debug, instrument, trace};

/// Settings fixed for the duration of one `calculate_layout` call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PassState {
    pub(crate) point_scale_factor: f32,
    pub(crate) max_depth: usize,
    pub(crate) depth: usize,
}

impl Default for PassState {
    fn default() -> Self {
        Self {
            point_scale_factor: 1.0,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }
}

impl LayoutTree {
    /// Lays out the subtree rooted at `node` within the given space.
    ///
    /// Either size may be undefined (`f32::NAN`) to let the root size itself to
    /// its content. A second call with nothing dirtied is served from the
    /// root's cache and changes nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn calculate_layout(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        direction: Direction,
    ) {
        // Forces one visit of every dirty node; later visits in the same pass
        // are served from cache when the constraints repeat.
        self.generation = self.generation.wrapping_add(1);
        self.stats = LayoutStats::default();

        let config = self.node_config(node);
        let point_scale_factor = config.point_scale_factor;
        let print_tree = config.print_tree;
        let max_depth = config.max_depth;
        self.pass = PassState {
            point_scale_factor,
            max_depth,
            depth: 0,
        };

        self.node_mut(node).resolve_dimensions();
        let (width, width_mode) =
            self.root_size(node, FlexDirection::Row, available_width, available_width);
        let (height, height_mode) = self.root_size(
            node,
            FlexDirection::Column,
            available_height,
            available_width,
        );

        let computed = self.layout_node(
            node,
            width,
            height,
            direction,
            width_mode,
            height_mode,
            available_width,
            available_height,
            true,
            "initial",
        );

        if computed {
            let entry = self.node_mut(node);
            let resolved = entry.layout.direction;
            entry.set_position(resolved, available_width, available_height, available_width);
            self.round_to_pixel_grid(node, point_scale_factor, 0.0, 0.0, 0.0, 0.0);

            if print_tree {
                self.print(node, PrintOptions::ALL);
            }
        }

        debug!(
            computed,
            layouts = self.stats.layouts_computed,
            cache_hits = self.stats.cache_hits,
            measure_calls = self.stats.measure_calls,
            "layout pass finished"
        );
    }

    /// Root constraint on one axis: its own definite size, else its max size
    /// as an upper bound, else whatever the caller offers.
    fn root_size(
        &self,
        node: NodeId,
        axis: FlexDirection,
        available: f32,
        parent_width: f32,
    ) -> (f32, MeasureMode) {
        let entry = self.node(node);
        let dim = axis.dimension().index();

        if entry.is_style_dim_defined(axis, available) {
            let size = entry.resolved_dimensions[dim].resolve(available)
                + entry.margin_for_axis(axis, parent_width);
            return (size, MeasureMode::Exactly);
        }

        let max = entry.style.max_dimensions[dim].resolve(available);
        if max >= 0.0 {
            (max, MeasureMode::AtMost)
        } else if is_undefined(available) {
            (UNDEFINED, MeasureMode::Undefined)
        } else {
            (available, MeasureMode::Exactly)
        }
    }

    /// Memoized entry into the flex algorithm for one node.
    ///
    /// Returns `true` when the algorithm actually ran, or when no cached
    /// answer matched.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn layout_node(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        parent_direction: Direction,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        parent_width: f32,
        parent_height: f32,
        perform_layout: bool,
        reason: &'static str,
    ) -> bool {
        self.pass.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.pass.depth);
        if self.pass.depth > self.pass.max_depth {
            self.fatal(node, "Layout recursion exceeded the configured max depth");
        }

        let generation = self.generation;
        let point_scale_factor = self.pass.point_scale_factor;

        let entry = self.node_mut(node);
        let has_measure_func = entry.has_measure_func();
        let margin_row = entry.margin_for_axis(FlexDirection::Row, parent_width);
        let margin_column = entry.margin_for_axis(FlexDirection::Column, parent_width);
        let need_to_visit = (entry.is_dirty && entry.layout.generation_count != generation)
            || entry.layout.last_parent_direction != Some(parent_direction);

        let layout = &mut entry.layout;
        if need_to_visit {
            layout.cached_layout = None;
            layout.cached_measurements.clear();
        }

        let matches = |cache: &CachedMeasurement| {
            cache.matches_exactly(available_width, available_height, width_mode, height_mode)
        };
        let cached = if has_measure_func {
            let fits = |cache: &CachedMeasurement| {
                cache.is_compatible(
                    width_mode,
                    available_width,
                    height_mode,
                    available_height,
                    margin_row,
                    margin_column,
                    point_scale_factor,
                )
            };
            let ring = &layout.cached_measurements;
            layout
                .cached_layout
                .filter(|cache| fits(cache))
                .or_else(|| ring.iter().find(|cache| fits(cache)).copied())
        } else if perform_layout {
            layout.cached_layout.filter(|cache| matches(cache))
        } else {
            layout
                .cached_measurements
                .iter()
                .find(|cache| matches(cache))
                .copied()
        };

        match cached {
            Some(hit) if !need_to_visit => {
                layout.measured_dimensions = [hit.computed_width, hit.computed_height];
                self.stats.cache_hits += 1;
                trace!(
                    node = %node,
                    reason,
                    width = hit.computed_width,
                    height = hit.computed_height,
                    "cache hit"
                );
            }
            _ => {
                trace!(
                    node = %node,
                    reason,
                    available_width,
                    available_height,
                    ?width_mode,
                    ?height_mode,
                    perform_layout,
                    "computing layout"
                );
                self.layout_impl(
                    node,
                    available_width,
                    available_height,
                    parent_direction,
                    width_mode,
                    height_mode,
                    parent_width,
                    parent_height,
                    perform_layout,
                );
                self.stats.layouts_computed += 1;

                let layout = &mut self.node_mut(node).layout;
                layout.last_parent_direction = Some(parent_direction);

                if cached.is_none() {
                    let entry = CachedMeasurement {
                        available_width,
                        available_height,
                        width_mode,
                        height_mode,
                        computed_width: layout.measured_dimensions[Dimension::Width.index()],
                        computed_height: layout.measured_dimensions[Dimension::Height.index()],
                    };
                    if perform_layout {
                        layout.cached_layout = Some(entry);
                    } else {
                        layout.cached_measurements.push(entry);
                    }
                }
            }
        }

        let entry = self.node_mut(node);
        if perform_layout {
            entry.layout.dimensions = entry.layout.measured_dimensions;
            entry.has_new_layout = true;
            entry.is_dirty = false;
        }
        entry.layout.generation_count = generation;

        self.pass.depth -= 1;
        need_to_visit || cached.is_none()
    }

    /// Clears the geometry of a `display: none` subtree.
    pub(crate) fn zero_out_layout_recursively(&mut self, node: NodeId) {
        let entry = self.node_mut(node);
        entry.layout = Layout::zeroed();
        entry.has_new_layout = true;
        entry.is_dirty = false;

        for index in 0..self.child_count(node) {
            let child = self.nth_child(node, index);
            self.zero_out_layout_recursively(child);
        }
    }

    /// Distance from the top of `node` to its first baseline: the baseline
    /// callback if present, else the baseline of the first child on the first
    /// line (preferring one aligned to baseline), else the node's height.
    pub(crate) fn baseline(&mut self, node: NodeId) -> f32 {
        let entry = self.node_mut(node);
        let width = entry.measured(Dimension::Width);
        let height = entry.measured(Dimension::Height);

        if let Some(baseline_func) = entry.baseline.as_mut() {
            let baseline = baseline_func.baseline(width, height);
            if is_undefined(baseline) {
                self.fatal(node, "Expect custom baseline function to not return NaN");
            }
            return baseline;
        }

        let style = entry.style;
        let mut baseline_child = None;
        for index in 0..self.child_count(node) {
            let child = self.nth_child(node, index);
            let candidate = self.node(child);
            if candidate.line_index > 0 {
                break;
            }
            if candidate.style.position_type == PositionType::Absolute {
                continue;
            }
            if candidate.align_item(&style) == Align::Baseline {
                baseline_child = Some(child);
                break;
            }
            if baseline_child.is_none() {
                baseline_child = Some(child);
            }
        }

        match baseline_child {
            Some(child) => {
                let baseline = self.baseline(child);
                baseline + self.node(child).layout.position[Edge::Top.index()]
            }
            None => height,
        }
    }

    pub(crate) fn is_baseline_layout(&self, node: NodeId) -> bool {
        let entry = self.node(node);
        if entry.style.flex_direction.is_column() {
            return false;
        }
        if entry.style.align_items == Align::Baseline {
            return true;
        }
        entry.children().iter().any(|&child| {
            let child = self.node(child);
            child.style.position_type == PositionType::Relative
                && child.style.align_self == Align::Baseline
        })
    }

    /// Mirrors a child's leading position onto its trailing edge for reversed
    /// axes.
    pub(crate) fn set_child_trailing_position(
        &mut self,
        node: NodeId,
        child: NodeId,
        axis: FlexDirection,
    ) {
        let dim = axis.dimension();
        let parent_size = self.node(node).measured(dim);
        let entry = self.node_mut(child);
        let size = entry.measured(dim);
        entry.layout.position[axis.trailing_edge().index()] =
            parent_size - size - entry.layout.position[axis.leading_edge().index()];
    }
}
