//! # Node Module
//!
//! A single box in a [`crate::LayoutTree`]: its style, its computed layout and
//! its content.
//!
//! ## Responsibilities
//! - **Content**: a node either has children or measures itself, never both.
//!   [`NodeContent`] makes the two states exclusive.
//! - **Callbacks**: measure, baseline and dirtied hooks supplied by the host.
//! - **Per-node arithmetic**: flex factors, min/max clamping and the
//!   positioning helpers the algorithm applies to every child.

use crate::config::ConfigId;
use crate::enums::{Align, Dimension, Direction, FlexDirection, MeasureMode, NodeType, PositionType};
use crate::layout::Layout;
use crate::style::{Style, DEFAULT_FLEX_GROW};
use crate::tree::NodeId;
use crate::value::{float_max, is_undefined, Size, Unit, Value};

/// Reports the intrinsic size of a leaf under the given constraints.
///
/// `width`/`height` are content-box sizes and are undefined when their mode is
/// [`MeasureMode::Undefined`].
pub trait MeasureFunc {
    fn measure(
        &mut self,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Size;
}

impl<F> MeasureFunc for F
where
    F: FnMut(f32, MeasureMode, f32, MeasureMode) -> Size,
{
    fn measure(
        &mut self,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Size {
        self(width, width_mode, height, height_mode)
    }
}

/// Distance from the top of a laid-out node to its first baseline.
/// Must not return `NaN`.
pub trait BaselineFunc {
    fn baseline(&mut self, width: f32, height: f32) -> f32;
}

impl<F> BaselineFunc for F
where
    F: FnMut(f32, f32) -> f32,
{
    fn baseline(&mut self, width: f32, height: f32) -> f32 {
        self(width, height)
    }
}

/// Invoked when a clean node becomes dirty.
pub type DirtiedFunc = Box<dyn FnMut(NodeId)>;

pub(crate) enum NodeContent {
    Children(Vec<NodeId>),
    Measured(Box<dyn MeasureFunc>),
}

impl Default for NodeContent {
    fn default() -> Self {
        NodeContent::Children(Vec::new())
    }
}

pub struct Node {
    pub(crate) style: Style,
    pub(crate) layout: Layout,
    pub(crate) content: NodeContent,
    pub(crate) parent: Option<NodeId>,
    pub(crate) baseline: Option<Box<dyn BaselineFunc>>,
    pub(crate) dirtied: Option<DirtiedFunc>,
    pub(crate) node_type: NodeType,
    pub(crate) config: ConfigId,
    pub(crate) is_dirty: bool,
    pub(crate) has_new_layout: bool,
    pub(crate) line_index: usize,
    /// Style dimensions with `min == max` collapsed onto the max value.
    pub(crate) resolved_dimensions: [Value; 2],
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("style", &self.style)
            .field("layout", &self.layout)
            .field("children", &self.children())
            .field("has_measure_func", &self.has_measure_func())
            .field("parent", &self.parent)
            .field("node_type", &self.node_type)
            .field("config", &self.config)
            .field("is_dirty", &self.is_dirty)
            .finish()
    }
}

impl Node {
    pub(crate) fn new(config: ConfigId, use_web_defaults: bool) -> Self {
        let style = if use_web_defaults {
            Style::web_default()
        } else {
            Style::default()
        };
        Self {
            resolved_dimensions: style.dimensions,
            style,
            layout: Layout::default(),
            content: NodeContent::default(),
            parent: None,
            baseline: None,
            dirtied: None,
            node_type: NodeType::Default,
            config,
            is_dirty: false,
            has_new_layout: true,
            line_index: 0,
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.content {
            NodeContent::Children(children) => children,
            NodeContent::Measured(_) => &[],
        }
    }

    pub fn has_measure_func(&self) -> bool {
        matches!(self.content, NodeContent::Measured(_))
    }

    pub fn has_baseline_func(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn has_new_layout(&self) -> bool {
        self.has_new_layout
    }

    pub fn config(&self) -> ConfigId {
        self.config
    }

    // --- resolution against the parent ----------------------------------

    pub(crate) fn resolve_dimensions(&mut self) {
        for dim in [Dimension::Width, Dimension::Height] {
            let i = dim.index();
            let max = self.style.max_dimensions[i];
            let min = self.style.min_dimensions[i];
            self.resolved_dimensions[i] = if max.is_defined() && max == min {
                max
            } else {
                self.style.dimensions[i]
            };
        }
    }

    pub(crate) fn resolve_direction(&self, parent_direction: Direction) -> Direction {
        if self.style.direction == Direction::Inherit {
            if parent_direction == Direction::Inherit {
                Direction::Ltr
            } else {
                parent_direction
            }
        } else {
            self.style.direction
        }
    }

    /// Roots never flex.
    pub(crate) fn resolve_flex_grow(&self) -> f32 {
        if self.parent.is_none() {
            return 0.0;
        }
        if !is_undefined(self.style.flex_grow) {
            return self.style.flex_grow;
        }
        if !is_undefined(self.style.flex) && self.style.flex > 0.0 {
            return self.style.flex;
        }
        DEFAULT_FLEX_GROW
    }

    pub(crate) fn resolve_flex_shrink(&self, use_web_defaults: bool) -> f32 {
        if self.parent.is_none() {
            return 0.0;
        }
        if !is_undefined(self.style.flex_shrink) {
            return self.style.flex_shrink;
        }
        if !use_web_defaults && !is_undefined(self.style.flex) && self.style.flex < 0.0 {
            return -self.style.flex;
        }
        self.style.flex_shrink_or_default(use_web_defaults)
    }

    pub(crate) fn is_flex(&self, use_web_defaults: bool) -> bool {
        let grow = self.resolve_flex_grow();
        let shrink = self.resolve_flex_shrink(use_web_defaults);
        self.style.position_type == PositionType::Relative && (grow != 0.0 || shrink != 0.0)
    }

    /// A usable, non-negative style size on `axis`.
    pub(crate) fn is_style_dim_defined(&self, axis: FlexDirection, parent_size: f32) -> bool {
        let dim = self.resolved_dimensions[axis.dimension().index()];
        match dim.unit {
            Unit::Auto | Unit::Undefined => false,
            Unit::Point => dim.value >= 0.0,
            Unit::Percent => dim.value >= 0.0 && !is_undefined(parent_size),
        }
    }

    pub(crate) fn is_layout_dim_defined(&self, axis: FlexDirection) -> bool {
        let value = self.layout.measured_dimensions[axis.dimension().index()];
        !is_undefined(value) && value >= 0.0
    }

    pub(crate) fn measured(&self, dim: Dimension) -> f32 {
        self.layout.measured_dimensions[dim.index()]
    }

    pub(crate) fn bound_axis_within_min_and_max(
        &self,
        axis: FlexDirection,
        value: f32,
        axis_size: f32,
    ) -> f32 {
        let dim = axis.dimension().index();
        let min = self.style.min_dimensions[dim].resolve(axis_size);
        let max = self.style.max_dimensions[dim].resolve(axis_size);

        let mut bound = value;
        if !is_undefined(max) && max >= 0.0 && bound > max {
            bound = max;
        }
        if !is_undefined(min) && min >= 0.0 && bound < min {
            bound = min;
        }
        bound
    }

    /// Like [`Node::bound_axis_within_min_and_max`], never below padding and
    /// border.
    pub(crate) fn bound_axis(
        &self,
        axis: FlexDirection,
        value: f32,
        axis_size: f32,
        width_size: f32,
    ) -> f32 {
        float_max(
            self.bound_axis_within_min_and_max(axis, value, axis_size),
            self.padding_and_border_for_axis(axis, width_size),
        )
    }

    pub(crate) fn margin_for_axis(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.style.margin_for_axis(axis, width_size)
    }

    pub(crate) fn padding_and_border_for_axis(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.style.padding_and_border_for_axis(axis, width_size)
    }

    pub(crate) fn dim_with_margin(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.measured(axis.dimension()) + self.margin_for_axis(axis, width_size)
    }

    /// Caps `size` by this node's max dimension on `axis`. An unconstrained
    /// request becomes `AtMost` the max.
    pub(crate) fn constrain_max_size_for_mode(
        &self,
        axis: FlexDirection,
        parent_axis_size: f32,
        parent_width: f32,
        mode: &mut MeasureMode,
        size: &mut f32,
    ) {
        let max_size = self.style.max_dimensions[axis.dimension().index()].resolve(parent_axis_size)
            + self.margin_for_axis(axis, parent_width);
        match *mode {
            MeasureMode::Exactly | MeasureMode::AtMost => {
                if !is_undefined(max_size) && !(*size < max_size) {
                    *size = max_size;
                }
            }
            MeasureMode::Undefined => {
                if !is_undefined(max_size) {
                    *mode = MeasureMode::AtMost;
                    *size = max_size;
                }
            }
        }
    }

    /// Writes the margin-and-offset part of the position; the flex pass adds
    /// the rest.
    pub(crate) fn set_position(
        &mut self,
        direction: Direction,
        main_size: f32,
        cross_size: f32,
        parent_width: f32,
    ) {
        let direction = if self.parent.is_some() {
            direction
        } else {
            Direction::Ltr
        };
        let main_axis = self.style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);

        let relative_main = self.style.relative_position(main_axis, main_size);
        let relative_cross = self.style.relative_position(cross_axis, cross_size);

        let position = &mut self.layout.position;
        position[main_axis.leading_edge().index()] =
            self.style.leading_margin(main_axis, parent_width) + relative_main;
        position[main_axis.trailing_edge().index()] =
            self.style.trailing_margin(main_axis, parent_width) + relative_main;
        position[cross_axis.leading_edge().index()] =
            self.style.leading_margin(cross_axis, parent_width) + relative_cross;
        position[cross_axis.trailing_edge().index()] =
            self.style.trailing_margin(cross_axis, parent_width) + relative_cross;
    }

    /// `align-self`, falling back to the parent's `align-items`. Baseline
    /// alignment only applies to row containers.
    pub(crate) fn align_item(&self, parent: &Style) -> Align {
        let align = if self.style.align_self == Align::Auto {
            parent.align_items
        } else {
            self.style.align_self
        };
        if align == Align::Baseline && parent.flex_direction.is_column() {
            return Align::FlexStart;
        }
        align
    }

    /// Resets the computed layout, keeping nothing from earlier passes.
    pub(crate) fn reset_layout(&mut self) {
        self.layout = Layout::default();
    }
}
