//! # Style Module
//!
//! The flex properties of a node and the edge arithmetic built on them.
//!
//! ## Responsibilities
//! - **Defaults**: the engine defaults and the web-compatible variant.
//! - **Edge lookup**: specific edge, then axis shorthand, then `all`, then the
//!   caller's default, with `start`/`end` overriding physical edges on the row
//!   axis.
//! - **Box edges per axis**: leading/trailing margin, padding, border and
//!   position offsets, resolved against a parent size.

use crate::enums::{
    Align, Direction, Display, Edge, FlexDirection, Justify, Overflow, PositionType, Wrap,
};
use crate::value::{float_max, is_undefined, Unit, Value, UNDEFINED};
use std::ops::{Index, IndexMut};

/// Nine edge slots of a box property (`margin`, `padding`, `border`, `position`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges([Value; Edge::COUNT]);

impl Default for Edges {
    fn default() -> Self {
        Self([Value::UNDEFINED; Edge::COUNT])
    }
}

impl Index<Edge> for Edges {
    type Output = Value;

    fn index(&self, edge: Edge) -> &Value {
        &self.0[edge.index()]
    }
}

impl IndexMut<Edge> for Edges {
    fn index_mut(&mut self, edge: Edge) -> &mut Value {
        &mut self.0[edge.index()]
    }
}

impl Edges {
    /// Resolves `edge` through its shorthands. `start`/`end` never fall back to
    /// `default` so that a physical edge can still apply.
    pub fn computed(&self, edge: Edge, default: Value) -> Value {
        if self[edge].is_defined() {
            return self[edge];
        }

        if matches!(edge, Edge::Top | Edge::Bottom) && self[Edge::Vertical].is_defined() {
            return self[Edge::Vertical];
        }

        if matches!(edge, Edge::Left | Edge::Right | Edge::Start | Edge::End)
            && self[Edge::Horizontal].is_defined()
        {
            return self[Edge::Horizontal];
        }

        if self[Edge::All].is_defined() {
            return self[Edge::All];
        }

        if matches!(edge, Edge::Start | Edge::End) {
            return Value::UNDEFINED;
        }

        default
    }
}

pub(crate) const DEFAULT_FLEX_GROW: f32 = 0.0;
pub(crate) const DEFAULT_FLEX_SHRINK: f32 = 0.0;
pub(crate) const WEB_DEFAULT_FLEX_SHRINK: f32 = 1.0;

/// The style of one node.
///
/// Fields are public for reading; writes should go through the
/// [`crate::LayoutTree`] setters so the node gets dirtied.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub direction: Direction,
    pub flex_direction: FlexDirection,
    pub justify_content: Justify,
    pub align_content: Align,
    pub align_items: Align,
    pub align_self: Align,
    pub position_type: PositionType,
    pub flex_wrap: Wrap,
    pub overflow: Overflow,
    pub display: Display,
    pub flex: f32,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Value,
    pub margin: Edges,
    pub position: Edges,
    pub padding: Edges,
    pub border: Edges,
    /// Indexed by [`crate::Dimension`].
    pub dimensions: [Value; 2],
    pub min_dimensions: [Value; 2],
    pub max_dimensions: [Value; 2],
    pub aspect_ratio: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            justify_content: Justify::FlexStart,
            align_content: Align::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            position_type: PositionType::Relative,
            flex_wrap: Wrap::NoWrap,
            overflow: Overflow::Visible,
            display: Display::Flex,
            flex: UNDEFINED,
            flex_grow: UNDEFINED,
            flex_shrink: UNDEFINED,
            flex_basis: Value::AUTO,
            margin: Edges::default(),
            position: Edges::default(),
            padding: Edges::default(),
            border: Edges::default(),
            dimensions: [Value::AUTO; 2],
            min_dimensions: [Value::UNDEFINED; 2],
            max_dimensions: [Value::UNDEFINED; 2],
            aspect_ratio: UNDEFINED,
        }
    }
}

/// Equality used to decide whether a style change dirties a node: exact,
/// with undefined equal to undefined.
pub(crate) trait StyleEq {
    fn same(&self, other: &Self) -> bool;
}

macro_rules! style_eq_by_partial_eq {
    ($($ty:ty),+) => {
        $(impl StyleEq for $ty {
            fn same(&self, other: &Self) -> bool {
                self == other
            }
        })+
    };
}

style_eq_by_partial_eq!(Direction, FlexDirection, Justify, Align);
style_eq_by_partial_eq!(PositionType, Wrap, Overflow, Display);

impl StyleEq for f32 {
    fn same(&self, other: &Self) -> bool {
        self == other || (is_undefined(*self) && is_undefined(*other))
    }
}

impl StyleEq for Value {
    fn same(&self, other: &Self) -> bool {
        let unitless = matches!(self.unit, Unit::Undefined | Unit::Auto);
        self.unit == other.unit && (unitless || self.value == other.value)
    }
}

impl<T: StyleEq, const N: usize> StyleEq for [T; N] {
    fn same(&self, other: &Self) -> bool {
        self.iter().zip(other).all(|(a, b)| a.same(b))
    }
}

impl StyleEq for Edges {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0)
    }
}

impl StyleEq for Style {
    fn same(&self, other: &Self) -> bool {
        self.direction.same(&other.direction)
            && self.flex_direction.same(&other.flex_direction)
            && self.justify_content.same(&other.justify_content)
            && self.align_content.same(&other.align_content)
            && self.align_items.same(&other.align_items)
            && self.align_self.same(&other.align_self)
            && self.position_type.same(&other.position_type)
            && self.flex_wrap.same(&other.flex_wrap)
            && self.overflow.same(&other.overflow)
            && self.display.same(&other.display)
            && self.flex.same(&other.flex)
            && self.flex_grow.same(&other.flex_grow)
            && self.flex_shrink.same(&other.flex_shrink)
            && self.flex_basis.same(&other.flex_basis)
            && self.margin.same(&other.margin)
            && self.position.same(&other.position)
            && self.padding.same(&other.padding)
            && self.border.same(&other.border)
            && self.dimensions.same(&other.dimensions)
            && self.min_dimensions.same(&other.min_dimensions)
            && self.max_dimensions.same(&other.max_dimensions)
            && self.aspect_ratio.same(&other.aspect_ratio)
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Style {
    /// Defaults matching browser flexbox: row direction, stretched lines and
    /// shrinkable items.
    pub fn web_default() -> Self {
        Self {
            flex_direction: FlexDirection::Row,
            align_content: Align::Stretch,
            ..Self::default()
        }
    }

    pub(crate) fn flex_grow_or_default(&self) -> f32 {
        if is_undefined(self.flex_grow) {
            DEFAULT_FLEX_GROW
        } else {
            self.flex_grow
        }
    }

    pub(crate) fn flex_shrink_or_default(&self, use_web_defaults: bool) -> f32 {
        if !is_undefined(self.flex_shrink) {
            self.flex_shrink
        } else if use_web_defaults {
            WEB_DEFAULT_FLEX_SHRINK
        } else {
            DEFAULT_FLEX_SHRINK
        }
    }

    /// The flex basis in effect: an explicit basis wins, then the `flex`
    /// shorthand (positive `flex` means basis 0, or `auto` with web defaults).
    pub(crate) fn resolved_flex_basis(&self, use_web_defaults: bool) -> Value {
        if self.flex_basis.is_defined() && !self.flex_basis.is_auto() {
            return self.flex_basis;
        }
        if !is_undefined(self.flex) && self.flex > 0.0 {
            return if use_web_defaults {
                Value::AUTO
            } else {
                Value::ZERO
            };
        }
        Value::AUTO
    }

    // --- margins ---------------------------------------------------------

    pub(crate) fn margin_leading_value(&self, axis: FlexDirection) -> Value {
        if axis.is_row() && self.margin[Edge::Start].is_defined() {
            self.margin[Edge::Start]
        } else {
            self.margin.computed(axis.leading_edge(), Value::UNDEFINED)
        }
    }

    pub(crate) fn margin_trailing_value(&self, axis: FlexDirection) -> Value {
        if axis.is_row() && self.margin[Edge::End].is_defined() {
            self.margin[Edge::End]
        } else {
            self.margin.computed(axis.trailing_edge(), Value::UNDEFINED)
        }
    }

    pub(crate) fn leading_margin(&self, axis: FlexDirection, width_size: f32) -> f32 {
        if axis.is_row() && self.margin[Edge::Start].is_defined() {
            return self.margin[Edge::Start].resolve_margin(width_size);
        }
        self.margin
            .computed(axis.leading_edge(), Value::ZERO)
            .resolve_margin(width_size)
    }

    pub(crate) fn trailing_margin(&self, axis: FlexDirection, width_size: f32) -> f32 {
        if axis.is_row() && self.margin[Edge::End].is_defined() {
            return self.margin[Edge::End].resolve_margin(width_size);
        }
        self.margin
            .computed(axis.trailing_edge(), Value::ZERO)
            .resolve_margin(width_size)
    }

    pub(crate) fn margin_for_axis(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.leading_margin(axis, width_size) + self.trailing_margin(axis, width_size)
    }

    // --- padding & border ------------------------------------------------

    pub(crate) fn leading_padding(&self, axis: FlexDirection, width_size: f32) -> f32 {
        if axis.is_row() && self.padding[Edge::Start].is_defined() {
            let start = self.padding[Edge::Start].resolve(width_size);
            if start >= 0.0 {
                return start;
            }
        }
        float_max(
            self.padding
                .computed(axis.leading_edge(), Value::ZERO)
                .resolve(width_size),
            0.0,
        )
    }

    pub(crate) fn trailing_padding(&self, axis: FlexDirection, width_size: f32) -> f32 {
        if axis.is_row() && self.padding[Edge::End].is_defined() {
            let end = self.padding[Edge::End].resolve(width_size);
            if end >= 0.0 {
                return end;
            }
        }
        float_max(
            self.padding
                .computed(axis.trailing_edge(), Value::ZERO)
                .resolve(width_size),
            0.0,
        )
    }

    /// Borders are points only; percentages are not resolved.
    pub(crate) fn leading_border(&self, axis: FlexDirection) -> f32 {
        let start = self.border[Edge::Start];
        if axis.is_row() && start.is_defined() && start.value >= 0.0 {
            return start.value;
        }
        let leading = self.border.computed(axis.leading_edge(), Value::ZERO);
        float_max(leading.value, 0.0)
    }

    pub(crate) fn trailing_border(&self, axis: FlexDirection) -> f32 {
        let end = self.border[Edge::End];
        if axis.is_row() && end.is_defined() && end.value >= 0.0 {
            return end.value;
        }
        let trailing = self.border.computed(axis.trailing_edge(), Value::ZERO);
        float_max(trailing.value, 0.0)
    }

    pub(crate) fn leading_padding_and_border(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.leading_padding(axis, width_size) + self.leading_border(axis)
    }

    pub(crate) fn trailing_padding_and_border(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.trailing_padding(axis, width_size) + self.trailing_border(axis)
    }

    pub(crate) fn padding_and_border_for_axis(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.leading_padding_and_border(axis, width_size)
            + self.trailing_padding_and_border(axis, width_size)
    }

    // --- position offsets ------------------------------------------------

    fn offset(&self, edge: Edge) -> Value {
        self.position.computed(edge, Value::UNDEFINED)
    }

    pub(crate) fn is_leading_position_defined(&self, axis: FlexDirection) -> bool {
        (axis.is_row() && self.offset(Edge::Start).is_defined())
            || self.offset(axis.leading_edge()).is_defined()
    }

    pub(crate) fn is_trailing_position_defined(&self, axis: FlexDirection) -> bool {
        (axis.is_row() && self.offset(Edge::End).is_defined())
            || self.offset(axis.trailing_edge()).is_defined()
    }

    pub(crate) fn leading_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
        if axis.is_row() {
            let start = self.offset(Edge::Start);
            if start.is_defined() {
                return start.resolve(axis_size);
            }
        }
        let leading = self.offset(axis.leading_edge());
        if leading.is_defined() {
            leading.resolve(axis_size)
        } else {
            0.0
        }
    }

    pub(crate) fn trailing_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
        if axis.is_row() {
            let end = self.offset(Edge::End);
            if end.is_defined() {
                return end.resolve(axis_size);
            }
        }
        let trailing = self.offset(axis.trailing_edge());
        if trailing.is_defined() {
            trailing.resolve(axis_size)
        } else {
            0.0
        }
    }

    /// Offset applied by `position: relative`: the leading offset if set,
    /// otherwise the negated trailing offset.
    pub(crate) fn relative_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
        if self.is_leading_position_defined(axis) {
            self.leading_position(axis, axis_size)
        } else {
            -self.trailing_position(axis, axis_size)
        }
    }
}
