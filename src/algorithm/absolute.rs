//! Out-of-flow children.

use crate::enums::{Align, Dimension, Direction, FlexDirection, Justify, MeasureMode, Wrap};
use crate::tree::{LayoutTree, NodeId};
use crate::value::{is_undefined, UNDEFINED};

impl LayoutTree {
    /// Sizes and places an absolutely positioned child inside the padding box
    /// of `node`, whose measured size must already be final.
    ///
    /// A missing dimension comes from opposing offsets, then from the aspect
    /// ratio, then from measuring the content.
    pub(crate) fn absolute_layout_child(
        &mut self,
        node: NodeId,
        child: NodeId,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        direction: Direction,
    ) {
        let parent = self.node(node);
        let parent_style = parent.style;
        let parent_size = parent.layout.measured_dimensions;
        let main_axis = parent_style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let is_main_axis_row = main_axis.is_row();

        let row = FlexDirection::Row;
        let column = FlexDirection::Column;
        let width_index = Dimension::Width.index();
        let height_index = Dimension::Height.index();

        let item = self.node(child);
        let child_style = &item.style;
        let margin_row = item.margin_for_axis(row, width);
        let margin_column = item.margin_for_axis(column, width);

        let mut child_width = UNDEFINED;
        let mut child_height = UNDEFINED;

        if item.is_style_dim_defined(row, width) {
            child_width = item.resolved_dimensions[width_index].resolve(width) + margin_row;
        } else if child_style.is_leading_position_defined(row)
            && child_style.is_trailing_position_defined(row)
        {
            let border = parent_style.leading_border(row) + parent_style.trailing_border(row);
            let offsets = child_style.leading_position(row, width)
                + child_style.trailing_position(row, width);
            let stretched = parent_size[width_index] - border - offsets;
            child_width = item.bound_axis(row, stretched, width, width);
        }

        if item.is_style_dim_defined(column, height) {
            child_height = item.resolved_dimensions[height_index].resolve(height) + margin_column;
        } else if child_style.is_leading_position_defined(column)
            && child_style.is_trailing_position_defined(column)
        {
            let border = parent_style.leading_border(column) + parent_style.trailing_border(column);
            let offsets = child_style.leading_position(column, height)
                + child_style.trailing_position(column, height);
            let stretched = parent_size[height_index] - border - offsets;
            child_height = item.bound_axis(column, stretched, height, width);
        }

        // One known dimension anchors the other through the aspect ratio.
        let aspect_ratio = child_style.aspect_ratio;
        if is_undefined(child_width) != is_undefined(child_height) && !is_undefined(aspect_ratio) {
            if is_undefined(child_width) {
                child_width = margin_row + (child_height - margin_column) * aspect_ratio;
            } else {
                child_height = margin_column + (child_width - margin_row) / aspect_ratio;
            }
        }

        if is_undefined(child_width) || is_undefined(child_height) {
            let mut child_width_mode = if is_undefined(child_width) {
                MeasureMode::Undefined
            } else {
                MeasureMode::Exactly
            };
            let child_height_mode = if is_undefined(child_height) {
                MeasureMode::Undefined
            } else {
                MeasureMode::Exactly
            };

            // Let content wrap at the container's width.
            if !is_main_axis_row
                && is_undefined(child_width)
                && width_mode != MeasureMode::Undefined
                && width > 0.0
            {
                child_width = width;
                child_width_mode = MeasureMode::AtMost;
            }

            self.layout_node(
                child,
                child_width,
                child_height,
                direction,
                child_width_mode,
                child_height_mode,
                child_width,
                child_height,
                false,
                "abs-measure",
            );

            let item = self.node(child);
            child_width = item.measured(Dimension::Width) + item.margin_for_axis(row, width);
            child_height = item.measured(Dimension::Height) + item.margin_for_axis(column, width);
        }

        self.layout_node(
            child,
            child_width,
            child_height,
            direction,
            MeasureMode::Exactly,
            MeasureMode::Exactly,
            child_width,
            child_height,
            true,
            "abs-layout",
        );

        let main_size = if is_main_axis_row { width } else { height };
        let cross_size = if is_main_axis_row { height } else { width };

        let item = self.node_mut(child);
        let align = item.align_item(&parent_style);
        let child_style = item.style;

        let main_dim = main_axis.dimension().index();
        let main_leading = main_axis.leading_edge().index();
        let leading_main = child_style.is_leading_position_defined(main_axis);
        let trailing_main = child_style.is_trailing_position_defined(main_axis);
        let free_main = parent_size[main_dim] - item.layout.measured_dimensions[main_dim];
        if trailing_main && !leading_main {
            item.layout.position[main_leading] = free_main
                - parent_style.trailing_border(main_axis)
                - child_style.trailing_margin(main_axis, width)
                - child_style.trailing_position(main_axis, main_size);
        } else if !leading_main {
            match parent_style.justify_content {
                Justify::Center => {
                    item.layout.position[main_leading] = free_main / 2.0;
                }
                Justify::FlexEnd => {
                    item.layout.position[main_leading] = free_main;
                }
                _ => {}
            }
        }

        let cross_dim = cross_axis.dimension().index();
        let cross_leading = cross_axis.leading_edge().index();
        let leading_cross = child_style.is_leading_position_defined(cross_axis);
        let trailing_cross = child_style.is_trailing_position_defined(cross_axis);
        let free_cross = parent_size[cross_dim] - item.layout.measured_dimensions[cross_dim];
        if trailing_cross && !leading_cross {
            item.layout.position[cross_leading] = free_cross
                - parent_style.trailing_border(cross_axis)
                - child_style.trailing_margin(cross_axis, width)
                - child_style.trailing_position(cross_axis, cross_size);
        } else if !leading_cross {
            // Wrap-reverse flips which cross edge counts as the end.
            let wrap_reverse = parent_style.flex_wrap == Wrap::WrapReverse;
            let flex_end = (align == Align::FlexEnd) != wrap_reverse;
            if align == Align::Center {
                item.layout.position[cross_leading] = free_cross / 2.0;
            } else if flex_end {
                item.layout.position[cross_leading] = free_cross;
            }
        }
    }
}
