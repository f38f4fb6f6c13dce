//! Nodes whose size is known without running the flex passes.

use crate::enums::{Dimension, FlexDirection, MeasureMode};
use crate::node::NodeContent;
use crate::tree::{LayoutTree, NodeId};
use crate::value::{float_max, is_undefined};
use tracing::trace;

impl LayoutTree {
    /// Sizes a node through its measure callback. The callback sees the
    /// content box and is skipped when both axes are fixed.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn measure_leaf(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        parent_width: f32,
        parent_height: f32,
    ) {
        let row = FlexDirection::Row;
        let column = FlexDirection::Column;
        let entry = self.node(node);
        let padding_and_border_row = entry.padding_and_border_for_axis(row, available_width);
        let padding_and_border_column = entry.padding_and_border_for_axis(column, available_width);
        let margin_row = entry.margin_for_axis(row, available_width);
        let margin_column = entry.margin_for_axis(column, available_width);

        let inner_width = if is_undefined(available_width) {
            available_width
        } else {
            float_max(0.0, available_width - margin_row - padding_and_border_row)
        };
        let inner_height = if is_undefined(available_height) {
            available_height
        } else {
            float_max(
                0.0,
                available_height - margin_column - padding_and_border_column,
            )
        };

        let exact = width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly;
        let measured = if exact {
            [
                entry.bound_axis(
                    row,
                    available_width - margin_row,
                    parent_width,
                    parent_width,
                ),
                entry.bound_axis(
                    column,
                    available_height - margin_column,
                    parent_height,
                    parent_width,
                ),
            ]
        } else {
            let size = match &mut self.node_mut(node).content {
                NodeContent::Measured(measure) => {
                    measure.measure(inner_width, width_mode, inner_height, height_mode)
                }
                NodeContent::Children(_) => {
                    self.fatal(node, "Expected node to have custom measure function")
                }
            };
            self.stats.measure_calls += 1;
            trace!(
                node = %node,
                inner_width,
                inner_height,
                width = size.width,
                height = size.height,
                "measured"
            );

            let width = if width_mode == MeasureMode::Exactly {
                available_width - margin_row
            } else {
                size.width + padding_and_border_row
            };
            let height = if height_mode == MeasureMode::Exactly {
                available_height - margin_column
            } else {
                size.height + padding_and_border_column
            };

            let entry = self.node(node);
            [
                entry.bound_axis(row, width, available_width, available_width),
                entry.bound_axis(column, height, available_height, available_width),
            ]
        };

        self.node_mut(node).layout.measured_dimensions = measured;
    }

    /// A container without children is as large as its padding and border
    /// unless the constraint is exact.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn size_empty_container(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        parent_width: f32,
        parent_height: f32,
    ) {
        let entry = self.node_mut(node);
        let style = &entry.style;
        let margin_row = style.margin_for_axis(FlexDirection::Row, parent_width);
        let margin_column = style.margin_for_axis(FlexDirection::Column, parent_width);

        let width = if width_mode == MeasureMode::Exactly {
            available_width - margin_row
        } else {
            style.padding_and_border_for_axis(FlexDirection::Row, parent_width)
        };
        let height = if height_mode == MeasureMode::Exactly {
            available_height - margin_column
        } else {
            style.padding_and_border_for_axis(FlexDirection::Column, parent_width)
        };

        let measured = [
            entry.bound_axis(FlexDirection::Row, width, parent_width, parent_width),
            entry.bound_axis(FlexDirection::Column, height, parent_height, parent_width),
        ];
        entry.layout.measured_dimensions = measured;
    }

    /// Answers a measure-only request without visiting children when the
    /// constraints already pin the size. Returns `false` if they do not.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn size_fixed(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        parent_width: f32,
        parent_height: f32,
    ) -> bool {
        let collapsed = |mode: MeasureMode, size: f32| mode == MeasureMode::AtMost && size <= 0.0;
        if !collapsed(width_mode, available_width)
            && !collapsed(height_mode, available_height)
            && !(width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly)
        {
            return false;
        }

        let entry = self.node_mut(node);
        let margin_row = entry.margin_for_axis(FlexDirection::Row, parent_width);
        let margin_column = entry.margin_for_axis(FlexDirection::Column, parent_width);

        let fixed = |mode: MeasureMode, available: f32, margin: f32| {
            if is_undefined(available) || (mode == MeasureMode::AtMost && available < 0.0) {
                0.0
            } else {
                available - margin
            }
        };
        let width = fixed(width_mode, available_width, margin_row);
        let height = fixed(height_mode, available_height, margin_column);

        let measured = [
            entry.bound_axis(FlexDirection::Row, width, parent_width, parent_width),
            entry.bound_axis(FlexDirection::Column, height, parent_height, parent_width),
        ];
        entry.layout.measured_dimensions = measured;
        trace!(
            node = %node,
            width = measured[Dimension::Width.index()],
            height = measured[Dimension::Height.index()],
            "fixed size"
        );
        true
    }
}
