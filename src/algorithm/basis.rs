//! Hypothetical main size of a flex item.

use crate::enums::{
    Align, Dimension, Direction, ExperimentalFeature, FlexDirection, MeasureMode, Overflow,
};
use crate::tree::{LayoutTree, NodeId};
use crate::value::{float_max, is_undefined, UNDEFINED};

impl LayoutTree {
    /// Stores the flex basis of `child` in its layout.
    ///
    /// Resolution order: an explicit `flex-basis` (when the container's main
    /// size is known), then a definite main dimension, then a measure-only
    /// layout of the child under the container's inner size. The result is
    /// never below the child's padding and border.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn compute_flex_basis_for_child(
        &mut self,
        node: NodeId,
        child: NodeId,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        parent_width: f32,
        parent_height: f32,
        height_mode: MeasureMode,
        direction: Direction,
    ) {
        let generation = self.generation;
        let use_web_defaults = self.web_defaults(child);
        let web_flex_basis = self
            .node_config(child)
            .is_experimental_feature_enabled(ExperimentalFeature::WebFlexBasis);

        let style = self.node(node).style;
        let main_axis = style.flex_direction.resolve(direction);
        let is_main_axis_row = main_axis.is_row();
        let main_axis_size = if is_main_axis_row { width } else { height };
        let main_axis_parent_size = if is_main_axis_row {
            parent_width
        } else {
            parent_height
        };
        let row = FlexDirection::Row;
        let column = FlexDirection::Column;
        let width_index = Dimension::Width.index();
        let height_index = Dimension::Height.index();

        let item = self.node(child);
        let flex_basis = item.style.resolved_flex_basis(use_web_defaults);
        let resolved_flex_basis = flex_basis.resolve(main_axis_parent_size);
        let is_row_style_dim_defined = item.is_style_dim_defined(row, parent_width);
        let is_column_style_dim_defined = item.is_style_dim_defined(column, parent_height);

        if !is_undefined(resolved_flex_basis) && !is_undefined(main_axis_size) {
            let stale = is_undefined(item.layout.computed_flex_basis)
                || (web_flex_basis && item.layout.computed_flex_basis_generation != generation);
            if stale {
                let basis = float_max(
                    resolved_flex_basis,
                    item.padding_and_border_for_axis(main_axis, parent_width),
                );
                self.node_mut(child).layout.computed_flex_basis = basis;
            }
        } else if is_main_axis_row && is_row_style_dim_defined {
            // The width is definite; use it as the basis.
            let basis = float_max(
                item.resolved_dimensions[width_index].resolve(parent_width),
                item.padding_and_border_for_axis(row, parent_width),
            );
            self.node_mut(child).layout.computed_flex_basis = basis;
        } else if !is_main_axis_row && is_column_style_dim_defined {
            let basis = float_max(
                item.resolved_dimensions[height_index].resolve(parent_height),
                item.padding_and_border_for_axis(column, parent_width),
            );
            self.node_mut(child).layout.computed_flex_basis = basis;
        } else {
            let margin_row = item.margin_for_axis(row, parent_width);
            let margin_column = item.margin_for_axis(column, parent_width);
            let aspect_ratio = item.style.aspect_ratio;

            let mut child_width = UNDEFINED;
            let mut child_height = UNDEFINED;
            let mut child_width_mode = MeasureMode::Undefined;
            let mut child_height_mode = MeasureMode::Undefined;

            if is_row_style_dim_defined {
                child_width =
                    item.resolved_dimensions[width_index].resolve(parent_width) + margin_row;
                child_width_mode = MeasureMode::Exactly;
            }
            if is_column_style_dim_defined {
                child_height =
                    item.resolved_dimensions[height_index].resolve(parent_height) + margin_column;
                child_height_mode = MeasureMode::Exactly;
            }

            // A scrolling container does not bound its content along the
            // scroll axis.
            let scrolls = style.overflow == Overflow::Scroll;
            if (!is_main_axis_row || !scrolls)
                && is_undefined(child_width)
                && !is_undefined(width)
            {
                child_width = width;
                child_width_mode = MeasureMode::AtMost;
            }
            if (is_main_axis_row || !scrolls)
                && is_undefined(child_height)
                && !is_undefined(height)
            {
                child_height = height;
                child_height_mode = MeasureMode::AtMost;
            }

            if !is_undefined(aspect_ratio) {
                if !is_main_axis_row && child_width_mode == MeasureMode::Exactly {
                    child_height = (child_width - margin_row) / aspect_ratio;
                    child_height_mode = MeasureMode::Exactly;
                } else if is_main_axis_row && child_height_mode == MeasureMode::Exactly {
                    child_width = (child_height - margin_column) * aspect_ratio;
                    child_width_mode = MeasureMode::Exactly;
                }
            }

            // Stretched items are measured at the container's cross size.
            let stretches = item.align_item(&style) == Align::Stretch;
            let has_exact_width = !is_undefined(width) && width_mode == MeasureMode::Exactly;
            if !is_main_axis_row
                && !is_row_style_dim_defined
                && has_exact_width
                && stretches
                && child_width_mode != MeasureMode::Exactly
            {
                child_width = width;
                child_width_mode = MeasureMode::Exactly;
                if !is_undefined(aspect_ratio) {
                    child_height = (child_width - margin_row) / aspect_ratio;
                    child_height_mode = MeasureMode::Exactly;
                }
            }

            let has_exact_height = !is_undefined(height) && height_mode == MeasureMode::Exactly;
            if is_main_axis_row
                && !is_column_style_dim_defined
                && has_exact_height
                && stretches
                && child_height_mode != MeasureMode::Exactly
            {
                child_height = height;
                child_height_mode = MeasureMode::Exactly;
                if !is_undefined(aspect_ratio) {
                    child_width = (child_height - margin_column) * aspect_ratio;
                    child_width_mode = MeasureMode::Exactly;
                }
            }

            item.constrain_max_size_for_mode(
                row,
                parent_width,
                parent_width,
                &mut child_width_mode,
                &mut child_width,
            );
            item.constrain_max_size_for_mode(
                column,
                parent_height,
                parent_width,
                &mut child_height_mode,
                &mut child_height,
            );

            self.layout_node(
                child,
                child_width,
                child_height,
                direction,
                child_width_mode,
                child_height_mode,
                parent_width,
                parent_height,
                false,
                "measure",
            );

            let item = self.node_mut(child);
            item.layout.computed_flex_basis = float_max(
                item.measured(main_axis.dimension()),
                item.padding_and_border_for_axis(main_axis, parent_width),
            );
        }

        self.node_mut(child).layout.computed_flex_basis_generation = generation;
    }
}
