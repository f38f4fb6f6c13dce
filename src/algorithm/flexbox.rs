//! The flex layout of a container with children.
//!
//! Steps, in order:
//! 1. resolve axes and the box model of the container
//! 2. compute the available inner space
//! 3. compute the flex basis of every item
//! 4. break items into lines
//! 5. resolve flexible lengths per line
//! 6. justify along the main axis
//! 7. align within each line on the cross axis
//! 8. distribute lines with `align-content`
//! 9. settle the container's own size
//! 10. lay out absolutely positioned children
//! 11. write trailing positions for reversed axes

use crate::enums::{
    Align, Dimension, Direction, Display, Edge, FlexDirection, Justify, MeasureMode, Overflow,
    PositionType, Wrap,
};
use crate::tree::{LayoutTree, NodeId};
use crate::value::{float_max, float_min, floats_equal, is_undefined, Unit};

fn axis_sizes<T>(is_main_axis_row: bool, main: T, cross: T) -> (T, T) {
    if is_main_axis_row {
        (main, cross)
    } else {
        (cross, main)
    }
}

impl LayoutTree {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn layout_impl(
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
    ) {
        if is_undefined(available_width) && width_mode != MeasureMode::Undefined {
            self.fatal(
                node,
                "availableWidth is indefinite so widthMeasureMode must be Undefined",
            );
        }
        if is_undefined(available_height) && height_mode != MeasureMode::Undefined {
            self.fatal(
                node,
                "availableHeight is indefinite so heightMeasureMode must be Undefined",
            );
        }

        let use_legacy_stretch = self.node_config(node).use_legacy_stretch_behaviour;

        let entry = self.node_mut(node);
        let direction = entry.resolve_direction(parent_direction);
        let style = entry.style;
        let has_measure_func = entry.has_measure_func();
        let child_count = entry.children().len();

        let flex_row = FlexDirection::Row.resolve(direction);
        let flex_column = FlexDirection::Column.resolve(direction);
        let layout = &mut entry.layout;
        layout.direction = direction;
        for (edge, axis, leading) in [
            (Edge::Start, flex_row, true),
            (Edge::End, flex_row, false),
            (Edge::Top, flex_column, true),
            (Edge::Bottom, flex_column, false),
        ] {
            let (margin, border, padding) = if leading {
                (
                    style.leading_margin(axis, parent_width),
                    style.leading_border(axis),
                    style.leading_padding(axis, parent_width),
                )
            } else {
                (
                    style.trailing_margin(axis, parent_width),
                    style.trailing_border(axis),
                    style.trailing_padding(axis, parent_width),
                )
            };
            layout.margin[edge.index()] = margin;
            layout.border[edge.index()] = border;
            layout.padding[edge.index()] = padding;
        }

        if has_measure_func {
            self.measure_leaf(
                node,
                available_width,
                available_height,
                width_mode,
                height_mode,
                parent_width,
                parent_height,
            );
            return;
        }
        if child_count == 0 {
            self.size_empty_container(
                node,
                available_width,
                available_height,
                width_mode,
                height_mode,
                parent_width,
                parent_height,
            );
            return;
        }
        if !perform_layout
            && self.size_fixed(
                node,
                available_width,
                available_height,
                width_mode,
                height_mode,
                parent_width,
                parent_height,
            )
        {
            return;
        }

        self.node_mut(node).layout.had_overflow = false;

        // STEP 1: axes and box model.
        let main_axis = style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let is_main_axis_row = main_axis.is_row();
        let is_node_flex_wrap = style.flex_wrap != Wrap::NoWrap;
        let main_dim = main_axis.dimension();
        let cross_dim = cross_axis.dimension();
        let main_leading = main_axis.leading_edge().index();
        let cross_leading = cross_axis.leading_edge().index();

        let (main_axis_parent_size, cross_axis_parent_size) =
            axis_sizes(is_main_axis_row, parent_width, parent_height);

        let leading_padding_and_border_main =
            style.leading_padding_and_border(main_axis, parent_width);
        let trailing_padding_and_border_main =
            style.trailing_padding_and_border(main_axis, parent_width);
        let leading_padding_and_border_cross =
            style.leading_padding_and_border(cross_axis, parent_width);
        let padding_and_border_axis_main =
            style.padding_and_border_for_axis(main_axis, parent_width);
        let padding_and_border_axis_cross =
            style.padding_and_border_for_axis(cross_axis, parent_width);

        let (mut measure_mode_main_dim, measure_mode_cross_dim) =
            axis_sizes(is_main_axis_row, width_mode, height_mode);
        let (padding_and_border_axis_row, padding_and_border_axis_column) = axis_sizes(
            is_main_axis_row,
            padding_and_border_axis_main,
            padding_and_border_axis_cross,
        );

        let margin_axis_row = style.margin_for_axis(FlexDirection::Row, parent_width);
        let margin_axis_column = style.margin_for_axis(FlexDirection::Column, parent_width);

        // STEP 2: available inner space.
        let width_index = Dimension::Width.index();
        let height_index = Dimension::Height.index();
        let min_inner_width = style.min_dimensions[width_index].resolve(parent_width)
            - margin_axis_row
            - padding_and_border_axis_row;
        let max_inner_width = style.max_dimensions[width_index].resolve(parent_width)
            - margin_axis_row
            - padding_and_border_axis_row;
        let min_inner_height = style.min_dimensions[height_index].resolve(parent_height)
            - margin_axis_column
            - padding_and_border_axis_column;
        let max_inner_height = style.max_dimensions[height_index].resolve(parent_height)
            - margin_axis_column
            - padding_and_border_axis_column;
        let (min_inner_main_dim, max_inner_main_dim) = if is_main_axis_row {
            (min_inner_width, max_inner_width)
        } else {
            (min_inner_height, max_inner_height)
        };

        let mut available_inner_width =
            available_width - margin_axis_row - padding_and_border_axis_row;
        if !is_undefined(available_inner_width) {
            available_inner_width = float_max(
                float_min(available_inner_width, max_inner_width),
                min_inner_width,
            );
        }
        let mut available_inner_height =
            available_height - margin_axis_column - padding_and_border_axis_column;
        if !is_undefined(available_inner_height) {
            available_inner_height = float_max(
                float_min(available_inner_height, max_inner_height),
                min_inner_height,
            );
        }

        let (mut available_inner_main_dim, available_inner_cross_dim) = axis_sizes(
            is_main_axis_row,
            available_inner_width,
            available_inner_height,
        );

        // STEP 3: flex basis of every item.
        let mut single_flex_child = None;
        if measure_mode_main_dim == MeasureMode::Exactly {
            for index in 0..child_count {
                let child = self.nth_child(node, index);
                let use_web_defaults = self.web_defaults(child);
                let item = self.node(child);
                if single_flex_child.is_some() {
                    if item.is_flex(use_web_defaults) {
                        // Two flexible items: nothing to shortcut.
                        single_flex_child = None;
                        break;
                    }
                } else if item.resolve_flex_grow() > 0.0
                    && item.resolve_flex_shrink(use_web_defaults) > 0.0
                {
                    single_flex_child = Some(child);
                }
            }
        }

        let mut total_outer_flex_basis = 0.0;
        let mut absolute_children = Vec::new();

        for index in 0..child_count {
            let child = self.nth_child(node, index);
            if self.node(child).style.display == Display::None {
                self.zero_out_layout_recursively(child);
                continue;
            }

            let item = self.node_mut(child);
            item.resolve_dimensions();
            if perform_layout {
                let child_direction = item.resolve_direction(direction);
                item.set_position(
                    child_direction,
                    available_inner_main_dim,
                    available_inner_cross_dim,
                    available_inner_width,
                );
            }

            if item.style.position_type == PositionType::Absolute {
                absolute_children.push(child);
                continue;
            }

            if single_flex_child == Some(child) {
                let generation = self.generation;
                let layout = &mut self.node_mut(child).layout;
                layout.computed_flex_basis_generation = generation;
                layout.computed_flex_basis = 0.0;
            } else {
                self.compute_flex_basis_for_child(
                    node,
                    child,
                    available_inner_width,
                    width_mode,
                    available_inner_height,
                    available_inner_width,
                    available_inner_height,
                    height_mode,
                    direction,
                );
            }

            let item = self.node(child);
            total_outer_flex_basis += item.layout.computed_flex_basis
                + item.margin_for_axis(main_axis, available_inner_width);
        }

        let flex_basis_overflows = measure_mode_main_dim != MeasureMode::Undefined
            && total_outer_flex_basis > available_inner_main_dim;
        if is_node_flex_wrap
            && flex_basis_overflows
            && measure_mode_main_dim == MeasureMode::AtMost
        {
            measure_mode_main_dim = MeasureMode::Exactly;
        }

        // STEP 4: lines.
        let mut start_of_line_index = 0;
        let mut line_count = 0;
        let mut total_line_cross_dim = 0.0;
        let mut max_line_main_dim: f32 = 0.0;

        while start_of_line_index < child_count {
            let mut items_on_line = 0usize;
            let mut size_consumed_on_current_line = 0.0;
            let mut size_consumed_including_min = 0.0;
            let mut total_flex_grow_factors = 0.0;
            let mut total_flex_shrink_scaled_factors = 0.0;
            let mut relative_children = Vec::new();

            let mut end_of_line_index = start_of_line_index;
            while end_of_line_index < child_count {
                let child = self.nth_child(node, end_of_line_index);
                let use_web_defaults = self.web_defaults(child);
                let item = self.node_mut(child);
                if item.style.display == Display::None {
                    end_of_line_index += 1;
                    continue;
                }
                item.line_index = line_count;

                if item.style.position_type != PositionType::Absolute {
                    let child_margin_main_axis =
                        item.margin_for_axis(main_axis, available_inner_width);
                    let flex_basis_with_max = float_min(
                        item.style.max_dimensions[main_dim.index()].resolve(main_axis_parent_size),
                        item.layout.computed_flex_basis,
                    );
                    let flex_basis_with_min_and_max = float_max(
                        item.style.min_dimensions[main_dim.index()].resolve(main_axis_parent_size),
                        flex_basis_with_max,
                    );

                    let outer_flex_basis = flex_basis_with_min_and_max + child_margin_main_axis;

                    // A line always takes at least one item.
                    if size_consumed_including_min + outer_flex_basis > available_inner_main_dim
                        && is_node_flex_wrap
                        && items_on_line > 0
                    {
                        break;
                    }

                    size_consumed_including_min += outer_flex_basis;
                    size_consumed_on_current_line += outer_flex_basis;
                    items_on_line += 1;

                    if item.is_flex(use_web_defaults) {
                        total_flex_grow_factors += item.resolve_flex_grow();
                        // Shrinking is weighted by the basis.
                        let shrink = item.resolve_flex_shrink(use_web_defaults);
                        let basis = item.layout.computed_flex_basis;
                        total_flex_shrink_scaled_factors += -shrink * basis;
                    }
                    relative_children.push(child);
                }
                end_of_line_index += 1;
            }

            // Flex factors below one distribute only a fraction of the space.
            if total_flex_grow_factors > 0.0 && total_flex_grow_factors < 1.0 {
                total_flex_grow_factors = 1.0;
            }
            if total_flex_shrink_scaled_factors > 0.0 && total_flex_shrink_scaled_factors < 1.0 {
                total_flex_shrink_scaled_factors = 1.0;
            }

            // A measure-only pass with a fixed cross size needs only the
            // line's main size.
            let can_skip_flex = !perform_layout && measure_mode_cross_dim == MeasureMode::Exactly;

            // STEP 5: flexible lengths.
            if measure_mode_main_dim != MeasureMode::Exactly {
                let container_grow = self.node(node).resolve_flex_grow();
                if !is_undefined(min_inner_main_dim)
                    && size_consumed_on_current_line < min_inner_main_dim
                {
                    available_inner_main_dim = min_inner_main_dim;
                } else if !is_undefined(max_inner_main_dim)
                    && size_consumed_on_current_line > max_inner_main_dim
                {
                    available_inner_main_dim = max_inner_main_dim;
                } else if !use_legacy_stretch
                    && (total_flex_grow_factors == 0.0 || container_grow == 0.0)
                {
                    // Nothing grows, so size to content.
                    available_inner_main_dim = size_consumed_on_current_line;
                }
            }

            let mut remaining_free_space = 0.0;
            if !is_undefined(available_inner_main_dim) {
                remaining_free_space = available_inner_main_dim - size_consumed_on_current_line;
            } else if size_consumed_on_current_line < 0.0 {
                // Undefined main size with negative margins: keep the
                // container from shrinking below zero.
                remaining_free_space = -size_consumed_on_current_line;
            }

            let original_remaining_free_space = remaining_free_space;
            let mut delta_free_space = 0.0;

            if !can_skip_flex {
                // First pass: freeze items whose flexed size violates min or
                // max and take them out of the distribution.
                let mut delta_flex_shrink_scaled_factors = 0.0;
                let mut delta_flex_grow_factors = 0.0;
                for &child in &relative_children {
                    let use_web_defaults = self.web_defaults(child);
                    let item = self.node(child);
                    let child_flex_basis =
                        self.clamped_flex_basis(child, main_dim, main_axis_parent_size);

                    if remaining_free_space < 0.0 {
                        let flex_shrink_scaled_factor =
                            -item.resolve_flex_shrink(use_web_defaults) * child_flex_basis;
                        if flex_shrink_scaled_factor != 0.0 {
                            let share = remaining_free_space / total_flex_shrink_scaled_factors;
                            let base_main_size =
                                child_flex_basis + share * flex_shrink_scaled_factor;
                            let bound_main_size = item.bound_axis(
                                main_axis,
                                base_main_size,
                                available_inner_main_dim,
                                available_inner_width,
                            );
                            if base_main_size != bound_main_size {
                                delta_free_space -= bound_main_size - child_flex_basis;
                                delta_flex_shrink_scaled_factors -= flex_shrink_scaled_factor;
                            }
                        }
                    } else if remaining_free_space > 0.0 {
                        let flex_grow_factor = item.resolve_flex_grow();
                        if flex_grow_factor != 0.0 {
                            let share = remaining_free_space / total_flex_grow_factors;
                            let base_main_size = child_flex_basis + share * flex_grow_factor;
                            let bound_main_size = item.bound_axis(
                                main_axis,
                                base_main_size,
                                available_inner_main_dim,
                                available_inner_width,
                            );
                            if base_main_size != bound_main_size {
                                delta_free_space -= bound_main_size - child_flex_basis;
                                delta_flex_grow_factors -= flex_grow_factor;
                            }
                        }
                    }
                }

                total_flex_shrink_scaled_factors += delta_flex_shrink_scaled_factors;
                total_flex_grow_factors += delta_flex_grow_factors;
                remaining_free_space += delta_free_space;

                // Second pass: distribute what is left and lay out each item at
                // its final main size.
                delta_free_space = 0.0;
                for &child in &relative_children {
                    let use_web_defaults = self.web_defaults(child);
                    let child_flex_basis =
                        self.clamped_flex_basis(child, main_dim, main_axis_parent_size);
                    let item = self.node(child);
                    let mut updated_main_size = child_flex_basis;

                    if remaining_free_space < 0.0 {
                        let flex_shrink_scaled_factor =
                            -item.resolve_flex_shrink(use_web_defaults) * child_flex_basis;
                        if flex_shrink_scaled_factor != 0.0 {
                            let child_size = if total_flex_shrink_scaled_factors == 0.0 {
                                child_flex_basis + flex_shrink_scaled_factor
                            } else {
                                let share = remaining_free_space / total_flex_shrink_scaled_factors;
                                child_flex_basis + share * flex_shrink_scaled_factor
                            };
                            updated_main_size = item.bound_axis(
                                main_axis,
                                child_size,
                                available_inner_main_dim,
                                available_inner_width,
                            );
                        }
                    } else if remaining_free_space > 0.0 {
                        let flex_grow_factor = item.resolve_flex_grow();
                        if flex_grow_factor != 0.0 {
                            let share = remaining_free_space / total_flex_grow_factors;
                            updated_main_size = item.bound_axis(
                                main_axis,
                                child_flex_basis + share * flex_grow_factor,
                                available_inner_main_dim,
                                available_inner_width,
                            );
                        }
                    }

                    delta_free_space -= updated_main_size - child_flex_basis;

                    let margin_main = item.margin_for_axis(main_axis, available_inner_width);
                    let margin_cross = item.margin_for_axis(cross_axis, available_inner_width);
                    let aspect_ratio = item.style.aspect_ratio;
                    let align = item.align_item(&style);
                    let is_cross_style_dim_defined =
                        item.is_style_dim_defined(cross_axis, available_inner_cross_dim);

                    let mut child_main_size = updated_main_size + margin_main;
                    let mut child_main_measure_mode = MeasureMode::Exactly;
                    let mut child_cross_size;
                    let mut child_cross_measure_mode;

                    if !is_undefined(aspect_ratio) {
                        child_cross_size = if is_main_axis_row {
                            (child_main_size - margin_main) / aspect_ratio
                        } else {
                            (child_main_size - margin_main) * aspect_ratio
                        };
                        child_cross_measure_mode = MeasureMode::Exactly;
                        child_cross_size += margin_cross;
                    } else if !is_undefined(available_inner_cross_dim)
                        && !is_cross_style_dim_defined
                        && measure_mode_cross_dim == MeasureMode::Exactly
                        && !(is_node_flex_wrap && flex_basis_overflows)
                        && align == Align::Stretch
                    {
                        child_cross_size = available_inner_cross_dim;
                        child_cross_measure_mode = MeasureMode::Exactly;
                    } else if !is_cross_style_dim_defined {
                        child_cross_size = available_inner_cross_dim;
                        child_cross_measure_mode = if is_undefined(child_cross_size) {
                            MeasureMode::Undefined
                        } else {
                            MeasureMode::AtMost
                        };
                    } else {
                        let cross_value = item.resolved_dimensions[cross_dim.index()];
                        child_cross_size =
                            cross_value.resolve(available_inner_cross_dim) + margin_cross;
                        let loose_percent = cross_value.unit == Unit::Percent
                            && measure_mode_cross_dim != MeasureMode::Exactly;
                        let unbounded = is_undefined(child_cross_size) || loose_percent;
                        child_cross_measure_mode = if unbounded {
                            MeasureMode::Undefined
                        } else {
                            MeasureMode::Exactly
                        };
                    }

                    item.constrain_max_size_for_mode(
                        main_axis,
                        available_inner_main_dim,
                        available_inner_width,
                        &mut child_main_measure_mode,
                        &mut child_main_size,
                    );
                    item.constrain_max_size_for_mode(
                        cross_axis,
                        available_inner_cross_dim,
                        available_inner_width,
                        &mut child_cross_measure_mode,
                        &mut child_cross_size,
                    );

                    // Stretched items are laid out again once the line's
                    // cross size is known.
                    let requires_stretch_layout =
                        !is_cross_style_dim_defined && align == Align::Stretch;

                    let (child_width, child_height) =
                        axis_sizes(is_main_axis_row, child_main_size, child_cross_size);
                    let (child_width_mode, child_height_mode) = axis_sizes(
                        is_main_axis_row,
                        child_main_measure_mode,
                        child_cross_measure_mode,
                    );

                    self.layout_node(
                        child,
                        child_width,
                        child_height,
                        direction,
                        child_width_mode,
                        child_height_mode,
                        available_inner_width,
                        available_inner_height,
                        perform_layout && !requires_stretch_layout,
                        "flex",
                    );

                    let child_overflow = self.node(child).layout.had_overflow;
                    self.node_mut(node).layout.had_overflow |= child_overflow;
                }
            }

            remaining_free_space = original_remaining_free_space + delta_free_space;
            self.node_mut(node).layout.had_overflow |= remaining_free_space < 0.0;

            // STEP 6: main-axis justification.
            if measure_mode_main_dim == MeasureMode::AtMost && remaining_free_space > 0.0 {
                let min_main = style.min_dimensions[main_dim.index()];
                let min_main_size = min_main.resolve(main_axis_parent_size);
                remaining_free_space = if min_main.is_defined() && min_main_size >= 0.0 {
                    let used = available_inner_main_dim - remaining_free_space;
                    float_max(0.0, min_main_size - used)
                } else {
                    0.0
                };
            }

            let mut number_of_auto_margins = 0;
            for index in start_of_line_index..end_of_line_index {
                let item = self.node(self.nth_child(node, index));
                if item.style.position_type == PositionType::Relative
                    && item.style.display != Display::None
                {
                    if item.style.margin_leading_value(main_axis).is_auto() {
                        number_of_auto_margins += 1;
                    }
                    if item.style.margin_trailing_value(main_axis).is_auto() {
                        number_of_auto_margins += 1;
                    }
                }
            }

            let mut leading_main_dim = 0.0;
            let mut between_main_dim = 0.0;
            if number_of_auto_margins == 0 {
                match style.justify_content {
                    Justify::Center => leading_main_dim = remaining_free_space / 2.0,
                    Justify::FlexEnd => leading_main_dim = remaining_free_space,
                    Justify::SpaceBetween => {
                        if items_on_line > 1 {
                            between_main_dim =
                                float_max(remaining_free_space, 0.0) / (items_on_line - 1) as f32;
                        }
                    }
                    Justify::SpaceAround => {
                        if items_on_line > 0 {
                            between_main_dim = remaining_free_space / items_on_line as f32;
                            leading_main_dim = between_main_dim / 2.0;
                        }
                    }
                    Justify::SpaceEvenly => {
                        between_main_dim = remaining_free_space / (items_on_line + 1) as f32;
                        leading_main_dim = between_main_dim;
                    }
                    Justify::FlexStart => {}
                }
            }

            let auto_margin_share = if number_of_auto_margins > 0 {
                remaining_free_space / number_of_auto_margins as f32
            } else {
                0.0
            };

            let mut main_dim_total = leading_padding_and_border_main + leading_main_dim;
            let mut cross_dim_total: f32 = 0.0;

            for index in start_of_line_index..end_of_line_index {
                let child = self.nth_child(node, index);
                let item = self.node_mut(child);
                if item.style.display == Display::None {
                    continue;
                }

                if item.style.position_type == PositionType::Absolute {
                    if perform_layout {
                        let leading_border = style.leading_border(main_axis);
                        let child_style = &item.style;
                        if child_style.is_leading_position_defined(main_axis) {
                            // Offsets on absolute children are relative to
                            // the padding box.
                            let offset =
                                child_style.leading_position(main_axis, available_inner_main_dim);
                            let margin =
                                child_style.leading_margin(main_axis, available_inner_width);
                            item.layout.position[main_leading] = offset + leading_border + margin;
                        } else {
                            // Static position sits on the padding edge, untouched
                            // by the spacing of in-flow siblings.
                            item.layout.position[main_leading] += leading_border;
                        }
                    }
                    continue;
                }

                if item.style.margin_leading_value(main_axis).is_auto() {
                    main_dim_total += auto_margin_share;
                }
                if perform_layout {
                    item.layout.position[main_leading] += main_dim_total;
                }
                if item.style.margin_trailing_value(main_axis).is_auto() {
                    main_dim_total += auto_margin_share;
                }

                if can_skip_flex {
                    // Only the main size of the line matters here.
                    main_dim_total += between_main_dim
                        + item.margin_for_axis(main_axis, available_inner_width)
                        + item.layout.computed_flex_basis;
                    cross_dim_total = available_inner_cross_dim;
                } else {
                    let outer_main = item.dim_with_margin(main_axis, available_inner_width);
                    let outer_cross = item.dim_with_margin(cross_axis, available_inner_width);
                    main_dim_total += between_main_dim + outer_main;
                    cross_dim_total = float_max(cross_dim_total, outer_cross);
                }
            }
            main_dim_total += trailing_padding_and_border_main;

            let mut container_cross_axis = available_inner_cross_dim;
            if measure_mode_cross_dim == MeasureMode::Undefined
                || measure_mode_cross_dim == MeasureMode::AtMost
            {
                container_cross_axis = self.node(node).bound_axis(
                    cross_axis,
                    cross_dim_total + padding_and_border_axis_cross,
                    cross_axis_parent_size,
                    parent_width,
                ) - padding_and_border_axis_cross;
            }

            // A single line fills a fixed cross size.
            if !is_node_flex_wrap && measure_mode_cross_dim == MeasureMode::Exactly {
                cross_dim_total = available_inner_cross_dim;
            }

            cross_dim_total = self.node(node).bound_axis(
                cross_axis,
                cross_dim_total + padding_and_border_axis_cross,
                cross_axis_parent_size,
                parent_width,
            ) - padding_and_border_axis_cross;

            // STEP 7: cross-axis alignment within the line.
            if perform_layout {
                for index in start_of_line_index..end_of_line_index {
                    let child = self.nth_child(node, index);
                    let item = self.node(child);
                    if item.style.display == Display::None {
                        continue;
                    }

                    if item.style.position_type == PositionType::Absolute {
                        let child_style = &item.style;
                        let base = style.leading_border(cross_axis)
                            + child_style.leading_margin(cross_axis, available_inner_width);
                        let mut position = base;
                        if child_style.is_leading_position_defined(cross_axis) {
                            position +=
                                child_style.leading_position(cross_axis, available_inner_cross_dim);
                        }
                        // An offset that resolves to nothing falls back to the
                        // edge.
                        if is_undefined(position) {
                            position = base;
                        }
                        self.node_mut(child).layout.position[cross_leading] = position;
                        continue;
                    }

                    let mut leading_cross_dim = leading_padding_and_border_cross;
                    let align = item.align_item(&style);
                    let leading_auto = item.style.margin_leading_value(cross_axis).is_auto();
                    let trailing_auto = item.style.margin_trailing_value(cross_axis).is_auto();

                    if align == Align::Stretch && !leading_auto && !trailing_auto {
                        if !item.is_style_dim_defined(cross_axis, available_inner_cross_dim) {
                            let aspect_ratio = item.style.aspect_ratio;
                            let mut child_main_size = item.measured(main_dim);
                            let margin_cross =
                                item.margin_for_axis(cross_axis, available_inner_width);
                            let mut child_cross_size = if is_undefined(aspect_ratio) {
                                cross_dim_total
                            } else if is_main_axis_row {
                                margin_cross + child_main_size / aspect_ratio
                            } else {
                                margin_cross + child_main_size * aspect_ratio
                            };
                            child_main_size +=
                                item.margin_for_axis(main_axis, available_inner_width);

                            let mut child_main_measure_mode = MeasureMode::Exactly;
                            let mut child_cross_measure_mode = MeasureMode::Exactly;
                            item.constrain_max_size_for_mode(
                                main_axis,
                                available_inner_main_dim,
                                available_inner_width,
                                &mut child_main_measure_mode,
                                &mut child_main_size,
                            );
                            item.constrain_max_size_for_mode(
                                cross_axis,
                                available_inner_cross_dim,
                                available_inner_width,
                                &mut child_cross_measure_mode,
                                &mut child_cross_size,
                            );

                            let (child_width, child_height) =
                                axis_sizes(is_main_axis_row, child_main_size, child_cross_size);
                            let mode_for = |size: f32| {
                                if is_undefined(size) {
                                    MeasureMode::Undefined
                                } else {
                                    MeasureMode::Exactly
                                }
                            };

                            self.layout_node(
                                child,
                                child_width,
                                child_height,
                                direction,
                                mode_for(child_width),
                                mode_for(child_height),
                                available_inner_width,
                                available_inner_height,
                                true,
                                "stretch",
                            );
                        }
                    } else {
                        let remaining_cross_dim = container_cross_axis
                            - item.dim_with_margin(cross_axis, available_inner_width);

                        leading_cross_dim += if leading_auto && trailing_auto {
                            float_max(0.0, remaining_cross_dim / 2.0)
                        } else if trailing_auto {
                            0.0
                        } else if leading_auto {
                            float_max(0.0, remaining_cross_dim)
                        } else {
                            match align {
                                Align::FlexStart => 0.0,
                                Align::Center => remaining_cross_dim / 2.0,
                                _ => remaining_cross_dim,
                            }
                        };
                    }

                    self.node_mut(child).layout.position[cross_leading] +=
                        total_line_cross_dim + leading_cross_dim;
                }
            }

            total_line_cross_dim += cross_dim_total;
            max_line_main_dim = float_max(max_line_main_dim, main_dim_total);

            line_count += 1;
            start_of_line_index = end_of_line_index;
        }

        // STEP 8: multi-line content alignment.
        if perform_layout
            && (line_count > 1 || self.is_baseline_layout(node))
            && !is_undefined(available_inner_cross_dim)
        {
            self.align_lines(
                node,
                line_count,
                direction,
                total_line_cross_dim,
                available_inner_width,
                available_inner_height,
                available_inner_cross_dim,
                leading_padding_and_border_cross,
            );
        }

        // STEP 9: the container's own size.
        let entry = self.node(node);
        let mut measured = [
            entry.bound_axis(
                FlexDirection::Row,
                available_width - margin_axis_row,
                parent_width,
                parent_width,
            ),
            entry.bound_axis(
                FlexDirection::Column,
                available_height - margin_axis_column,
                parent_height,
                parent_width,
            ),
        ];

        let scrolls = style.overflow == Overflow::Scroll;
        if measure_mode_main_dim == MeasureMode::Undefined
            || (!scrolls && measure_mode_main_dim == MeasureMode::AtMost)
        {
            measured[main_dim.index()] = entry.bound_axis(
                main_axis,
                max_line_main_dim,
                main_axis_parent_size,
                parent_width,
            );
        } else if measure_mode_main_dim == MeasureMode::AtMost && scrolls {
            measured[main_dim.index()] = float_max(
                float_min(
                    available_inner_main_dim + padding_and_border_axis_main,
                    entry.bound_axis_within_min_and_max(
                        main_axis,
                        max_line_main_dim,
                        main_axis_parent_size,
                    ),
                ),
                padding_and_border_axis_main,
            );
        }

        if measure_mode_cross_dim == MeasureMode::Undefined
            || (!scrolls && measure_mode_cross_dim == MeasureMode::AtMost)
        {
            measured[cross_dim.index()] = entry.bound_axis(
                cross_axis,
                total_line_cross_dim + padding_and_border_axis_cross,
                cross_axis_parent_size,
                parent_width,
            );
        } else if measure_mode_cross_dim == MeasureMode::AtMost && scrolls {
            measured[cross_dim.index()] = float_max(
                float_min(
                    available_inner_cross_dim + padding_and_border_axis_cross,
                    entry.bound_axis_within_min_and_max(
                        cross_axis,
                        total_line_cross_dim + padding_and_border_axis_cross,
                        cross_axis_parent_size,
                    ),
                ),
                padding_and_border_axis_cross,
            );
        }
        self.node_mut(node).layout.measured_dimensions = measured;

        // Wrap-reverse mirrors lines along the cross axis.
        if perform_layout && style.flex_wrap == Wrap::WrapReverse {
            let container_cross = measured[cross_dim.index()];
            for index in 0..child_count {
                let child = self.nth_child(node, index);
                let item = self.node_mut(child);
                if item.style.position_type == PositionType::Relative
                    && item.style.display != Display::None
                {
                    let leading = item.layout.position[cross_leading];
                    item.layout.position[cross_leading] =
                        container_cross - leading - item.measured(cross_dim);
                }
            }
        }

        if perform_layout {
            // STEP 10: absolute children.
            let absolute_width_mode = if is_main_axis_row {
                measure_mode_main_dim
            } else {
                measure_mode_cross_dim
            };
            for child in absolute_children {
                self.absolute_layout_child(
                    node,
                    child,
                    available_inner_width,
                    absolute_width_mode,
                    available_inner_height,
                    direction,
                );
            }

            // STEP 11: trailing positions.
            let needs_main_trailing_pos = main_axis.is_reverse();
            let needs_cross_trailing_pos = cross_axis.is_reverse();
            if needs_main_trailing_pos || needs_cross_trailing_pos {
                for index in 0..child_count {
                    let child = self.nth_child(node, index);
                    if self.node(child).style.display == Display::None {
                        continue;
                    }
                    if needs_main_trailing_pos {
                        self.set_child_trailing_position(node, child, main_axis);
                    }
                    if needs_cross_trailing_pos {
                        self.set_child_trailing_position(node, child, cross_axis);
                    }
                }
            }
        }
    }

    /// Main-axis flex basis of `child` clamped by its min and max.
    fn clamped_flex_basis(
        &self,
        child: NodeId,
        main_dim: Dimension,
        main_axis_parent_size: f32,
    ) -> f32 {
        let item = self.node(child);
        float_min(
            item.style.max_dimensions[main_dim.index()].resolve(main_axis_parent_size),
            float_max(
                item.style.min_dimensions[main_dim.index()].resolve(main_axis_parent_size),
                item.layout.computed_flex_basis,
            ),
        )
    }

    /// Distributes lines along the cross axis with `align-content` and places
    /// items within their line, including baseline alignment.
    #[allow(clippy::too_many_arguments)]
    fn align_lines(
        &mut self,
        node: NodeId,
        line_count: usize,
        direction: Direction,
        total_line_cross_dim: f32,
        available_inner_width: f32,
        available_inner_height: f32,
        available_inner_cross_dim: f32,
        leading_padding_and_border_cross: f32,
    ) {
        let style = self.node(node).style;
        let main_axis = style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let is_main_axis_row = main_axis.is_row();
        let cross_dim = cross_axis.dimension();
        let cross_leading = cross_axis.leading_edge().index();
        let child_count = self.child_count(node);

        let remaining_align_content_dim = available_inner_cross_dim - total_line_cross_dim;
        let has_free_space = available_inner_cross_dim > total_line_cross_dim;
        let lines = line_count as f32;

        let mut cross_dim_lead = 0.0;
        let mut current_lead = leading_padding_and_border_cross;
        match style.align_content {
            Align::FlexEnd => current_lead += remaining_align_content_dim,
            Align::Center => current_lead += remaining_align_content_dim / 2.0,
            Align::Stretch => {
                if has_free_space {
                    cross_dim_lead = remaining_align_content_dim / lines;
                }
            }
            Align::SpaceAround => {
                if has_free_space {
                    current_lead += remaining_align_content_dim / (2.0 * lines);
                    if line_count > 1 {
                        cross_dim_lead = remaining_align_content_dim / lines;
                    }
                } else {
                    current_lead += remaining_align_content_dim / 2.0;
                }
            }
            Align::SpaceBetween => {
                if has_free_space && line_count > 1 {
                    cross_dim_lead = remaining_align_content_dim / (lines - 1.0);
                }
            }
            Align::Auto | Align::FlexStart | Align::Baseline => {}
        }

        let mut end_index = 0;
        for line in 0..line_count {
            let start_index = end_index;

            // Height of the line and its baseline extents.
            let mut line_height: f32 = 0.0;
            let mut max_ascent: f32 = 0.0;
            let mut max_descent: f32 = 0.0;
            let mut index = start_index;
            while index < child_count {
                let child = self.nth_child(node, index);
                let item = self.node(child);
                if item.style.display == Display::None
                    || item.style.position_type != PositionType::Relative
                {
                    index += 1;
                    continue;
                }
                if item.line_index != line {
                    break;
                }

                if item.is_layout_dim_defined(cross_axis) {
                    let margin = item.margin_for_axis(cross_axis, available_inner_width);
                    line_height = float_max(line_height, item.measured(cross_dim) + margin);
                }

                if item.align_item(&style) == Align::Baseline {
                    let column = FlexDirection::Column;
                    let leading_margin = item.style.leading_margin(column, available_inner_width);
                    let outer_height = item.measured(Dimension::Height)
                        + item.margin_for_axis(column, available_inner_width);
                    let ascent = self.baseline(child) + leading_margin;
                    let descent = outer_height - ascent;
                    max_ascent = float_max(max_ascent, ascent);
                    max_descent = float_max(max_descent, descent);
                    line_height = float_max(line_height, max_ascent + max_descent);
                }
                index += 1;
            }
            end_index = index;
            line_height += cross_dim_lead;

            for index in start_index..end_index {
                let child = self.nth_child(node, index);
                let item = self.node(child);
                if item.style.display == Display::None
                    || item.style.position_type != PositionType::Relative
                {
                    continue;
                }

                match item.align_item(&style) {
                    Align::FlexStart => {
                        let position = current_lead
                            + item.style.leading_margin(cross_axis, available_inner_width);
                        self.node_mut(child).layout.position[cross_leading] = position;
                    }
                    Align::FlexEnd => {
                        let child_style = &item.style;
                        let margin = child_style.trailing_margin(cross_axis, available_inner_width);
                        let bottom = current_lead + line_height - margin;
                        let position = bottom - item.measured(cross_dim);
                        self.node_mut(child).layout.position[cross_leading] = position;
                    }
                    Align::Center => {
                        let position =
                            current_lead + (line_height - item.measured(cross_dim)) / 2.0;
                        self.node_mut(child).layout.position[cross_leading] = position;
                    }
                    Align::Stretch => {
                        let position = current_lead
                            + item.style.leading_margin(cross_axis, available_inner_width);
                        let is_cross_defined =
                            item.is_style_dim_defined(cross_axis, available_inner_cross_dim);
                        let measured_width = item.measured(Dimension::Width);
                        let measured_height = item.measured(Dimension::Height);
                        let margin_main = item.margin_for_axis(main_axis, available_inner_width);
                        self.node_mut(child).layout.position[cross_leading] = position;

                        // Items without a fixed cross size take the line's.
                        if !is_cross_defined {
                            let (child_width, child_height) = if is_main_axis_row {
                                (measured_width + margin_main, line_height)
                            } else {
                                (line_height, measured_height + margin_main)
                            };

                            let same_width = floats_equal(child_width, measured_width);
                            let same_height = floats_equal(child_height, measured_height);
                            if !(same_width && same_height) {
                                self.layout_node(
                                    child,
                                    child_width,
                                    child_height,
                                    direction,
                                    MeasureMode::Exactly,
                                    MeasureMode::Exactly,
                                    available_inner_width,
                                    available_inner_height,
                                    true,
                                    "multiline-stretch",
                                );
                            }
                        }
                    }
                    Align::Baseline => {
                        let column = FlexDirection::Column;
                        let child_style = &item.style;
                        let offset =
                            child_style.leading_position(column, available_inner_cross_dim);
                        let baseline = self.baseline(child);
                        self.node_mut(child).layout.position[Edge::Top.index()] =
                            current_lead + max_ascent - baseline + offset;
                    }
                    Align::Auto | Align::SpaceBetween | Align::SpaceAround => {}
                }
            }

            current_lead += line_height;
        }
    }
}
