//! Pixel grid snapping.
//!
//! Absolute edges are snapped independently and sizes are derived from the
//! snapped edges, so siblings that touch before rounding still touch after it.

use crate::enums::{Dimension, Edge, NodeType};
use crate::tree::{LayoutTree, NodeId};
use crate::value::{is_undefined, EPSILON};

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON as f64
}

/// Snaps `value` to a multiple of `1 / point_scale_factor`.
///
/// `force_ceil` and `force_floor` apply only when the value is not already on
/// the grid. Undefined stays undefined.
pub fn round_value_to_pixel_grid(
    value: f32,
    point_scale_factor: f32,
    force_ceil: bool,
    force_floor: bool,
) -> f32 {
    if is_undefined(value) || is_undefined(point_scale_factor) {
        return f32::NAN;
    }

    let mut scaled = value as f64 * point_scale_factor as f64;
    let mut fraction = scaled % 1.0;
    if fraction < 0.0 {
        // fmod keeps the sign of the dividend; move negatives into [0, 1).
        fraction += 1.0;
    }

    if near(fraction, 0.0) {
        scaled -= fraction;
    } else if near(fraction, 1.0) {
        scaled = scaled - fraction + 1.0;
    } else if force_ceil {
        scaled = scaled - fraction + 1.0;
    } else if force_floor {
        scaled -= fraction;
    } else {
        scaled = scaled - fraction + if fraction >= 0.5 { 1.0 } else { 0.0 };
    }

    (scaled / point_scale_factor as f64) as f32
}

fn has_fraction(size: f32, point_scale_factor: f32) -> bool {
    let scaled = (size as f64 * point_scale_factor as f64) % 1.0;
    !near(scaled, 0.0) && !near(scaled, 1.0)
}

impl LayoutTree {
    /// Writes the pixel-snapped position and size of `node` and its subtree.
    ///
    /// `absolute_left`/`absolute_top` are the parent's unrounded absolute
    /// origin; `rounded_left`/`rounded_top` the same origin after snapping.
    pub(crate) fn round_to_pixel_grid(
        &mut self,
        node: NodeId,
        point_scale_factor: f32,
        absolute_left: f32,
        absolute_top: f32,
        rounded_left: f32,
        rounded_top: f32,
    ) {
        let (abs_left, abs_top, snapped_left, snapped_top) = {
            let entry = self.node_mut(node);
            let layout = &mut entry.layout;

            if point_scale_factor == 0.0 {
                layout.rounded_position = layout.position;
                layout.rounded_dimensions = layout.dimensions;
                (0.0, 0.0, 0.0, 0.0)
            } else {
                let left = layout.position[Edge::Left.index()];
                let top = layout.position[Edge::Top.index()];
                let width = layout.dimensions[Dimension::Width.index()];
                let height = layout.dimensions[Dimension::Height.index()];

                let abs_left = absolute_left + left;
                let abs_top = absolute_top + top;
                let abs_right = abs_left + width;
                let abs_bottom = abs_top + height;

                // Text never loses content to rounding.
                let text = entry.node_type == NodeType::Text;
                let fractional_width = has_fraction(width, point_scale_factor);
                let fractional_height = has_fraction(height, point_scale_factor);

                let snapped_left =
                    round_value_to_pixel_grid(abs_left, point_scale_factor, false, text);
                let snapped_top =
                    round_value_to_pixel_grid(abs_top, point_scale_factor, false, text);
                let snapped_right = round_value_to_pixel_grid(
                    abs_right,
                    point_scale_factor,
                    text && fractional_width,
                    text && !fractional_width,
                );
                let snapped_bottom = round_value_to_pixel_grid(
                    abs_bottom,
                    point_scale_factor,
                    text && fractional_height,
                    text && !fractional_height,
                );

                layout.rounded_position[Edge::Left.index()] = snapped_left - rounded_left;
                layout.rounded_position[Edge::Top.index()] = snapped_top - rounded_top;
                layout.rounded_position[Edge::Right.index()] = round_value_to_pixel_grid(
                    layout.position[Edge::Right.index()],
                    point_scale_factor,
                    false,
                    false,
                );
                layout.rounded_position[Edge::Bottom.index()] = round_value_to_pixel_grid(
                    layout.position[Edge::Bottom.index()],
                    point_scale_factor,
                    false,
                    false,
                );
                layout.rounded_dimensions[Dimension::Width.index()] = snapped_right - snapped_left;
                layout.rounded_dimensions[Dimension::Height.index()] = snapped_bottom - snapped_top;

                (abs_left, abs_top, snapped_left, snapped_top)
            }
        };

        for index in 0..self.child_count(node) {
            let child = self.nth_child(node, index);
            self.round_to_pixel_grid(
                child,
                point_scale_factor,
                abs_left,
                abs_top,
                snapped_left,
                snapped_top,
            );
        }
    }
}
