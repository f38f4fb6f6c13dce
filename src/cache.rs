//! Per-node measurement memo.
//!
//! Every node keeps one slot for its last full layout and a bounded ring of
//! measure-only results. The ring overwrites its oldest entry once full.

use crate::enums::MeasureMode;
use crate::rounding::round_value_to_pixel_grid;
use crate::value::floats_equal;

pub(crate) const MAX_CACHED_MEASUREMENTS: usize = 16;

/// Constraints handed to a node together with the size it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CachedMeasurement {
    pub available_width: f32,
    pub available_height: f32,
    pub width_mode: MeasureMode,
    pub height_mode: MeasureMode,
    pub computed_width: f32,
    pub computed_height: f32,
}

impl CachedMeasurement {
    /// Exact constraint match, used for nodes without a measure callback.
    pub(crate) fn matches_exactly(
        &self,
        available_width: f32,
        available_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
    ) -> bool {
        self.width_mode == width_mode
            && self.height_mode == height_mode
            && floats_equal(self.available_width, available_width)
            && floats_equal(self.available_height, available_height)
    }

    /// Whether this entry can answer a request for a node with a measure
    /// callback. Besides identical constraints, a few looser requests are
    /// known to produce the same size.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn is_compatible(
        &self,
        width_mode: MeasureMode,
        width: f32,
        height_mode: MeasureMode,
        height: f32,
        margin_row: f32,
        margin_column: f32,
        point_scale_factor: f32,
    ) -> bool {
        if self.computed_width < 0.0 || self.computed_height < 0.0 {
            return false;
        }

        let snap = |value: f32| {
            if point_scale_factor != 0.0 {
                round_value_to_pixel_grid(value, point_scale_factor, false, false)
            } else {
                value
            }
        };

        let same_width_spec =
            self.width_mode == width_mode && floats_equal(snap(self.available_width), snap(width));
        let same_height_spec = self.height_mode == height_mode
            && floats_equal(snap(self.available_height), snap(height));

        let inner_width = width - margin_row;
        let inner_height = height - margin_column;

        let width_ok = same_width_spec
            || size_is_exact_and_matches_old(width_mode, inner_width, self.computed_width)
            || old_size_is_unspecified_and_still_fits(
                width_mode,
                inner_width,
                self.width_mode,
                self.computed_width,
            )
            || new_size_is_stricter_and_still_valid(
                width_mode,
                inner_width,
                self.width_mode,
                self.available_width,
                self.computed_width,
            );

        let height_ok = same_height_spec
            || size_is_exact_and_matches_old(height_mode, inner_height, self.computed_height)
            || old_size_is_unspecified_and_still_fits(
                height_mode,
                inner_height,
                self.height_mode,
                self.computed_height,
            )
            || new_size_is_stricter_and_still_valid(
                height_mode,
                inner_height,
                self.height_mode,
                self.available_height,
                self.computed_height,
            );

        width_ok && height_ok
    }
}

fn size_is_exact_and_matches_old(mode: MeasureMode, size: f32, last_computed: f32) -> bool {
    mode == MeasureMode::Exactly && floats_equal(size, last_computed)
}

fn old_size_is_unspecified_and_still_fits(
    mode: MeasureMode,
    size: f32,
    last_mode: MeasureMode,
    last_computed: f32,
) -> bool {
    mode == MeasureMode::AtMost
        && last_mode == MeasureMode::Undefined
        && (size >= last_computed || floats_equal(size, last_computed))
}

fn new_size_is_stricter_and_still_valid(
    mode: MeasureMode,
    size: f32,
    last_mode: MeasureMode,
    last_size: f32,
    last_computed: f32,
) -> bool {
    last_mode == MeasureMode::AtMost
        && mode == MeasureMode::AtMost
        && last_size > size
        && (last_computed <= size || floats_equal(size, last_computed))
}

/// Fixed-capacity ring of measure-only results.
#[derive(Debug, Clone)]
pub(crate) struct MeasureCache {
    entries: [Option<CachedMeasurement>; MAX_CACHED_MEASUREMENTS],
    next: usize,
    len: usize,
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self {
            entries: [None; MAX_CACHED_MEASUREMENTS],
            next: 0,
            len: 0,
        }
    }
}

impl MeasureCache {
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `entry`, evicting the oldest one when the ring is full.
    pub(crate) fn push(&mut self, entry: CachedMeasurement) {
        if self.len == MAX_CACHED_MEASUREMENTS {
            tracing::trace!("measurement cache full, evicting oldest entry");
        }
        self.entries[self.next] = Some(entry);
        self.next = (self.next + 1) % MAX_CACHED_MEASUREMENTS;
        self.len = (self.len + 1).min(MAX_CACHED_MEASUREMENTS);
    }

    /// Entries from oldest to newest.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &CachedMeasurement> + '_ {
        let start = if self.len == MAX_CACHED_MEASUREMENTS {
            self.next
        } else {
            0
        };
        (0..self.len).filter_map(move |offset| {
            self.entries[(start + offset) % MAX_CACHED_MEASUREMENTS].as_ref()
        })
    }
}
