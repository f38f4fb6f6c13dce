use crate::cache::{CachedMeasurement, MeasureCache};
use crate::enums::{Dimension, Direction, Edge};
use crate::value::UNDEFINED;

/// The computed box of a node.
///
/// The algorithm writes unrounded geometry; the pixel rounding pass derives
/// the snapped geometry the getters return. Keeping both means a pass that
/// reuses cached subtrees always rounds from the exact values.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Indexed by `Left`, `Top`, `Right`, `Bottom`.
    pub(crate) position: [f32; 4],
    pub(crate) dimensions: [f32; 2],
    pub(crate) rounded_position: [f32; 4],
    pub(crate) rounded_dimensions: [f32; 2],
    /// Indexed by `Left` through `End`; only `Start`, `End`, `Top` and
    /// `Bottom` are written.
    pub(crate) margin: [f32; 6],
    pub(crate) border: [f32; 6],
    pub(crate) padding: [f32; 6],
    pub(crate) direction: Direction,
    pub(crate) had_overflow: bool,

    pub(crate) computed_flex_basis: f32,
    pub(crate) computed_flex_basis_generation: u32,
    pub(crate) generation_count: u32,
    pub(crate) last_parent_direction: Option<Direction>,
    pub(crate) measured_dimensions: [f32; 2],
    pub(crate) cached_layout: Option<CachedMeasurement>,
    pub(crate) cached_measurements: MeasureCache,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            position: [0.0; 4],
            dimensions: [UNDEFINED; 2],
            rounded_position: [0.0; 4],
            rounded_dimensions: [UNDEFINED; 2],
            margin: [0.0; 6],
            border: [0.0; 6],
            padding: [0.0; 6],
            direction: Direction::Inherit,
            had_overflow: false,
            computed_flex_basis: UNDEFINED,
            computed_flex_basis_generation: 0,
            generation_count: 0,
            last_parent_direction: None,
            measured_dimensions: [UNDEFINED; 2],
            cached_layout: None,
            cached_measurements: MeasureCache::default(),
        }
    }
}

impl Layout {
    /// Geometry of a `display: none` node: everything zero, caches empty.
    pub(crate) fn zeroed() -> Self {
        Self {
            dimensions: [0.0; 2],
            rounded_dimensions: [0.0; 2],
            measured_dimensions: [0.0; 2],
            ..Self::default()
        }
    }

    pub fn left(&self) -> f32 {
        self.rounded_position[Edge::Left.index()]
    }

    pub fn top(&self) -> f32 {
        self.rounded_position[Edge::Top.index()]
    }

    pub fn right(&self) -> f32 {
        self.rounded_position[Edge::Right.index()]
    }

    pub fn bottom(&self) -> f32 {
        self.rounded_position[Edge::Bottom.index()]
    }

    pub fn width(&self) -> f32 {
        self.rounded_dimensions[Dimension::Width.index()]
    }

    pub fn height(&self) -> f32 {
        self.rounded_dimensions[Dimension::Height.index()]
    }

    /// Width before pixel rounding.
    pub fn unrounded_width(&self) -> f32 {
        self.dimensions[Dimension::Width.index()]
    }

    pub fn unrounded_height(&self) -> f32 {
        self.dimensions[Dimension::Height.index()]
    }

    /// Direction the node was laid out in; never `Inherit` after layout.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether children overflowed the main axis during the last layout.
    pub fn had_overflow(&self) -> bool {
        self.had_overflow
    }

    /// `margin`, `border` or `padding` for one physical or logical edge.
    /// Shorthand edges have no computed value and yield `None`.
    pub(crate) fn resolved_edge(&self, values: &[f32; 6], edge: Edge) -> Option<f32> {
        let rtl = self.direction == Direction::Rtl;
        match edge {
            Edge::Left => Some(values[if rtl { Edge::End } else { Edge::Start }.index()]),
            Edge::Right => Some(values[if rtl { Edge::Start } else { Edge::End }.index()]),
            Edge::Top | Edge::Bottom | Edge::Start | Edge::End => Some(values[edge.index()]),
            Edge::Horizontal | Edge::Vertical | Edge::All => None,
        }
    }
}
