//! # Trellis
//!
//! `trellis` is a flexbox layout engine: given a tree of styled boxes it computes
//! a position and a size for every node.
//!
//! It follows the CSS Flexbox algorithm closely enough for UI toolkits, and
//! memoizes aggressively so that laying out an unchanged tree again is
//! close to free.
//!
//! ## Core Features
//!
//! *   **Arena tree**: nodes live in a [`LayoutTree`] and are addressed by [`NodeId`].
//! *   **Flexbox**: direction, wrapping, justification, alignment, flexible
//!     lengths, min/max constraints, aspect ratio, absolute positioning and
//!     baseline alignment.
//! *   **Measure callbacks**: leaf content (text, images) is sized by the caller
//!     through [`MeasureFunc`].
//! *   **Incremental layout**: style changes dirty a node and its ancestors;
//!     clean subtrees are answered from per-node caches.
//! *   **Pixel rounding**: results snap to the device pixel grid without gaps
//!     between siblings.
//!
//! ## Usage
//!
//! ```rust
//! use trellis::{Direction, FlexDirection, LayoutTree, Value};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.new_node();
//! tree.set_flex_direction(root, FlexDirection::Row);
//! tree.set_width(root, Value::point(300.0));
//! tree.set_height(root, Value::point(100.0));
//!
//! for _ in 0..3 {
//!     let child = tree.new_node();
//!     tree.set_flex_grow(child, 1.0);
//!     tree.set_flex_basis(child, Value::point(0.0));
//!     tree.add_child(root, child);
//! }
//!
//! tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
//! let second = tree.children(root)[1];
//! assert_eq!(tree.layout(second).left(), 100.0);
//! assert_eq!(tree.layout(second).width(), 100.0);
//! ```

/// The flex algorithm and its memoized entry point.
mod algorithm;

/// Per-node measurement caches.
mod cache;

/// Tunables and the logger interface.
pub mod config;

/// Style and layout keywords.
pub mod enums;

pub mod errors;

/// Computed geometry of a node.
pub mod layout;

/// Node storage and callbacks.
pub mod node;

/// Debug dump of a laid-out tree.
pub mod print;

/// Pixel grid snapping.
pub mod rounding;

/// Flex properties and edge resolution.
pub mod style;

/// The node arena and its public API.
pub mod tree;

/// Numeric values with units.
pub mod value;

pub use config::{Config, ConfigId, Logger, TracingLogger, DEFAULT_MAX_DEPTH};
pub use enums::{
    Align, Dimension, Direction, Display, Edge, ExperimentalFeature, FlexDirection, Justify,
    LogLevel, MeasureMode, NodeType, Overflow, PositionType, Wrap,
};
pub use errors::ParseError;
pub use layout::Layout;
pub use node::{BaselineFunc, DirtiedFunc, MeasureFunc, Node};
pub use print::PrintOptions;
pub use rounding::round_value_to_pixel_grid;
pub use style::{Edges, Style};
pub use tree::{LayoutStats, LayoutTree, NodeId};
pub use value::{floats_equal, is_undefined, Size, Unit, Value, UNDEFINED};
