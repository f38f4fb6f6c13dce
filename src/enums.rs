//! Style and layout keywords.
//!
//! Every keyword has a kebab-case text form (`"space-between"`, `"row-reverse"`)
//! shared by `Display`, `FromStr` and serde.

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! keywords {
    (
        $(#[$meta:meta])*
        $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseError::UnknownKeyword {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

keywords! {
    /// Writing direction. `Inherit` takes the parent's resolved direction.
    Direction: "direction" {
        Inherit => "inherit",
        Ltr => "ltr",
        Rtl => "rtl",
    }
}

keywords! {
    FlexDirection: "flex-direction" {
        Column => "column",
        ColumnReverse => "column-reverse",
        Row => "row",
        RowReverse => "row-reverse",
    }
}

keywords! {
    /// Main-axis distribution of free space.
    Justify: "justify-content" {
        FlexStart => "flex-start",
        Center => "center",
        FlexEnd => "flex-end",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
        SpaceEvenly => "space-evenly",
    }
}

keywords! {
    /// Cross-axis alignment, shared by `align-items`, `align-self` and
    /// `align-content`.
    Align: "align" {
        Auto => "auto",
        FlexStart => "flex-start",
        Center => "center",
        FlexEnd => "flex-end",
        Stretch => "stretch",
        Baseline => "baseline",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
    }
}

keywords! {
    PositionType: "position" {
        Relative => "relative",
        Absolute => "absolute",
    }
}

keywords! {
    Wrap: "flex-wrap" {
        NoWrap => "no-wrap",
        Wrap => "wrap",
        WrapReverse => "wrap-reverse",
    }
}

keywords! {
    Overflow: "overflow" {
        Visible => "visible",
        Hidden => "hidden",
        Scroll => "scroll",
    }
}

keywords! {
    Display: "display" {
        Flex => "flex",
        None => "none",
    }
}

keywords! {
    /// Logical and physical box edges. The first six index the computed
    /// layout edge arrays; all nine index style edge arrays.
    Edge: "edge" {
        Left => "left",
        Top => "top",
        Right => "right",
        Bottom => "bottom",
        Start => "start",
        End => "end",
        Horizontal => "horizontal",
        Vertical => "vertical",
        All => "all",
    }
}

keywords! {
    Dimension: "dimension" {
        Width => "width",
        Height => "height",
    }
}

keywords! {
    /// How a size constraint handed to a node is to be read.
    MeasureMode: "measure-mode" {
        /// No constraint; size to content.
        Undefined => "undefined",
        /// The size is fixed.
        Exactly => "exactly",
        /// The size is an upper bound.
        AtMost => "at-most",
    }
}

keywords! {
    /// `Text` nodes get content-preserving pixel rounding.
    NodeType: "node-type" {
        Default => "default",
        Text => "text",
    }
}

keywords! {
    LogLevel: "log-level" {
        Error => "error",
        Warn => "warn",
        Info => "info",
        Debug => "debug",
        Verbose => "verbose",
        Fatal => "fatal",
    }
}

keywords! {
    ExperimentalFeature: "experimental-feature" {
        /// Recompute an explicit flex basis on every pass, like browsers do.
        WebFlexBasis => "web-flex-basis",
    }
}

impl Edge {
    pub(crate) const COUNT: usize = 9;

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl Dimension {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl ExperimentalFeature {
    pub(crate) const COUNT: usize = 1;
}

impl FlexDirection {
    #[inline]
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    #[inline]
    pub fn is_column(self) -> bool {
        matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
    }

    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }

    /// Row directions flip under RTL; column directions never do.
    pub fn resolve(self, direction: Direction) -> FlexDirection {
        if direction == Direction::Rtl {
            match self {
                FlexDirection::Row => FlexDirection::RowReverse,
                FlexDirection::RowReverse => FlexDirection::Row,
                other => other,
            }
        } else {
            self
        }
    }

    pub fn cross(self, direction: Direction) -> FlexDirection {
        if self.is_column() {
            FlexDirection::Row.resolve(direction)
        } else {
            FlexDirection::Column
        }
    }

    /// Physical edge where items start along this axis.
    pub(crate) fn leading_edge(self) -> Edge {
        match self {
            FlexDirection::Column => Edge::Top,
            FlexDirection::ColumnReverse => Edge::Bottom,
            FlexDirection::Row => Edge::Left,
            FlexDirection::RowReverse => Edge::Right,
        }
    }

    pub(crate) fn trailing_edge(self) -> Edge {
        match self {
            FlexDirection::Column => Edge::Bottom,
            FlexDirection::ColumnReverse => Edge::Top,
            FlexDirection::Row => Edge::Right,
            FlexDirection::RowReverse => Edge::Left,
        }
    }

    pub(crate) fn dimension(self) -> Dimension {
        if self.is_row() {
            Dimension::Width
        } else {
            Dimension::Height
        }
    }
}
