//! # Value Module
//!
//! The tagged numeric used by every style length, plus the float helpers the
//! algorithm relies on.
//!
//! ## Responsibilities
//! - **Undefined sentinel**: "unknown" is `NaN` and must flow through arithmetic
//!   as unknown, never as zero.
//! - **Resolution**: points resolve to themselves, percentages against a parent
//!   size, everything else to undefined.
//! - **Text form**: `"10"`, `"10px"`, `"50%"`, `"auto"`, `"undefined"`.

use crate::errors::ParseError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The "unknown size" sentinel.
pub const UNDEFINED: f32 = f32::NAN;

/// Tolerance used for every float comparison in the engine.
pub(crate) const EPSILON: f32 = 0.0001;

#[inline]
pub fn is_undefined(value: f32) -> bool {
    value.is_nan()
}

/// Epsilon comparison where two undefined values are equal to each other.
#[inline]
pub fn floats_equal(a: f32, b: f32) -> bool {
    if is_undefined(a) {
        return is_undefined(b);
    }
    (a - b).abs() < EPSILON
}

/// `max` that treats an undefined operand as absent.
#[inline]
pub(crate) fn float_max(a: f32, b: f32) -> f32 {
    if is_undefined(a) {
        return b;
    }
    if is_undefined(b) {
        return a;
    }
    a.max(b)
}

/// `min` that treats an undefined operand as absent.
#[inline]
pub(crate) fn float_min(a: f32, b: f32) -> f32 {
    if is_undefined(a) {
        return b;
    }
    if is_undefined(b) {
        return a;
    }
    a.min(b)
}

/// The unit attached to a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    #[default]
    Undefined,
    Point,
    Percent,
    Auto,
}

/// A style length: a number tagged with its unit.
#[derive(Debug, Clone, Copy)]
pub struct Value {
    pub value: f32,
    pub unit: Unit,
}

impl Value {
    pub const UNDEFINED: Value = Value {
        value: UNDEFINED,
        unit: Unit::Undefined,
    };
    pub const AUTO: Value = Value {
        value: UNDEFINED,
        unit: Unit::Auto,
    };
    pub const ZERO: Value = Value {
        value: 0.0,
        unit: Unit::Point,
    };

    /// A point length. `NaN` collapses to [`Value::UNDEFINED`].
    pub fn point(value: f32) -> Self {
        if is_undefined(value) {
            Self::UNDEFINED
        } else {
            Self {
                value,
                unit: Unit::Point,
            }
        }
    }

    /// A percentage of the parent size (`50.0` means half).
    pub fn percent(value: f32) -> Self {
        if is_undefined(value) {
            Self::UNDEFINED
        } else {
            Self {
                value,
                unit: Unit::Percent,
            }
        }
    }

    pub fn is_defined(&self) -> bool {
        self.unit != Unit::Undefined
    }

    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    /// Resolves against `parent_size`. Percentages of an undefined parent are
    /// undefined, not zero.
    pub fn resolve(&self, parent_size: f32) -> f32 {
        match self.unit {
            Unit::Point => self.value,
            Unit::Percent => {
                if is_undefined(parent_size) {
                    UNDEFINED
                } else {
                    self.value * parent_size / 100.0
                }
            }
            Unit::Undefined | Unit::Auto => UNDEFINED,
        }
    }

    /// Margin flavour of [`Value::resolve`]: `auto` contributes nothing here
    /// and is distributed separately by the flex algorithm.
    pub(crate) fn resolve_margin(&self, parent_size: f32) -> f32 {
        if self.unit == Unit::Auto {
            0.0
        } else {
            self.resolve(parent_size)
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.unit != other.unit {
            return false;
        }
        match self.unit {
            Unit::Undefined | Unit::Auto => true,
            Unit::Point | Unit::Percent => floats_equal(self.value, other.value),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Undefined => write!(f, "undefined"),
            Unit::Auto => write!(f, "auto"),
            Unit::Point => write!(f, "{}", self.value),
            Unit::Percent => write!(f, "{}%", self.value),
        }
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parse_number = |number: &str| {
            number
                .trim()
                .parse::<f32>()
                .map_err(|_| ParseError::InvalidValue(s.to_string()))
        };

        match text {
            "auto" => Ok(Value::AUTO),
            "undefined" => Ok(Value::UNDEFINED),
            _ => {
                if let Some(number) = text.strip_suffix('%') {
                    parse_number(number).map(Value::percent)
                } else if let Some(number) = text.strip_suffix("px") {
                    parse_number(number).map(Value::point)
                } else {
                    parse_number(text).map(Value::point)
                }
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.unit {
            Unit::Point => serializer.serialize_f32(self.value),
            _ => serializer.collect_str(self),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number of points or a string such as \"50%\" or \"auto\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::point(v as f32))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::point(v as f32))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::point(v as f32))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::UNDEFINED)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// A width/height pair, as returned by measure callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
