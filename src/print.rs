//! HTML-like dump of a laid-out tree, for debugging.
//!
//! ```text
//! <div layout="width: 100; height: 100; top: 0; left: 0;" style="padding: 10px; " >
//!   <div layout="width: 80; height: 20; top: 10; left: 10;" style="height: 20px; " ></div>
//! </div>
//! ```
//! Only style properties that differ from the defaults are written.

use crate::enums::{Dimension, Edge, LogLevel};
use crate::style::{Edges, Style};
use crate::tree::{LayoutTree, NodeId};
use crate::value::{floats_equal, is_undefined, Unit, Value};

/// Sections of each node to include in [`LayoutTree::print`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub layout: bool,
    pub style: bool,
    pub children: bool,
}

impl PrintOptions {
    pub const ALL: PrintOptions = PrintOptions {
        layout: true,
        style: true,
        children: true,
    };
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::ALL
    }
}

/// `%g`-style number: integers without a fraction, otherwise at most six
/// significant digits.
fn number(value: f32) -> String {
    if is_undefined(value) {
        return "nan".to_string();
    }
    if value == value.trunc() && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let magnitude = value.abs().log10().floor() as i32 + 1;
    let precision = (6 - magnitude).clamp(0, 6) as usize;
    let text = format!("{value:.precision$}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn push_value(out: &mut String, key: &str, value: Value) {
    match value.unit {
        Unit::Undefined => {}
        Unit::Auto => out.push_str(&format!("{key}: auto; ")),
        Unit::Point => out.push_str(&format!("{key}: {}px; ", number(value.value))),
        Unit::Percent => out.push_str(&format!("{key}: {}%; ", number(value.value))),
    }
}

fn push_value_if_not_auto(out: &mut String, key: &str, value: Value) {
    if value.unit != Unit::Auto {
        push_value(out, key, value);
    }
}

fn push_value_if_not_zero(out: &mut String, key: &str, value: Value) {
    if !floats_equal(value.value, 0.0) {
        push_value(out, key, value);
    }
}

fn push_number(out: &mut String, key: &str, value: f32) {
    if !is_undefined(value) {
        out.push_str(&format!("{key}: {}; ", number(value)));
    }
}

/// Collapses to the shorthand when the four physical edges agree.
fn push_edges(out: &mut String, key: &str, edges: &Edges) {
    let physical = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom]
        .map(|edge| (edge, edges.computed(edge, Value::ZERO)));
    let logical = [Edge::Start, Edge::End].map(|edge| (edge, edges[edge]));

    let uniform = physical.iter().all(|(_, value)| *value == physical[0].1);
    if uniform && logical.iter().all(|(_, value)| !value.is_defined()) {
        push_value_if_not_zero(out, key, physical[0].1);
        return;
    }
    for (edge, value) in physical.into_iter().chain(logical) {
        push_value_if_not_zero(out, &format!("{key}-{edge}"), value);
    }
}

fn push_style(out: &mut String, style: &Style, defaults: &Style) {
    macro_rules! keyword {
        ($field:ident, $key:literal) => {
            if style.$field != defaults.$field {
                out.push_str(&format!(concat!($key, ": {}; "), style.$field));
            }
        };
    }

    keyword!(flex_direction, "flex-direction");
    keyword!(justify_content, "justify-content");
    keyword!(align_items, "align-items");
    keyword!(align_content, "align-content");
    keyword!(align_self, "align-self");
    push_number(out, "flex-grow", style.flex_grow);
    push_number(out, "flex-shrink", style.flex_shrink);
    push_value_if_not_auto(out, "flex-basis", style.flex_basis);
    push_number(out, "flex", style.flex);
    keyword!(flex_wrap, "flex-wrap");
    keyword!(overflow, "overflow");
    keyword!(display, "display");

    push_edges(out, "margin", &style.margin);
    push_edges(out, "padding", &style.padding);
    push_edges(out, "border", &style.border);

    let width = Dimension::Width.index();
    let height = Dimension::Height.index();
    push_value_if_not_auto(out, "width", style.dimensions[width]);
    push_value_if_not_auto(out, "height", style.dimensions[height]);
    push_value_if_not_auto(out, "max-width", style.max_dimensions[width]);
    push_value_if_not_auto(out, "max-height", style.max_dimensions[height]);
    push_value_if_not_auto(out, "min-width", style.min_dimensions[width]);
    push_value_if_not_auto(out, "min-height", style.min_dimensions[height]);

    keyword!(position_type, "position");
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        let offset = style.position.computed(edge, Value::UNDEFINED);
        push_value(out, edge.as_str(), offset);
    }
}

impl LayoutTree {
    /// Renders `node` and, if requested, its subtree. The dump is also logged
    /// at `Debug` through the node's config.
    pub fn print(&self, node: NodeId, options: PrintOptions) -> String {
        let mut out = String::new();
        self.print_node(&mut out, node, options, 0);
        let config = self.node_config(node);
        config.log(Some(node), LogLevel::Debug, &out);
        out
    }

    fn print_node(&self, out: &mut String, node: NodeId, options: PrintOptions, level: usize) {
        let entry = self.node(node);
        let indent = "  ".repeat(level);
        out.push_str(&indent);
        out.push_str("<div ");

        if options.layout {
            let layout = &entry.layout;
            out.push_str(&format!(
                "layout=\"width: {}; height: {}; top: {}; left: {};\" ",
                number(layout.width()),
                number(layout.height()),
                number(layout.top()),
                number(layout.left()),
            ));
        }

        if options.style {
            let defaults = if self.web_defaults(node) {
                Style::web_default()
            } else {
                Style::default()
            };
            out.push_str("style=\"");
            push_style(out, &entry.style, &defaults);
            out.push_str("\" ");
            if entry.has_measure_func() {
                out.push_str("has-custom-measure=\"true\"");
            }
        }
        out.push('>');

        let children = entry.children();
        if options.children && !children.is_empty() {
            for &child in children {
                out.push('\n');
                self.print_node(out, child, options, level + 1);
            }
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str("</div>");
    }
}
