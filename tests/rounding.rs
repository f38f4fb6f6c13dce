//! Pixel Rounding Tests

use trellis::{
    Config, Direction, FlexDirection, LayoutTree, MeasureMode, NodeId, NodeType, Size, Value,
};

fn thirds(config: Config) -> (LayoutTree, Vec<NodeId>) {
    let mut tree = LayoutTree::with_config(config);
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row);
    tree.set_width(root, Value::point(100.0));
    tree.set_height(root, Value::point(20.0));
    let children = (0..3)
        .map(|_| {
            let child = tree.new_node();
            tree.set_flex_grow(child, 1.0);
            tree.add_child(root, child);
            child
        })
        .collect();
    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
    (tree, children)
}

fn scaled(point_scale_factor: f32) -> Config {
    let mut config = Config::default();
    config.set_point_scale_factor(point_scale_factor);
    config
}

#[test]
fn siblings_stay_contiguous() {
    let (tree, children) = thirds(Config::default());

    let edges: Vec<(f32, f32)> = children
        .iter()
        .map(|&child| (tree.layout(child).left(), tree.layout(child).width()))
        .collect();
    assert_eq!(edges, vec![(0.0, 33.0), (33.0, 34.0), (67.0, 33.0)]);

    for pair in edges.windows(2) {
        assert_eq!(pair[0].0 + pair[0].1, pair[1].0);
    }
}

#[test]
fn half_point_grid() {
    let (tree, children) = thirds(scaled(2.0));

    let mut right = 0.0;
    for &child in &children {
        let layout = tree.layout(child);
        for value in [layout.left(), layout.width()] {
            let fraction = (value * 2.0).fract();
            assert_eq!(fraction, 0.0, "{value} is off the half-point grid");
        }
        assert_eq!(layout.left(), right);
        right = layout.left() + layout.width();
    }
    assert_eq!(right, 100.0);
    assert_eq!(tree.layout(children[0]).width(), 33.5);
}

#[test]
fn zero_scale_keeps_raw_values() {
    let (tree, children) = thirds(scaled(0.0));

    let layout = tree.layout(children[1]);
    assert!((layout.left() - 100.0 / 3.0).abs() < 1e-4);
    assert!((layout.width() - 100.0 / 3.0).abs() < 1e-4);
}

#[test]
fn text_rounds_outward() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_width(root, Value::point(100.0));
    tree.set_height(root, Value::point(100.0));
    tree.set_align_items(root, trellis::Align::FlexStart);

    let text = tree.new_node();
    tree.set_node_type(text, NodeType::Text);
    tree.set_measure_func(text, |_: f32, _: MeasureMode, _: f32, _: MeasureMode| {
        Size::new(10.3, 10.0)
    });
    tree.add_child(root, text);

    let block = tree.new_node();
    tree.set_width(block, Value::point(10.3));
    tree.set_height(block, Value::point(10.0));
    tree.add_child(root, block);

    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);

    assert_eq!(tree.layout(text).width(), 11.0);
    assert_eq!(tree.layout(block).width(), 10.0);
    assert_eq!(tree.layout(block).top(), 10.0);
}

#[test]
fn unrounded_geometry_is_kept() {
    let (tree, children) = thirds(Config::default());

    let layout = tree.layout(children[1]);
    assert_eq!(layout.width(), 34.0);
    assert!((layout.unrounded_width() - 100.0 / 3.0).abs() < 1e-4);
}
