//! Flex Layout Tests
//!
//! End-to-end layouts checked against hand-computed geometry.

use trellis::{
    Align, BaselineFunc, Config, Direction, Display, Edge, FlexDirection, Justify, LayoutTree,
    MeasureMode, NodeId, PositionType, Size, Value, Wrap, DEFAULT_MAX_DEPTH,
};

/// `(left, top, width, height)` of a laid-out node.
fn rect(tree: &LayoutTree, node: NodeId) -> (f32, f32, f32, f32) {
    let layout = tree.layout(node);
    (layout.left(), layout.top(), layout.width(), layout.height())
}

fn sized(tree: &mut LayoutTree, width: f32, height: f32) -> NodeId {
    let node = tree.new_node();
    tree.set_width(node, Value::point(width));
    tree.set_height(node, Value::point(height));
    node
}

fn row(tree: &mut LayoutTree, width: f32, height: f32) -> NodeId {
    let node = sized(tree, width, height);
    tree.set_flex_direction(node, FlexDirection::Row);
    node
}

fn layout(tree: &mut LayoutTree, root: NodeId) {
    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
}

#[test]
fn flex_grow_fills_exact_root() {
    let mut tree = LayoutTree::new();
    let root = sized(&mut tree, 100.0, 100.0);
    let child = tree.new_node();
    tree.set_flex_grow(child, 1.0);
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(rect(&tree, root), (0.0, 0.0, 100.0, 100.0));
    assert_eq!(rect(&tree, child), (0.0, 0.0, 100.0, 100.0));
}

#[test]
fn equal_flex_grow_splits_row() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 300.0, 100.0);
    let children: Vec<NodeId> = (0..3)
        .map(|_| {
            let child = tree.new_node();
            tree.set_flex_grow(child, 1.0);
            tree.set_flex_basis(child, Value::point(0.0));
            tree.add_child(root, child);
            child
        })
        .collect();

    layout(&mut tree, root);

    for (index, &child) in children.iter().enumerate() {
        let expected = (100.0 * index as f32, 0.0, 100.0, 100.0);
        assert_eq!(rect(&tree, child), expected);
    }
}

#[test]
fn aspect_ratio_derives_width_from_height() {
    let mut tree = LayoutTree::new();
    let root = sized(&mut tree, 200.0, 200.0);
    tree.set_align_items(root, Align::FlexStart);
    let child = tree.new_node();
    tree.set_height(child, Value::point(50.0));
    tree.set_aspect_ratio(child, 2.0);
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(rect(&tree, child), (0.0, 0.0, 100.0, 50.0));
}

#[test]
fn space_between_pushes_items_to_the_ends() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 300.0, 100.0);
    tree.set_justify_content(root, Justify::SpaceBetween);
    let first = sized(&mut tree, 50.0, 50.0);
    let second = sized(&mut tree, 50.0, 50.0);
    tree.add_child(root, first);
    tree.add_child(root, second);

    layout(&mut tree, root);

    assert_eq!(tree.layout(first).left(), 0.0);
    assert_eq!(tree.layout(second).left(), 250.0);
    let gap = tree.layout(second).left() - (tree.layout(first).left() + tree.layout(first).width());
    assert_eq!(gap, 200.0);
}

#[test]
fn justify_content_variants() {
    let cases = [
        (Justify::FlexStart, [0.0, 40.0, 80.0]),
        (Justify::Center, [140.0, 180.0, 220.0]),
        (Justify::FlexEnd, [280.0, 320.0, 360.0]),
        (Justify::SpaceAround, [140.0 / 3.0, 180.0, 940.0 / 3.0]),
        (Justify::SpaceEvenly, [70.0, 180.0, 290.0]),
    ];

    for (justify, expected) in cases {
        let mut tree = LayoutTree::with_config({
            let mut config = Config::default();
            config.set_point_scale_factor(0.0);
            config
        });
        let root = row(&mut tree, 400.0, 100.0);
        tree.set_justify_content(root, justify);
        let children: Vec<NodeId> = (0..3)
            .map(|_| {
                let child = sized(&mut tree, 40.0, 40.0);
                tree.add_child(root, child);
                child
            })
            .collect();

        layout(&mut tree, root);

        for (child, left) in children.iter().zip(expected) {
            let actual = tree.layout(*child).left();
            let error = (actual - left).abs();
            assert!(error < 1e-3, "{justify}: expected {left}, got {actual}");
        }
    }
}

#[test]
fn align_items_places_on_cross_axis() {
    for (align, left, width) in [
        (Align::FlexStart, 0.0, 50.0),
        (Align::Center, 75.0, 50.0),
        (Align::FlexEnd, 150.0, 50.0),
        (Align::Stretch, 0.0, 200.0),
    ] {
        let mut tree = LayoutTree::new();
        let root = sized(&mut tree, 200.0, 200.0);
        tree.set_align_items(root, align);
        let child = tree.new_node();
        if align != Align::Stretch {
            tree.set_width(child, Value::point(50.0));
        }
        tree.set_height(child, Value::point(50.0));
        tree.add_child(root, child);

        layout(&mut tree, root);

        assert_eq!(rect(&tree, child), (left, 0.0, width, 50.0), "{align}");
    }
}

#[test]
fn align_self_overrides_parent() {
    let mut tree = LayoutTree::new();
    let root = sized(&mut tree, 200.0, 200.0);
    tree.set_align_items(root, Align::FlexStart);
    let child = sized(&mut tree, 50.0, 50.0);
    tree.set_align_self(child, Align::FlexEnd);
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(tree.layout(child).left(), 150.0);
}

#[test]
fn wrap_breaks_lines() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 100.0, 100.0);
    tree.set_flex_wrap(root, Wrap::Wrap);
    let children: Vec<NodeId> = (0..3)
        .map(|_| {
            let child = sized(&mut tree, 40.0, 40.0);
            tree.add_child(root, child);
            child
        })
        .collect();

    layout(&mut tree, root);

    assert_eq!(rect(&tree, children[0]), (0.0, 0.0, 40.0, 40.0));
    assert_eq!(rect(&tree, children[1]), (40.0, 0.0, 40.0, 40.0));
    assert_eq!(rect(&tree, children[2]), (0.0, 40.0, 40.0, 40.0));
}

#[test]
fn wrap_reverse_mirrors_lines() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 100.0, 100.0);
    tree.set_flex_wrap(root, Wrap::WrapReverse);
    tree.set_align_content(root, Align::FlexStart);
    let children: Vec<NodeId> = (0..3)
        .map(|_| {
            let child = sized(&mut tree, 40.0, 40.0);
            tree.add_child(root, child);
            child
        })
        .collect();

    layout(&mut tree, root);

    assert_eq!(tree.layout(children[0]).top(), 60.0);
    assert_eq!(tree.layout(children[2]).top(), 20.0);
}

#[test]
fn align_content_distributes_lines() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 100.0, 200.0);
    tree.set_flex_wrap(root, Wrap::Wrap);
    tree.set_align_content(root, Align::SpaceBetween);
    let children: Vec<NodeId> = (0..2)
        .map(|_| {
            let child = sized(&mut tree, 60.0, 50.0);
            tree.add_child(root, child);
            child
        })
        .collect();

    layout(&mut tree, root);

    assert_eq!(tree.layout(children[0]).top(), 0.0);
    assert_eq!(tree.layout(children[1]).top(), 150.0);
}

#[test]
fn absolute_child_uses_offsets() {
    let mut tree = LayoutTree::new();
    let root = sized(&mut tree, 200.0, 200.0);
    let leading = sized(&mut tree, 50.0, 60.0);
    tree.set_position_type(leading, PositionType::Absolute);
    tree.set_position(leading, Edge::Left, Value::point(10.0));
    tree.set_position(leading, Edge::Top, Value::point(20.0));
    let trailing = sized(&mut tree, 50.0, 60.0);
    tree.set_position_type(trailing, PositionType::Absolute);
    tree.set_position(trailing, Edge::Right, Value::point(10.0));
    tree.set_position(trailing, Edge::Bottom, Value::point(20.0));
    let stretched = tree.new_node();
    tree.set_position_type(stretched, PositionType::Absolute);
    tree.set_position(stretched, Edge::Left, Value::point(10.0));
    tree.set_position(stretched, Edge::Right, Value::point(10.0));
    tree.set_height(stretched, Value::point(30.0));
    for child in [leading, trailing, stretched] {
        tree.add_child(root, child);
    }

    layout(&mut tree, root);

    assert_eq!(rect(&tree, leading), (10.0, 20.0, 50.0, 60.0));
    assert_eq!(rect(&tree, trailing), (140.0, 120.0, 50.0, 60.0));
    assert_eq!(rect(&tree, stretched), (10.0, 0.0, 180.0, 30.0));
}

#[test]
fn absolute_child_does_not_take_space() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 200.0, 100.0);
    let floating = sized(&mut tree, 50.0, 50.0);
    tree.set_position_type(floating, PositionType::Absolute);
    let flowing = sized(&mut tree, 50.0, 50.0);
    tree.add_child(root, floating);
    tree.add_child(root, flowing);

    layout(&mut tree, root);

    assert_eq!(tree.layout(flowing).left(), 0.0);
}

#[test]
fn absolute_child_ignores_justify_spacing() {
    for (justify, flowing_left) in [
        (Justify::SpaceAround, 105.0),
        (Justify::SpaceEvenly, 105.0),
        (Justify::SpaceBetween, 10.0),
    ] {
        let mut tree = LayoutTree::new();
        let root = row(&mut tree, 300.0, 100.0);
        tree.set_border(root, Edge::Left, 10.0);
        tree.set_justify_content(root, justify);
        let flowing = sized(&mut tree, 100.0, 50.0);
        let floating = sized(&mut tree, 50.0, 50.0);
        tree.set_position_type(floating, PositionType::Absolute);
        tree.add_child(root, flowing);
        tree.add_child(root, floating);

        layout(&mut tree, root);

        assert_eq!(tree.layout(flowing).left(), flowing_left, "{justify}");
        assert_eq!(rect(&tree, floating), (10.0, 0.0, 50.0, 50.0), "{justify}");
    }
}

#[test]
fn max_width_freezes_flexing_item() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 300.0, 100.0);
    let capped = tree.new_node();
    tree.set_flex_grow(capped, 1.0);
    tree.set_max_width(capped, Value::point(100.0));
    let free = tree.new_node();
    tree.set_flex_grow(free, 1.0);
    tree.add_child(root, capped);
    tree.add_child(root, free);

    layout(&mut tree, root);

    assert_eq!(rect(&tree, capped), (0.0, 0.0, 100.0, 100.0));
    assert_eq!(rect(&tree, free), (100.0, 0.0, 200.0, 100.0));
}

#[test]
fn min_width_wins_over_width() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 300.0, 100.0);
    let child = sized(&mut tree, 50.0, 50.0);
    tree.set_min_width(child, Value::point(80.0));
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(tree.layout(child).width(), 80.0);
}

#[test]
fn rtl_reverses_row() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 300.0, 100.0);
    let first = sized(&mut tree, 50.0, 50.0);
    let second = sized(&mut tree, 50.0, 50.0);
    tree.add_child(root, first);
    tree.add_child(root, second);

    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Rtl);

    assert_eq!(tree.layout(root).direction(), Direction::Rtl);
    assert_eq!(tree.layout(first).left(), 250.0);
    assert_eq!(tree.layout(second).left(), 200.0);
}

#[test]
fn shrink_distributes_overflow_by_basis() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 200.0, 100.0);
    let first = sized(&mut tree, 150.0, 50.0);
    let second = sized(&mut tree, 150.0, 50.0);
    for child in [first, second] {
        tree.set_flex_shrink(child, 1.0);
        tree.add_child(root, child);
    }

    layout(&mut tree, root);

    assert_eq!(rect(&tree, first), (0.0, 0.0, 100.0, 50.0));
    assert_eq!(rect(&tree, second), (100.0, 0.0, 100.0, 50.0));
    assert!(!tree.layout(root).had_overflow());
}

#[test]
fn rigid_items_overflow() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 200.0, 100.0);
    for _ in 0..2 {
        let child = sized(&mut tree, 150.0, 50.0);
        tree.add_child(root, child);
    }

    layout(&mut tree, root);

    let second = tree.children(root)[1];
    assert_eq!(tree.layout(second).left(), 150.0);
    assert!(tree.layout(root).had_overflow());
}

#[test]
fn grown_items_fill_the_line() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 500.0, 100.0);
    let mut children = Vec::new();
    for grow in [1.0, 2.0, 3.0] {
        let child = tree.new_node();
        tree.set_flex_grow(child, grow);
        tree.set_flex_basis(child, Value::point(0.0));
        tree.add_child(root, child);
        children.push(child);
    }
    tree.set_margin(children[1], Edge::Horizontal, Value::point(10.0));

    layout(&mut tree, root);

    let widths: Vec<f32> = children
        .iter()
        .map(|&child| tree.layout(child).width())
        .collect();
    assert_eq!(widths, vec![80.0, 160.0, 240.0]);
    let outer: f32 = widths.iter().sum::<f32>() + 20.0;
    assert_eq!(outer, 500.0);
    assert_eq!(tree.layout(children[2]).left(), 260.0);
}

#[test]
fn percent_of_undefined_parent_is_ignored() {
    assert!(Value::percent(50.0).resolve(f32::NAN).is_nan());

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.set_width(child, Value::percent(50.0));
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(tree.layout(child).width(), 0.0);
    assert_eq!(tree.layout(root).width(), 0.0);
}

#[test]
fn percent_resolves_against_parent() {
    let mut tree = LayoutTree::new();
    let root = sized(&mut tree, 200.0, 100.0);
    let child = tree.new_node();
    tree.set_width(child, Value::percent(50.0));
    tree.set_height(child, Value::percent(25.0));
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(rect(&tree, child), (0.0, 0.0, 100.0, 25.0));
}

#[test]
fn padding_and_margin_offset_children() {
    let mut tree = LayoutTree::new();
    let root = sized(&mut tree, 200.0, 200.0);
    tree.set_padding(root, Edge::All, Value::point(10.0));
    let child = tree.new_node();
    tree.set_flex_grow(child, 1.0);
    tree.set_margin(child, Edge::Left, Value::point(5.0));
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(rect(&tree, child), (15.0, 10.0, 175.0, 180.0));
    assert_eq!(tree.layout_padding(root, Edge::Left), 10.0);
    assert_eq!(tree.layout_margin(child, Edge::Left), 5.0);
}

#[test]
fn auto_margin_absorbs_free_space() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 300.0, 100.0);
    let child = sized(&mut tree, 50.0, 50.0);
    tree.set_margin(child, Edge::Left, Value::AUTO);
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(tree.layout(child).left(), 250.0);
}

#[test]
fn display_none_is_skipped_and_zeroed() {
    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 300.0, 100.0);
    let hidden = sized(&mut tree, 50.0, 50.0);
    tree.set_display(hidden, Display::None);
    let shown = sized(&mut tree, 50.0, 50.0);
    tree.add_child(root, hidden);
    tree.add_child(root, shown);

    layout(&mut tree, root);

    assert_eq!(rect(&tree, hidden), (0.0, 0.0, 0.0, 0.0));
    assert_eq!(tree.layout(shown).left(), 0.0);
}

#[test]
fn content_sized_root() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_padding(root, Edge::All, Value::point(5.0));
    let child = sized(&mut tree, 40.0, 30.0);
    tree.add_child(root, child);

    layout(&mut tree, root);

    assert_eq!(rect(&tree, root), (0.0, 0.0, 50.0, 40.0));
}

#[test]
fn measured_leaf_reports_content_size() {
    let mut tree = LayoutTree::new();
    let root = sized(&mut tree, 200.0, 200.0);
    tree.set_align_items(root, Align::FlexStart);
    let text = tree.new_node();
    tree.set_padding(text, Edge::All, Value::point(2.0));
    tree.set_measure_func(text, |width: f32, mode: MeasureMode, _: f32, _: MeasureMode| {
        assert_eq!(mode, MeasureMode::AtMost);
        assert_eq!(width, 196.0);
        Size::new(80.0, 20.0)
    });
    tree.add_child(root, text);

    layout(&mut tree, root);

    assert_eq!(rect(&tree, text), (0.0, 0.0, 84.0, 24.0));
}

#[test]
fn baseline_alignment_lines_up_first_baselines() {
    struct Fixed(f32);
    impl BaselineFunc for Fixed {
        fn baseline(&mut self, _width: f32, _height: f32) -> f32 {
            self.0
        }
    }

    let mut tree = LayoutTree::new();
    let root = row(&mut tree, 300.0, 100.0);
    tree.set_align_items(root, Align::Baseline);
    let tall = sized(&mut tree, 50.0, 40.0);
    let short = sized(&mut tree, 50.0, 20.0);
    let custom = sized(&mut tree, 50.0, 20.0);
    tree.set_baseline_func(custom, Fixed(5.0));
    for child in [tall, short, custom] {
        tree.add_child(root, child);
    }

    layout(&mut tree, root);

    assert_eq!(tree.layout(tall).top(), 0.0);
    assert_eq!(tree.layout(short).top(), 20.0);
    assert_eq!(tree.layout(custom).top(), 35.0);
}

#[test]
fn row_reverse_writes_trailing_positions() {
    let mut tree = LayoutTree::new();
    let root = sized(&mut tree, 300.0, 100.0);
    tree.set_flex_direction(root, FlexDirection::RowReverse);
    let first = sized(&mut tree, 50.0, 50.0);
    let second = sized(&mut tree, 50.0, 50.0);
    tree.add_child(root, first);
    tree.add_child(root, second);

    layout(&mut tree, root);

    assert_eq!(tree.layout(first).left(), 250.0);
    assert_eq!(tree.layout(second).left(), 200.0);
}

/// A root holding a single chain of `descendants` nested default nodes.
fn chain(tree: &mut LayoutTree, descendants: usize) -> (NodeId, NodeId) {
    let root = sized(tree, 100.0, 100.0);
    let mut parent = root;
    for _ in 0..descendants {
        let child = tree.new_node();
        tree.add_child(parent, child);
        parent = child;
    }
    (root, parent)
}

#[test]
fn chain_at_default_depth_lays_out() {
    let mut tree = LayoutTree::new();
    let (root, deepest) = chain(&mut tree, DEFAULT_MAX_DEPTH - 1);

    layout(&mut tree, root);

    assert_eq!(tree.stats().max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(tree.layout(deepest).width(), 100.0);
}

#[test]
#[should_panic(expected = "max depth")]
fn chain_past_default_depth_is_fatal() {
    let mut tree = LayoutTree::new();
    let (root, _) = chain(&mut tree, DEFAULT_MAX_DEPTH);

    layout(&mut tree, root);
}

#[test]
#[should_panic(expected = "max depth")]
fn depth_limit_is_fatal() {
    let mut config = Config::default();
    config.set_max_depth(3);
    let mut tree = LayoutTree::with_config(config);
    let root = tree.new_node();
    let mut parent = root;
    for _ in 0..5 {
        let child = tree.new_node();
        tree.add_child(parent, child);
        parent = child;
    }

    layout(&mut tree, root);
}
