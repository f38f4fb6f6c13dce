//! Invalidation Tests

use std::cell::Cell;
use std::rc::Rc;
use trellis::{Direction, Edge, LayoutTree, MeasureMode, NodeId, Size, Value};

/// Root 100x100 with one 50x50 child, already laid out.
fn laid_out() -> (LayoutTree, NodeId, NodeId) {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_width(root, Value::point(100.0));
    tree.set_height(root, Value::point(100.0));
    let child = tree.new_node();
    tree.set_width(child, Value::point(50.0));
    tree.set_height(child, Value::point(50.0));
    tree.add_child(root, child);
    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
    (tree, root, child)
}

#[test]
fn layout_clears_dirty_flags() {
    let (tree, root, child) = laid_out();
    assert!(!tree.is_dirty(root));
    assert!(!tree.is_dirty(child));
    assert!(tree.has_new_layout(root));
    assert!(tree.has_new_layout(child));
}

#[test]
fn same_value_keeps_node_clean() {
    let (mut tree, root, child) = laid_out();

    tree.set_width(child, Value::point(50.0));
    tree.set_flex_grow(child, f32::NAN);
    tree.set_margin(child, Edge::Left, Value::UNDEFINED);

    assert!(!tree.is_dirty(child));
    assert!(!tree.is_dirty(root));
}

#[test]
fn changed_value_dirties_ancestors() {
    let (mut tree, root, child) = laid_out();

    tree.set_width(child, Value::point(60.0));

    assert!(tree.is_dirty(child));
    assert!(tree.is_dirty(root));

    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
    assert!(!tree.is_dirty(child));
    assert_eq!(tree.layout(child).width(), 60.0);
}

#[test]
fn dirtied_callback_fires_on_transition_only() {
    let (mut tree, root, child) = laid_out();
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    tree.set_dirtied_func(root, move |_| counter.set(counter.get() + 1));

    tree.set_width(child, Value::point(60.0));
    tree.set_width(child, Value::point(70.0));
    tree.set_height(root, Value::point(90.0));
    assert_eq!(fired.get(), 1);

    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
    tree.set_padding(root, Edge::All, Value::point(4.0));
    assert_eq!(fired.get(), 2);
}

#[test]
fn removing_child_dirties_parent() {
    let (mut tree, root, child) = laid_out();

    tree.remove_child(root, child);

    assert!(tree.is_dirty(root));
    assert_eq!(tree.parent(child), None);
    assert!(tree.layout(child).width().is_nan());
}

#[test]
fn removing_stranger_is_a_no_op() {
    let (mut tree, root, _) = laid_out();
    let stranger = tree.new_node();

    tree.remove_child(root, stranger);

    assert!(!tree.is_dirty(root));
    assert_eq!(tree.child_count(root), 1);
}

#[test]
fn unvisited_subtree_keeps_flags() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_width(root, Value::point(100.0));
    tree.set_height(root, Value::point(100.0));

    let branches: Vec<(NodeId, NodeId)> = (0..2)
        .map(|_| {
            let branch = tree.new_node();
            tree.set_height(branch, Value::point(40.0));
            let leaf = tree.new_node();
            tree.set_measure_func(leaf, |_: f32, _: MeasureMode, _: f32, _: MeasureMode| {
                Size::new(10.0, 10.0)
            });
            tree.add_child(branch, leaf);
            tree.add_child(root, branch);
            (branch, leaf)
        })
        .collect();

    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
    for &(branch, leaf) in &branches {
        tree.set_has_new_layout(branch, false);
        tree.set_has_new_layout(leaf, false);
    }

    let (_, dirty_leaf) = branches[0];
    let (_, clean_leaf) = branches[1];
    tree.mark_dirty(dirty_leaf);
    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);

    assert!(tree.has_new_layout(dirty_leaf));
    assert!(!tree.has_new_layout(clean_leaf));
}

#[test]
#[should_panic(expected = "manually mark themselves as dirty")]
fn mark_dirty_requires_measured_leaf() {
    let (mut tree, root, _) = laid_out();
    tree.mark_dirty(root);
}
