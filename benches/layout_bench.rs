use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use trellis::{Direction, FlexDirection, LayoutTree, MeasureMode, NodeId, Size, Value, Wrap};

/// A wrapping row of `count` cards, each a column holding a measured label.
fn build_grid(count: usize) -> (LayoutTree, NodeId, Vec<NodeId>) {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row);
    tree.set_flex_wrap(root, Wrap::Wrap);
    tree.set_width(root, Value::point(1280.0));

    let mut labels = Vec::with_capacity(count);
    for i in 0..count {
        let card = tree.new_node();
        tree.set_width(card, Value::percent(25.0));
        tree.set_flex_grow(card, 1.0);
        tree.set_padding(card, trellis::Edge::All, Value::point(8.0));

        let label = tree.new_node();
        let chars = (i % 17 + 3) as f32;
        tree.set_measure_func(label, move |width: f32, mode: MeasureMode, _: f32, _: MeasureMode| {
            let natural = chars * 7.0;
            let width = if mode == MeasureMode::Undefined {
                natural
            } else {
                natural.min(width)
            };
            Size::new(width, (natural / width.max(1.0)).ceil() * 16.0)
        });
        tree.add_child(card, label);
        tree.add_child(root, card);
        labels.push(label);
    }
    (tree, root, labels)
}

fn bench_calculate_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("LayoutTree::calculate_layout");

    for &count in &[10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("cold", count), &count, |b, &n| {
            b.iter_batched(
                || build_grid(n),
                |(mut tree, root, _)| {
                    tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr)
                },
                criterion::BatchSize::SmallInput,
            )
        });

        let (mut tree, root, _) = build_grid(count);
        tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
        group.bench_with_input(BenchmarkId::new("cached", count), &count, |b, _| {
            b.iter(|| tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr))
        });

        let (mut tree, root, labels) = build_grid(count);
        tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr);
        group.bench_with_input(BenchmarkId::new("one_dirty_leaf", count), &count, |b, _| {
            b.iter(|| {
                tree.mark_dirty(labels[labels.len() / 2]);
                tree.calculate_layout(root, f32::NAN, f32::NAN, Direction::Ltr)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_calculate_layout);
criterion_main!(benches);
