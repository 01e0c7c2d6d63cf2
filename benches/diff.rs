//! Diff benchmarks
//!
//! Benchmarks for [`loom_term::render::diff_buffers`] under varying change
//! density and dirty-rect shapes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loom_term::geometry::Rect;
use loom_term::render::{diff_buffers, Buffer};
use loom_term::style::Style;

fn bench_diff_by_change_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_change_density");
    let (width, height) = (80u16, 24u16);
    let full = Rect::new(0, 0, width, height);

    for pct in [0, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(pct), &pct, |b, &pct| {
            let old = Buffer::new(width, height);
            let mut new = Buffer::new(width, height);
            let changed_rows = (height as usize * pct / 100) as u16;
            for y in 0..changed_rows {
                new.set_string(0, y, &"x".repeat(width as usize), Style::default(), None);
            }

            b.iter(|| {
                black_box(diff_buffers(&old, &new, &[full]));
            });
        });
    }

    group.finish();
}

fn bench_diff_identical_buffers(c: &mut Criterion) {
    c.bench_function("diff_identical_80x24", |b| {
        let old = Buffer::new(80, 24);
        let new = Buffer::new(80, 24);
        let full = Rect::new(0, 0, 80, 24);

        b.iter(|| {
            black_box(diff_buffers(&old, &new, &[full]));
        });
    });
}

fn bench_diff_scoped_to_small_dirty_rect(c: &mut Criterion) {
    c.bench_function("diff_single_row_of_200", |b| {
        let old = Buffer::new(200, 60);
        let mut new = Buffer::new(200, 60);
        new.set_string(0, 30, &"x".repeat(200), Style::default(), None);
        let rect = Rect::new(0, 30, 200, 1);

        b.iter(|| {
            black_box(diff_buffers(&old, &new, &[rect]));
        });
    });
}

fn bench_diff_many_disjoint_rects(c: &mut Criterion) {
    c.bench_function("diff_checkerboard_dirty_rects", |b| {
        let old = Buffer::new(80, 24);
        let mut new = Buffer::new(80, 24);
        let mut rects = Vec::new();
        for y in (0..24).step_by(2) {
            new.set_string(0, y, &"x".repeat(80), Style::default(), None);
            rects.push(Rect::new(0, y, 80, 1));
        }

        b.iter(|| {
            black_box(diff_buffers(&old, &new, &rects));
        });
    });
}

criterion_group!(
    benches,
    bench_diff_by_change_density,
    bench_diff_identical_buffers,
    bench_diff_scoped_to_small_dirty_rect,
    bench_diff_many_disjoint_rects,
);

criterion_main!(benches);
