//! Render benchmarks
//!
//! Benchmarks for the differential-render pipeline: buffer writes and the
//! ANSI byte-stream emission that turns a diff into terminal output.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loom_term::render::{Buffer, Cell, Renderer};
use loom_term::style::{Color, Style};

fn bench_buffer_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_ops");

    group.bench_function("create_80x24", |b| {
        b.iter(|| {
            black_box(Buffer::new(80, 24));
        });
    });

    group.bench_function("clear_80x24", |b| {
        let mut buffer = Buffer::new(80, 24);
        b.iter(|| {
            buffer.clear(None);
            black_box(&buffer);
        });
    });

    group.bench_function("resize", |b| {
        let mut buffer = Buffer::new(80, 24);
        b.iter(|| {
            buffer.resize(120, 40);
            buffer.resize(80, 24);
            black_box(&buffer);
        });
    });

    group.bench_function("set_string_short", |b| {
        let mut buffer = Buffer::new(80, 24);
        b.iter(|| {
            buffer.set_string(0, 0, "Hello, World!", Style::default(), None);
            black_box(&buffer);
        });
    });

    group.bench_function("set_string_full_row", |b| {
        let mut buffer = Buffer::new(80, 24);
        let row = "X".repeat(80);
        b.iter(|| {
            buffer.set_string(0, 0, &row, Style::default(), None);
            black_box(&buffer);
        });
    });

    group.finish();
}

fn bench_text_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_render");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let row = "Hello World! ".repeat(size / 13 + 1);
            let mut buffer = Buffer::new(row.len().min(u16::MAX as usize) as u16, 1);

            b.iter(|| {
                buffer.set_string(0, 0, &row, Style::default(), None);
                black_box(&buffer);
            });
        });
    }

    group.finish();
}

fn bench_full_screen_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_screen_render");

    for (width, height) in [(80u16, 24u16), (200, 50)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &(width, height),
            |b, &(width, height)| {
                let old = Buffer::new(width, height);
                let mut new = Buffer::new(width, height);
                for y in 0..height {
                    new.set_string(0, y, &"x".repeat(width as usize), Style::default(), None);
                }
                let full = loom_term::geometry::Rect::new(0, 0, width, height);

                b.iter(|| {
                    let changes = loom_term::render::diff_buffers(&old, &new, &[full]);
                    let mut renderer = Renderer::new();
                    let mut sink = Vec::new();
                    renderer.render(&mut sink, &changes, &new).unwrap();
                    black_box(&sink);
                });
            },
        );
    }

    group.finish();
}

fn bench_styled_cell_emission(c: &mut Criterion) {
    c.bench_function("styled_row_emission", |b| {
        let old = Buffer::new(80, 1);
        let mut new = Buffer::new(80, 1);
        let style = Style::default().fg(Color::Indexed(4)).bg(Color::Indexed(0));
        for x in 0..80 {
            new.set(x, 0, Cell::new("a").with_style(style));
        }
        let full = loom_term::geometry::Rect::new(0, 0, 80, 1);

        b.iter(|| {
            let changes = loom_term::render::diff_buffers(&old, &new, &[full]);
            let mut renderer = Renderer::new();
            let mut sink = Vec::new();
            renderer.render(&mut sink, &changes, &new).unwrap();
            black_box(&sink);
        });
    });
}

criterion_group!(
    benches,
    bench_buffer_ops,
    bench_text_render,
    bench_full_screen_render,
    bench_styled_cell_emission,
);

criterion_main!(benches);
