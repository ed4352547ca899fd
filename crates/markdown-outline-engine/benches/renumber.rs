use criterion::{Criterion, criterion_group, criterion_main};
use markdown_outline_engine::outline::{find_list_anchor, renumber};
use markdown_outline_engine::{Document, Key, Keymap, Position};

/// Ordered list with `items` top-level items, each with two sub-items, all
/// numbered 1 so every pass has work to do.
fn generate_ordered_list(items: usize) -> String {
    let mut content = String::new();
    for i in 0..items {
        content.push_str(&format!("1. item {i}\n"));
        content.push_str("    1. child a\n");
        content.push_str("    1. child b\n");
    }
    content
}

fn bench_renumber(c: &mut Criterion) {
    let mut group = c.benchmark_group("renumber");
    group.sample_size(10);

    let doc = Document::from_text(&generate_ordered_list(50));

    group.bench_function("renumber_whole_list", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            let end = renumber(&mut d, std::hint::black_box(0), false);
            std::hint::black_box(end)
        });
    });

    group.bench_function("find_list_anchor_last_line", |b| {
        let last = doc.line_count() - 2;
        b.iter(|| std::hint::black_box(find_list_anchor(&doc, std::hint::black_box(last))));
    });

    group.finish();
}

fn bench_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("keys");
    group.sample_size(10);

    let keymap = Keymap::default();
    let mut doc = Document::from_text(&generate_ordered_list(50));
    doc.set_cursor(Position::new(1, 10));

    group.bench_function("shift_tab_then_tab", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            let _ = keymap.handle(&mut d, Key::ShiftTab);
            let _ = keymap.handle(&mut d, Key::Tab);
            std::hint::black_box(d.version())
        });
    });

    group.bench_function("enter_at_end_of_item", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            let _ = keymap.handle(&mut d, Key::Enter);
            std::hint::black_box(d.version())
        });
    });

    group.finish();
}

fn bench_long_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("long_list");
    group.sample_size(10);

    for items in [500, 1000, 2000] {
        let mut doc = Document::from_text(&generate_ordered_list(items));
        doc.set_cursor(Position::new(3, 4));
        let keymap = Keymap::default();

        // Nesting line 3 renumbers every top-level item below it
        group.bench_function(format!("tab_{}_lines", items * 3), |b| {
            b.iter(|| {
                let mut d = doc.clone();
                let _ = keymap.handle(&mut d, Key::Tab);
                std::hint::black_box(d.version())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_renumber, bench_keys, bench_long_list);
criterion_main!(benches);
