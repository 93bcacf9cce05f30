use core_types::Color;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use dom::build::{document, element, text};
use dom::{Caret, Id, Node};
use highlight::{ResolvedRange, clear_all, mark};

fn sample_doc(paragraphs: usize) -> Node {
    document(
        (0..paragraphs)
            .map(|i| {
                element(
                    "p",
                    vec![text(&format!("paragraph {i} with some filler text"))],
                )
            })
            .collect(),
    )
}

fn text_ids(root: &Node) -> Vec<Id> {
    fn walk(node: &Node, out: &mut Vec<Id>) {
        if let Node::Text { id, .. } = node {
            out.push(*id);
        }
        if let Some(children) = node.children() {
            for c in children {
                walk(c, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

fn bench_mark_and_clear(c: &mut Criterion) {
    c.bench_function("mark_across_100_paragraphs_and_clear", |b| {
        b.iter_batched(
            || sample_doc(100),
            |mut doc| {
                let ids = text_ids(&doc);
                let range = ResolvedRange {
                    start: Caret::new(ids[0], 3),
                    end: Caret::new(*ids.last().unwrap(), 5),
                };
                mark(&mut doc, &range, Color::DEFAULT_HIGHLIGHT).unwrap();
                clear_all(&mut doc);
                doc
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("single_paragraph_surround", |b| {
        b.iter_batched(
            || sample_doc(1),
            |mut doc| {
                let ids = text_ids(&doc);
                let range = ResolvedRange {
                    start: Caret::new(ids[0], 2),
                    end: Caret::new(ids[0], 12),
                };
                mark(&mut doc, &range, Color::DEFAULT_HIGHLIGHT).unwrap();
                doc
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_mark_and_clear);
criterion_main!(benches);
