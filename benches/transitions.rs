//! Benchmarks for the transition protocol and the input filter chain.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use inedit::prelude::*;

fn build_page(doc: &mut Document) -> (NodeId, NodeId) {
    let heading = doc.append_child(doc.root(), "h2");
    doc.set_attr(heading, "data-editable", "");
    doc.set_text(heading, "Hello");
    let form = doc.append_child(doc.root(), "form");
    doc.set_attr(form, "data-editable-template", "");
    doc.add_class(form, "hidden");
    let field = doc.append_child(form, "input");
    doc.set_attr(field, "data-editable-content", "");
    (heading, field)
}

fn bench_edit_cancel_cycle(c: &mut Criterion) {
    let mut doc = Document::new();
    let (heading, field) = build_page(&mut doc);
    let mut editor = Editor::new();
    c.bench_function("edit_cancel_cycle", |b| {
        b.iter(|| {
            editor.dispatch(&mut doc, InputEvent::Click(black_box(heading)));
            doc.set_value(field, "typed");
            editor.request_state(&mut doc, heading, EditState::Idle);
        });
    });
}

fn bench_standard_filter_chain(c: &mut Criterion) {
    let chain = FilterChain::standard();
    c.bench_function("standard_filter_chain", |b| {
        b.iter(|| chain.apply(black_box("   a &lt;longer&gt; piece of content   ")));
    });
}

criterion_group!(benches, bench_edit_cancel_cycle, bench_standard_filter_chain);
criterion_main!(benches);
