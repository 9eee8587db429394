use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dialog::Dialog;
use html::{Attributes, ScopedIds};
use std::fmt::Write;
use std::sync::Arc;

const BODY_PARAGRAPHS: usize = 200;

fn make_body(paragraphs: usize) -> String {
    let mut body = String::new();
    for i in 0..paragraphs {
        let _ = write!(body, "<p class=\"line\">Paragraph {i} &amp; more</p>");
    }
    body
}

fn bench_render_small(c: &mut Criterion) {
    let template = Dialog::new()
        .with_id_generator(Arc::new(ScopedIds::new()))
        .with_attributes(Attributes::from([("class", "confirm")]))
        .with_header("<h2>Delete?</h2>")
        .with_footer("<button data-close-dialog>Cancel</button>");
    c.bench_function("bench_render_small", |b| {
        b.iter(|| {
            let html = black_box(&template).with_body("<p>Sure?</p>").render();
            black_box(html.map(|h| h.len()).unwrap_or(0));
        });
    });
}

fn bench_render_captured_body(c: &mut Criterion) {
    let body = make_body(BODY_PARAGRAPHS);
    c.bench_function("bench_render_captured_body", |b| {
        b.iter(|| {
            let Ok(mut dialog) = Dialog::new().with_id("bench").begin() else {
                return;
            };
            let _ = dialog.push_body(black_box(&body));
            black_box(dialog.render().map(|h| h.len()).unwrap_or(0));
        });
    });
}

criterion_group!(benches, bench_render_small, bench_render_captured_body);
criterion_main!(benches);
