use html::debug::outline_from_dom;
use html::{Attributes, Tag, parse_document};

fn trigger(target: &str) -> String {
    Tag::new("button")
        .attributes(
            Attributes::new()
                .with("data-open-dialog", target)
                .with("id", format!("t-{target}")),
        )
        .content(format!("Open <{target}>"))
        .render()
        .unwrap()
}

#[test]
fn rendered_tags_parse_back_with_their_attributes() {
    let dialog = Tag::new("dialog")
        .attr("id", "a")
        .attr("title", r#"it's "quoted" & <odd>"#)
        .content(trigger("b"))
        .encode(false)
        .render()
        .unwrap();
    let page = trigger("a") + &dialog;
    let dom = parse_document(&page);

    let [outer, dialog] = dom.children() else {
        panic!("expected two top-level elements");
    };
    let inner = &dialog.children()[0];
    assert_eq!(outer.attr("data-open-dialog"), Some("a"));
    assert_eq!(inner.attr("data-open-dialog"), Some("b"));
    assert_eq!(inner.attr("id"), Some("t-b"));

    let text = &outer.children()[0];
    assert!(matches!(text, html::Node::Text { text, .. } if text == "Open <a>"));

    assert!(dialog.is_element_named("dialog"));
    assert_eq!(dialog.attr("title"), Some(r#"it's "quoted" & <odd>"#));
    assert!(dialog.id() < inner.id());
}

#[test]
fn outline_shows_dialog_protocol_attributes() {
    let dom = parse_document(concat!(
        r#"<dialog id="d" class="dialog" open>"#,
        r#"<button data-close-dialog>x</button>"#,
        r#"</dialog>"#,
    ));
    let outline = outline_from_dom(&dom, 10);
    assert_eq!(
        outline,
        vec![
            "#document".to_string(),
            r#"  <dialog id="d" class="dialog" open>"#.to_string(),
            "    <button data-close-dialog>".to_string(),
            r#"      "x""#.to_string(),
        ]
    );
}
