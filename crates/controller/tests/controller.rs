use controller::{
    ControllerOptions, DialogCommand, DialogController, DialogHost, Document, HostError, ShowMode,
};
use dialog::Dialog;
use dialog::markup::{BOUND_MARKER_ATTRIBUTE, open_trigger_attributes};
use html::{Id, ScopedIds, Tag};
use std::sync::Arc;

#[derive(Debug, Default)]
struct RecordingHost {
    calls: Vec<(&'static str, Id)>,
}

impl DialogHost for RecordingHost {
    fn show(&mut self, dialog: Id) -> Result<(), HostError> {
        self.calls.push(("show", dialog));
        Ok(())
    }

    fn show_modal(&mut self, dialog: Id) -> Result<(), HostError> {
        self.calls.push(("show_modal", dialog));
        Ok(())
    }

    fn close(&mut self, dialog: Id) -> Result<(), HostError> {
        self.calls.push(("close", dialog));
        Ok(())
    }
}

fn trigger(id: &str, dialog: &str, modal: bool) -> String {
    Tag::new("button")
        .attributes(open_trigger_attributes(dialog, modal))
        .attr("id", id)
        .content("open")
        .render()
        .unwrap()
}

fn element(doc: &Document, id: &str) -> Id {
    doc.get_element_by_id(id)
        .unwrap_or_else(|| panic!("no element #{id}"))
}

fn rendered_page() -> Document {
    let ids = Arc::new(ScopedIds::new());
    let confirm = Dialog::new()
        .with_id_generator(ids.clone())
        .with_id("confirm")
        .with_header("<h2>Sure?</h2>")
        .with_body(r#"<p id="text">Really?</p>"#)
        .render()
        .unwrap();
    let panel = Dialog::new()
        .with_id_generator(ids)
        .with_id("panel")
        .render()
        .unwrap();
    let markup = [
        trigger("open-confirm", "confirm", true),
        trigger("open-panel", "panel", false),
        confirm,
        panel,
    ]
    .concat();
    Document::parse(&markup)
}

#[test]
fn trigger_calls_show_modal_exactly_once() {
    let mut doc = rendered_page();
    let controller = DialogController::new();
    controller.initialize(&mut doc);

    let mut host = RecordingHost::default();
    let confirm = element(&doc, "confirm");
    controller.dispatch_click(&doc, &mut host, element(&doc, "open-confirm"));
    assert_eq!(host.calls, vec![("show_modal", confirm)]);
}

#[test]
fn is_modal_false_calls_show() {
    let mut doc = rendered_page();
    let controller = DialogController::new();
    controller.initialize(&mut doc);

    let mut host = RecordingHost::default();
    let panel = element(&doc, "panel");
    controller.dispatch_click(&doc, &mut host, element(&doc, "open-panel"));
    assert_eq!(host.calls, vec![("show", panel)]);
}

#[test]
fn only_the_literal_false_is_non_modal() {
    let mut doc = Document::parse(concat!(
        r#"<a id="t1" data-open-dialog="d" data-is-modal="FALSE">1</a>"#,
        r#"<a id="t2" data-open-dialog="d" data-is-modal>2</a>"#,
        r#"<dialog id="d"></dialog>"#,
    ));
    let controller = DialogController::new();
    controller.initialize(&mut doc);
    let d = element(&doc, "d");
    for t in ["t1", "t2"] {
        assert_eq!(
            controller.resolve_click(&doc, element(&doc, t)),
            vec![DialogCommand::Show {
                dialog: d,
                mode: ShowMode::Modal
            }]
        );
    }
}

#[test]
fn rendered_close_button_closes_its_dialog() {
    let mut doc = rendered_page();
    let controller = DialogController::new();
    controller.initialize(&mut doc);
    let confirm = element(&doc, "confirm");
    let open_confirm = element(&doc, "open-confirm");
    controller.click(&mut doc, open_confirm);
    assert!(doc.is_open(confirm));

    let close = doc
        .elements_with_attribute("data-close-dialog")
        .into_iter()
        .find(|b| doc.closest(*b, "dialog") == Some(confirm))
        .unwrap();
    let applied = controller.click(&mut doc, close);
    assert_eq!(applied, vec![DialogCommand::Close { dialog: confirm }]);
    assert!(!doc.is_open(confirm));
}

#[test]
fn close_targets_the_nearest_dialog_only() {
    let mut doc = Document::parse(concat!(
        r#"<dialog id="outer" open>"#,
        r#"<dialog id="inner" open><button id="x" data-close-dialog>x</button></dialog>"#,
        r#"<button id="y" data-close-dialog>y</button>"#,
        r#"</dialog>"#,
        r#"<dialog id="sibling" open></dialog>"#,
    ));
    let controller = DialogController::new();
    controller.initialize(&mut doc);
    let outer = element(&doc, "outer");
    let inner = element(&doc, "inner");
    let sibling = element(&doc, "sibling");
    let x = element(&doc, "x");
    controller.click(&mut doc, x);
    assert!(!doc.is_open(inner));
    assert!(doc.is_open(outer));
    assert!(doc.is_open(sibling));

    let y = element(&doc, "y");
    controller.click(&mut doc, y);
    assert!(!doc.is_open(outer));
    assert!(doc.is_open(sibling));
}

#[test]
fn close_outside_any_dialog_is_inert() {
    let mut doc = Document::parse(r#"<button id="x" data-close-dialog>x</button>"#);
    let controller = DialogController::new();
    controller.initialize(&mut doc);
    let mut host = RecordingHost::default();
    assert!(
        controller
            .dispatch_click(&doc, &mut host, element(&doc, "x"))
            .is_empty()
    );
    assert!(host.calls.is_empty());
}

#[test]
fn missing_target_is_inert() {
    let mut doc = Document::parse(r#"<button id="t" data-open-dialog="nope">open</button>"#);
    let controller = DialogController::new();
    controller.initialize(&mut doc);
    let mut host = RecordingHost::default();
    controller.dispatch_click(&doc, &mut host, element(&doc, "t"));
    assert!(host.calls.is_empty());
}

#[test]
fn reinitialize_does_not_double_bind() {
    let mut doc = rendered_page();
    let controller = DialogController::new();
    let first = controller.initialize(&mut doc);
    assert_eq!(first.open_triggers, 2);
    assert_eq!(first.close_triggers, 2);

    let second = controller.initialize(&mut doc);
    assert_eq!(second.bound(), 0);
    assert_eq!(second.skipped, 4);

    let mut host = RecordingHost::default();
    controller.dispatch_click(&doc, &mut host, element(&doc, "open-confirm"));
    assert_eq!(host.calls.len(), 1);
}

#[test]
fn without_the_marker_reinitialize_stacks_listeners() {
    let mut doc = rendered_page();
    let controller = DialogController::with_options(ControllerOptions { mark_bound: false });
    controller.initialize(&mut doc);
    controller.initialize(&mut doc);
    let open = element(&doc, "open-confirm");
    assert!(!doc.has_attr(open, BOUND_MARKER_ATTRIBUTE));

    let mut host = RecordingHost::default();
    controller.dispatch_click(&doc, &mut host, open);
    assert_eq!(host.calls.len(), 2);
}

#[test]
fn later_markup_is_bound_by_a_later_initialize() {
    let mut doc = rendered_page();
    let controller = DialogController::new();
    controller.initialize(&mut doc);

    let root = doc.root();
    doc.append_markup(root, &trigger("late", "panel", true))
        .unwrap();
    let late = element(&doc, "late");
    let mut host = RecordingHost::default();
    controller.dispatch_click(&doc, &mut host, late);
    assert!(host.calls.is_empty());

    let report = controller.initialize(&mut doc);
    assert_eq!(report.open_triggers, 1);
    controller.dispatch_click(&doc, &mut host, late);
    assert_eq!(host.calls, vec![("show_modal", element(&doc, "panel"))]);
}

#[test]
fn escape_closes_the_topmost_modal() {
    let mut doc = Document::parse(concat!(
        r#"<button id="a-open" data-open-dialog="a">a</button>"#,
        r#"<dialog id="a"><button id="b-open" data-open-dialog="b">b</button></dialog>"#,
        r#"<dialog id="b"></dialog>"#,
    ));
    let controller = DialogController::new();
    controller.initialize(&mut doc);
    let a = element(&doc, "a");
    let b = element(&doc, "b");

    let a_open = element(&doc, "a-open");
    controller.click(&mut doc, a_open);
    let b_open = element(&doc, "b-open");
    controller.click(&mut doc, b_open);
    assert_eq!(doc.top_modal(), Some(b));

    assert_eq!(doc.dismiss_top(), Some(b));
    assert!(doc.is_modal(a));
    assert!(!doc.is_open(b));
}

#[test]
fn show_modal_on_a_non_modal_dialog_is_swallowed() {
    let mut doc = Document::parse(concat!(
        r#"<a id="plain" data-open-dialog="d" data-is-modal="false">1</a>"#,
        r#"<a id="modal" data-open-dialog="d">2</a>"#,
        r#"<dialog id="d"></dialog>"#,
    ));
    let controller = DialogController::new();
    controller.initialize(&mut doc);
    let d = element(&doc, "d");

    let plain = element(&doc, "plain");
    controller.click(&mut doc, plain);
    let modal = element(&doc, "modal");
    let applied = controller.click(&mut doc, modal);
    assert!(applied.is_empty());
    assert!(doc.is_open(d));
    assert!(!doc.is_modal(d));
}

#[test]
fn non_dialog_target_is_rejected_by_the_document_host() {
    let mut doc = Document::parse(concat!(
        r#"<a id="t" data-open-dialog="p">1</a>"#,
        r#"<p id="p"></p>"#,
    ));
    let controller = DialogController::new();
    controller.initialize(&mut doc);
    let p = element(&doc, "p");
    assert_eq!(
        controller.resolve_click(&doc, element(&doc, "t")),
        vec![DialogCommand::Show {
            dialog: p,
            mode: ShowMode::Modal
        }]
    );
    let t = element(&doc, "t");
    assert!(controller.click(&mut doc, t).is_empty());
    assert!(!doc.has_attr(p, "open"));
}
