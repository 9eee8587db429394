//! Attribute names shared between rendered dialogs and the click controller.

/// On a trigger element; the value is the id of the dialog to open.
pub const OPEN_DIALOG_ATTRIBUTE: &str = "data-open-dialog";
/// On a trigger element; [`IS_NOT_MODAL`] selects a non-modal show.
pub const IS_MODAL_ATTRIBUTE: &str = "data-is-modal";
/// The only `data-is-modal` value that opens a dialog non-modally.
pub const IS_NOT_MODAL: &str = "false";
/// Presence-only; the element closes its nearest enclosing dialog.
pub const CLOSE_DIALOG_ATTRIBUTE: &str = "data-close-dialog";
/// Written by the controller on elements it has bound. Informational only: an authored marker
/// does not stop an element from being bound.
pub const BOUND_MARKER_ATTRIBUTE: &str = "data-dialog-bound";
/// Element name of the dialog root.
pub const DIALOG_TAG: &str = "dialog";

/// Attributes for an element that opens `dialog_id` on click.
///
/// ```
/// use dialog::markup::open_trigger_attributes;
///
/// let attrs = open_trigger_attributes("settings", false);
/// assert_eq!(attrs.get("data-open-dialog"), Some("settings"));
/// assert_eq!(attrs.get("data-is-modal"), Some("false"));
/// ```
pub fn open_trigger_attributes(dialog_id: &str, modal: bool) -> html::Attributes {
    let attrs = html::Attributes::new().with(OPEN_DIALOG_ATTRIBUTE, dialog_id);
    if modal {
        attrs
    } else {
        attrs.with(IS_MODAL_ATTRIBUTE, IS_NOT_MODAL)
    }
}

/// Attributes for an element that closes the dialog it sits in.
pub fn close_trigger_attributes() -> html::Attributes {
    html::Attributes::new().with_flag(CLOSE_DIALOG_ATTRIBUTE)
}
