//! The built-in demo page: two dialogs and their triggers.

use dialog::markup::{close_trigger_attributes, open_trigger_attributes};
use dialog::{Dialog, DialogConfig, DialogError};
use html::{Tag, encode_text};
use std::sync::Arc;

pub const CONFIRM_ID: &str = "confirm-delete";
pub const SETTINGS_ID: &str = "settings";

fn trigger(id: &str, dialog_id: &str, modal: bool, label: &str) -> Result<String, DialogError> {
    Ok(Tag::new("button")
        .attributes(open_trigger_attributes(dialog_id, modal))
        .attr("id", id)
        .attr("type", "button")
        .content(label)
        .render()?)
}

pub fn render(config: Arc<DialogConfig>) -> Result<String, DialogError> {
    let base = Dialog::with_config(config);

    let cancel = Tag::new("button")
        .attributes(close_trigger_attributes())
        .attr("id", "cancel-delete")
        .attr("type", "button")
        .content("Cancel")
        .render()?;
    let confirm = base
        .with_id(CONFIRM_ID)
        .with_header("<h2>Delete file?</h2>")
        .with_body(format!(
            "<p>{}</p>",
            encode_text("\"report.pdf\" will be removed & cannot be restored.")
        ))
        .with_footer(cancel)
        .render()?;

    let mut settings = base
        .with_id(SETTINGS_ID)
        .with_header("<h2>Settings</h2>")
        .with_button_label("Done")
        .begin()?;
    for option in ["Dark mode", "Compact rows"] {
        settings.push_body(&format!(
            r#"<label><input type="checkbox"> {}</label>"#,
            encode_text(option)
        ))?;
    }
    settings.end_body()?;
    let settings = settings.render()?;

    let triggers = [
        trigger("open-confirm", CONFIRM_ID, true, "Delete")?,
        trigger("open-settings", SETTINGS_ID, false, "Settings")?,
        trigger("open-missing", "no-such-dialog", true, "Broken")?,
    ]
    .concat();

    Ok(Tag::new("main")
        .content(triggers + &confirm + &settings)
        .encode(false)
        .render()?)
}
