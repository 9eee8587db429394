use serde::Deserialize;

/// Naming and default content used when rendering dialogs.
///
/// Class names are structural hooks for stylesheets; changing them changes nothing about
/// the open/close protocol, which only looks at `data-*` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DialogConfig {
    /// Prefix for generated ids.
    pub id_prefix: String,
    pub dialog_class: String,
    pub header_class: String,
    pub header_content_class: String,
    pub body_class: String,
    pub footer_class: String,
    pub close_class: String,
    /// `aria-label` of the close button. Callers cannot override it per dialog.
    pub close_aria_label: String,
    /// Close button content when none is given. Raw markup.
    pub button_label: String,
    /// `type` of the close button.
    pub button_type: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            id_prefix: "dialog-".to_string(),
            dialog_class: "dialog".to_string(),
            header_class: "dialog-header".to_string(),
            header_content_class: "dialog-header-content".to_string(),
            body_class: "dialog-body".to_string(),
            footer_class: "dialog-footer".to_string(),
            close_class: "close-dialog".to_string(),
            close_aria_label: "close dialog".to_string(),
            button_label: "&times;".to_string(),
            button_type: "button".to_string(),
        }
    }
}
