use crate::config::DialogConfig;
use crate::error::DialogError;
use crate::markup::CLOSE_DIALOG_ATTRIBUTE;
use html::{Attributes, IdGenerator, SequentialIds, Tag};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Body capture scope. Content survives `end_body` so scopes can be reopened in sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Capture {
    #[default]
    Idle,
    Open(String),
    Closed(String),
}

/// A dialog description, rendered once into `<dialog>` markup.
///
/// Every `with_*` method returns a new value and leaves the receiver untouched, so a
/// partially configured dialog can serve as a template for several others. The new value is a
/// full copy, capture state included: deriving while a capture scope is open gives the copy its
/// own open scope holding the content captured so far.
///
/// Fragments (header, body, footer, button label) are embedded verbatim. Escaping untrusted
/// text is the caller's job; see [`html::encode_text`].
///
/// Invariants:
/// - `id()` is stable per value: a caller-supplied `id` attribute wins, otherwise one id is
///   generated on first use and reused by `render` and by dialogs derived afterwards.
/// - The dialog and close classes are merged into caller class lists, never replacing them.
/// - The close button always carries the configured `aria-label` and `data-close-dialog`.
#[derive(Debug, Clone)]
pub struct Dialog {
    config: Arc<DialogConfig>,
    ids: Arc<dyn IdGenerator>,
    attributes: Attributes,
    header: String,
    body: String,
    footer: String,
    button_attributes: Attributes,
    button_label: Option<String>,
    generated_id: OnceLock<String>,
    capture: Capture,
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog {
    pub fn new() -> Self {
        Self::with_config(Arc::new(DialogConfig::default()))
    }

    pub fn with_config(config: Arc<DialogConfig>) -> Self {
        Self {
            config,
            ids: Arc::new(SequentialIds),
            attributes: Attributes::new(),
            header: String::new(),
            body: String::new(),
            footer: String::new(),
            button_attributes: Attributes::new(),
            button_label: None,
            generated_id: OnceLock::new(),
            capture: Capture::Idle,
        }
    }

    fn derive(&self, change: impl FnOnce(&mut Self)) -> Self {
        let mut new = self.clone();
        change(&mut new);
        new
    }

    /// Replaces the root attributes, `id` included.
    pub fn with_attributes(&self, attributes: Attributes) -> Self {
        self.derive(|d| d.attributes = attributes)
    }

    pub fn with_body(&self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.derive(|d| d.body = body)
    }

    pub fn with_button_attributes(&self, attributes: Attributes) -> Self {
        self.derive(|d| d.button_attributes = attributes)
    }

    pub fn with_button_label(&self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.derive(|d| d.button_label = Some(label))
    }

    /// An empty footer removes the footer section.
    pub fn with_footer(&self, footer: impl Into<String>) -> Self {
        let footer = footer.into();
        self.derive(|d| d.footer = footer)
    }

    pub fn with_header(&self, header: impl Into<String>) -> Self {
        let header = header.into();
        self.derive(|d| d.header = header)
    }

    pub fn with_id(&self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.derive(|d| d.attributes.set("id", id))
    }

    pub fn with_id_generator(&self, ids: Arc<dyn IdGenerator>) -> Self {
        self.derive(|d| d.ids = ids)
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// The dialog id, generating and caching one when none was supplied.
    pub fn id(&self) -> &str {
        if let Some(id) = self.attributes.get("id") {
            return id;
        }
        self.generated_id
            .get_or_init(|| self.ids.generate(&self.config.id_prefix))
    }

    /// Opens the body capture scope.
    pub fn begin_body(&mut self) -> Result<(), DialogError> {
        if self.is_capturing() {
            return Err(DialogError::NestedCapture);
        }
        let content = match std::mem::take(&mut self.capture) {
            Capture::Closed(content) => content,
            _ => String::new(),
        };
        self.capture = Capture::Open(content);
        Ok(())
    }

    /// Owned form of [`Dialog::begin_body`], for `Dialog::new().with_header(..).begin()?`.
    pub fn begin(mut self) -> Result<Self, DialogError> {
        self.begin_body()?;
        Ok(self)
    }

    /// Appends to the open capture scope.
    pub fn push_body(&mut self, fragment: &str) -> Result<(), DialogError> {
        match &mut self.capture {
            Capture::Open(content) => {
                content.push_str(fragment);
                Ok(())
            }
            _ => Err(DialogError::CaptureNotOpen),
        }
    }

    pub fn end_body(&mut self) -> Result<(), DialogError> {
        match std::mem::take(&mut self.capture) {
            Capture::Open(content) => {
                self.capture = Capture::Closed(content);
                Ok(())
            }
            other => {
                self.capture = other;
                Err(DialogError::CaptureNotOpen)
            }
        }
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.capture, Capture::Open(_))
    }

    /// Renders the dialog. An open capture scope is closed first.
    pub fn render(mut self) -> Result<String, DialogError> {
        let id = self.id().to_string();

        let captured = match std::mem::take(&mut self.capture) {
            Capture::Idle => String::new(),
            Capture::Open(content) | Capture::Closed(content) => content,
        };
        if !self.body.is_empty() && !captured.is_empty() {
            log::debug!(
                target: "dialog.render",
                "dialog {id}: explicit body set, ignoring {} captured bytes",
                captured.len()
            );
        }

        let mut attributes = self.attributes.clone();
        attributes.set("id", id.as_str());
        attributes.add_class(&self.config.dialog_class);

        let mut content = self.render_header()?;
        content.push_str(&self.render_body(captured)?);
        content.push_str(&self.render_footer()?);

        let html = Tag::new("dialog")
            .attributes(attributes)
            .content(content)
            .encode(false)
            .render()?;
        log::debug!(target: "dialog.render", "rendered dialog {id} ({} bytes)", html.len());
        Ok(html)
    }

    fn render_header(&self) -> Result<String, DialogError> {
        let header_content = Tag::new("div")
            .class(&self.config.header_content_class)
            .content(self.header.as_str())
            .encode(false)
            .render()?;
        Ok(Tag::new("header")
            .class(&self.config.header_class)
            .content(header_content + &self.render_button()?)
            .encode(false)
            .render()?)
    }

    fn render_button(&self) -> Result<String, DialogError> {
        let reserved = Attributes::new()
            .with("aria-label", self.config.close_aria_label.as_str())
            .with_flag(CLOSE_DIALOG_ATTRIBUTE);
        let mut attributes = self.button_attributes.clone();
        attributes.merge(&reserved);
        attributes.add_class(&self.config.close_class);
        attributes.set("type", self.config.button_type.as_str());

        let label = self
            .button_label
            .as_deref()
            .unwrap_or(&self.config.button_label);
        Ok(Tag::new("button")
            .attributes(attributes)
            .content(label)
            .encode(false)
            .render()?)
    }

    fn render_body(&self, captured: String) -> Result<String, DialogError> {
        let body = if self.body.is_empty() {
            captured
        } else {
            self.body.clone()
        };
        Ok(Tag::new("section")
            .class(&self.config.body_class)
            .content(body)
            .encode(false)
            .render()?)
    }

    fn render_footer(&self) -> Result<String, DialogError> {
        if self.footer.is_empty() {
            return Ok(String::new());
        }
        Ok(Tag::new("footer")
            .class(&self.config.footer_class)
            .content(self.footer.as_str())
            .encode(false)
            .render()?)
    }
}

/// Writes go to the open capture scope; writing without one is a `fmt::Error`.
impl fmt::Write for Dialog {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_body(s).map_err(|_| fmt::Error)
    }
}
