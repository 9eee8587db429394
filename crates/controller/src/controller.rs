use crate::document::Document;
use crate::host::{DialogCommand, DialogHost, ShowMode};
use dialog::markup::{
    BOUND_MARKER_ATTRIBUTE, CLOSE_DIALOG_ATTRIBUTE, DIALOG_TAG, IS_MODAL_ATTRIBUTE, IS_NOT_MODAL,
    OPEN_DIALOG_ATTRIBUTE,
};
use html::Id;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Skip elements that already hold a listener of the same kind and write
    /// `data-dialog-bound` on bound elements. Without it every `initialize` attaches another
    /// listener to each trigger.
    pub mark_bound: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self { mark_bound: true }
    }
}

/// Click handler attached to a trigger element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    OpenDialog,
    CloseDialog,
}

/// Outcome of one `initialize` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindReport {
    pub open_triggers: usize,
    pub close_triggers: usize,
    /// Elements left alone because an earlier pass already bound them.
    pub skipped: usize,
}

impl BindReport {
    pub fn bound(&self) -> usize {
        self.open_triggers + self.close_triggers
    }
}

/// Wires declarative trigger attributes to dialog show/close commands.
///
/// The controller keeps no state of its own: listeners live on the [`Document`] and open state
/// belongs to the [`DialogHost`].
#[derive(Debug, Clone, Default)]
pub struct DialogController {
    options: ControllerOptions,
}

impl DialogController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ControllerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    /// Attaches one listener per trigger element currently in `doc`.
    pub fn initialize(&self, doc: &mut Document) -> BindReport {
        let openers = doc.elements_with_attribute(OPEN_DIALOG_ATTRIBUTE);
        let closers = doc.elements_with_attribute(CLOSE_DIALOG_ATTRIBUTE);

        let mut report = BindReport::default();
        let mut skipped = HashSet::new();
        for (elements, listener) in [
            (openers, Listener::OpenDialog),
            (closers, Listener::CloseDialog),
        ] {
            for element in elements {
                if self.options.mark_bound && doc.listeners(element).contains(&listener) {
                    skipped.insert(element);
                    continue;
                }
                doc.add_listener(element, listener);
                if self.options.mark_bound {
                    doc.set_flag(element, BOUND_MARKER_ATTRIBUTE);
                }
                match listener {
                    Listener::OpenDialog => report.open_triggers += 1,
                    Listener::CloseDialog => report.close_triggers += 1,
                }
            }
        }
        report.skipped = skipped.len();

        log::debug!(
            target: "controller.init",
            "bound {} open and {} close triggers, skipped {}",
            report.open_triggers,
            report.close_triggers,
            report.skipped
        );
        report
    }

    /// Commands a click on `target` produces, in bubbling order.
    pub fn resolve_click(&self, doc: &Document, target: Id) -> Vec<DialogCommand> {
        let mut commands = Vec::new();
        for element in doc.ancestors_inclusive(target) {
            for listener in doc.listeners(element) {
                let command = match listener {
                    Listener::OpenDialog => self.open_command(doc, element),
                    Listener::CloseDialog => self.close_command(doc, element),
                };
                commands.extend(command);
            }
        }
        commands
    }

    fn open_command(&self, doc: &Document, trigger: Id) -> Option<DialogCommand> {
        let Some(dialog_id) = doc.attr(trigger, OPEN_DIALOG_ATTRIBUTE) else {
            log::debug!(
                target: "controller.click",
                "trigger {trigger:?} lost its {OPEN_DIALOG_ATTRIBUTE} attribute"
            );
            return None;
        };
        let Some(dialog) = doc.get_element_by_id(dialog_id) else {
            log::warn!(
                target: "controller.click",
                "trigger {trigger:?} names missing dialog {dialog_id:?}"
            );
            return None;
        };
        let mode = match doc.attr(trigger, IS_MODAL_ATTRIBUTE) {
            Some(IS_NOT_MODAL) => ShowMode::NonModal,
            _ => ShowMode::Modal,
        };
        Some(DialogCommand::Show { dialog, mode })
    }

    fn close_command(&self, doc: &Document, trigger: Id) -> Option<DialogCommand> {
        match doc.closest(trigger, DIALOG_TAG) {
            Some(dialog) => Some(DialogCommand::Close { dialog }),
            None => {
                log::debug!(
                    target: "controller.click",
                    "close trigger {trigger:?} is not inside a dialog"
                );
                None
            }
        }
    }

    /// Resolves a click and applies it to `host`. Host failures are logged, never returned.
    /// Returns the commands the host accepted.
    pub fn dispatch_click<H: DialogHost + ?Sized>(
        &self,
        doc: &Document,
        host: &mut H,
        target: Id,
    ) -> Vec<DialogCommand> {
        let commands = self.resolve_click(doc, target);
        apply_all(host, commands)
    }

    /// Clicks `target` with `doc` as its own host.
    pub fn click(&self, doc: &mut Document, target: Id) -> Vec<DialogCommand> {
        let commands = self.resolve_click(doc, target);
        apply_all(doc, commands)
    }
}

fn apply_all<H: DialogHost + ?Sized>(
    host: &mut H,
    commands: Vec<DialogCommand>,
) -> Vec<DialogCommand> {
    let mut applied = Vec::with_capacity(commands.len());
    for command in commands {
        match host.apply(&command) {
            Ok(()) => applied.push(command),
            Err(err) => log::warn!(target: "controller.host", "{command:?} rejected: {err}"),
        }
    }
    applied
}
