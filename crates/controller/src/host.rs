//! The display surface the controller drives, and its in-memory `<dialog>` model.

use crate::document::Document;
use dialog::markup::DIALOG_TAG;
use html::Id;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    Modal,
    NonModal,
}

/// One display action resolved from a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogCommand {
    Show { dialog: Id, mode: ShowMode },
    Close { dialog: Id },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("node {0:?} is not a dialog element")]
    NotADialog(Id),
    #[error("dialog {0:?} is already open non-modally")]
    InvalidState(Id),
}

/// Native dialog capabilities. Implemented by [`Document`]; tests substitute recorders.
pub trait DialogHost {
    fn show(&mut self, dialog: Id) -> Result<(), HostError>;
    fn show_modal(&mut self, dialog: Id) -> Result<(), HostError>;
    fn close(&mut self, dialog: Id) -> Result<(), HostError>;

    fn apply(&mut self, command: &DialogCommand) -> Result<(), HostError> {
        match *command {
            DialogCommand::Show {
                dialog,
                mode: ShowMode::Modal,
            } => self.show_modal(dialog),
            DialogCommand::Show {
                dialog,
                mode: ShowMode::NonModal,
            } => self.show(dialog),
            DialogCommand::Close { dialog } => self.close(dialog),
        }
    }
}

impl Document {
    fn expect_dialog(&self, id: Id) -> Result<(), HostError> {
        if self.is_element_named(id, DIALOG_TAG) {
            Ok(())
        } else {
            Err(HostError::NotADialog(id))
        }
    }

    pub fn is_open(&self, dialog: Id) -> bool {
        self.is_element_named(dialog, DIALOG_TAG) && self.has_attr(dialog, "open")
    }

    pub fn is_modal(&self, dialog: Id) -> bool {
        self.top_layer.contains(&dialog)
    }

    /// Open dialogs in document order.
    pub fn open_dialogs(&self) -> Vec<Id> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.is_open(*id))
            .collect()
    }

    /// Topmost modal dialog, if any.
    pub fn top_modal(&self) -> Option<Id> {
        self.top_layer.last().copied()
    }

    /// Closes the topmost modal dialog, as the Escape key would.
    pub fn dismiss_top(&mut self) -> Option<Id> {
        let top = self.top_modal()?;
        self.close(top).ok()?;
        Some(top)
    }
}

impl DialogHost for Document {
    /// No-op on an already open dialog.
    fn show(&mut self, dialog: Id) -> Result<(), HostError> {
        self.expect_dialog(dialog)?;
        if !self.is_open(dialog) {
            self.set_flag(dialog, "open");
        }
        Ok(())
    }

    /// No-op on a dialog that is already modal; fails on one shown non-modally.
    fn show_modal(&mut self, dialog: Id) -> Result<(), HostError> {
        self.expect_dialog(dialog)?;
        if self.is_modal(dialog) {
            return Ok(());
        }
        if self.is_open(dialog) {
            return Err(HostError::InvalidState(dialog));
        }
        self.set_flag(dialog, "open");
        self.top_layer.push(dialog);
        Ok(())
    }

    /// No-op on a closed dialog.
    fn close(&mut self, dialog: Id) -> Result<(), HostError> {
        self.expect_dialog(dialog)?;
        self.remove_attr(dialog, "open");
        self.top_layer.retain(|d| *d != dialog);
        Ok(())
    }
}
