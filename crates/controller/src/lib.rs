//! Declarative dialog triggers.
//!
//! [`DialogController::initialize`] binds every `data-open-dialog` and `data-close-dialog`
//! element of a [`Document`]; clicks then resolve to [`DialogCommand`]s applied to a
//! [`DialogHost`].
//!
//! ```
//! use controller::{DialogController, Document};
//!
//! let mut doc = Document::parse(
//!     r#"<button id="t" data-open-dialog="d">Open</button><dialog id="d"></dialog>"#,
//! );
//! let controller = DialogController::new();
//! controller.initialize(&mut doc);
//!
//! let trigger = doc.get_element_by_id("t").unwrap();
//! let dialog = doc.get_element_by_id("d").unwrap();
//! controller.click(&mut doc, trigger);
//! assert!(doc.is_modal(dialog));
//! ```

mod controller;
mod document;
mod host;

pub use crate::controller::{BindReport, ControllerOptions, DialogController, Listener};
pub use crate::document::{Document, DocumentError};
pub use crate::host::{DialogCommand, DialogHost, HostError, ShowMode};
