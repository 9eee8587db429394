//! Dialog markup composition.
//!
//! ```
//! use dialog::Dialog;
//!
//! let html = Dialog::new()
//!     .with_id("confirm")
//!     .with_header("<h2>Delete file?</h2>")
//!     .with_body("<p>This cannot be undone.</p>")
//!     .render()
//!     .unwrap();
//! assert!(html.starts_with(r#"<dialog id="confirm" class="dialog">"#));
//! ```

pub mod config;
pub mod markup;

mod dialog;
mod error;

pub use crate::config::DialogConfig;
pub use crate::dialog::Dialog;
pub use crate::error::DialogError;
