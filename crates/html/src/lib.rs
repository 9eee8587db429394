pub mod attrs;
pub mod debug;
pub mod id;
pub mod tag;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::attrs::Attributes;
pub use crate::dom_builder::{build_dom, parse_document};
pub use crate::entities::{encode_attribute, encode_text};
pub use crate::id::{IdGenerator, ScopedIds, SequentialIds};
pub use crate::tag::{Tag, TagError};
pub use crate::tokenizer::{is_void_element, tokenize};
pub use crate::types::{AtomId, AtomTable, Id, Node, NodeId, Token, TokenStream};
