//! Element serialization.
//!
//! Attribute values are always escaped. Content is escaped unless `encode(false)` is set,
//! which is how pre-rendered fragments are embedded.

use crate::attrs::Attributes;
use crate::entities::{encode_attribute, encode_text};
use crate::tokenizer::is_void_element;
use thiserror::Error;

/// Attributes serialized ahead of the rest, in this order.
const LEADING_ATTRIBUTES: &[&str] = &["type", "id", "class"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("invalid tag name {0:?}")]
    InvalidTagName(String),
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),
}

#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    attributes: Attributes,
    content: String,
    encode: bool,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            content: String::new(),
            encode: true,
        }
    }

    /// Replaces the attribute list.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    pub fn class(mut self, classes: &str) -> Self {
        self.attributes.add_class(classes);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    pub fn render(&self) -> Result<String, TagError> {
        let tag_ok = !self.name.is_empty()
            && self
                .name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-');
        if !tag_ok {
            return Err(TagError::InvalidTagName(self.name.clone()));
        }

        let mut out = String::with_capacity(self.content.len() + 64);
        out.push('<');
        out.push_str(&self.name);
        render_attributes(&self.attributes, &mut out)?;
        out.push('>');

        if is_void_element(&self.name) {
            return Ok(out);
        }
        if self.encode {
            out.push_str(&encode_text(&self.content));
        } else {
            out.push_str(&self.content);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
        Ok(out)
    }
}

fn render_attributes(attributes: &Attributes, out: &mut String) -> Result<(), TagError> {
    let leading = LEADING_ATTRIBUTES
        .iter()
        .filter_map(|name| attributes.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)));
    let rest = attributes.iter().filter(|(k, _)| {
        !LEADING_ATTRIBUTES
            .iter()
            .any(|name| k.eq_ignore_ascii_case(name))
    });

    for (name, value) in leading.chain(rest) {
        if !is_valid_name(name) {
            return Err(TagError::InvalidAttributeName(name.to_string()));
        }
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            out.push_str(&encode_attribute(value));
            out.push('"');
        }
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            !c.is_whitespace()
                && !c.is_control()
                && !matches!(c, '"' | '\'' | '>' | '<' | '/' | '=')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_attributes_come_first() {
        let html = Tag::new("button")
            .attributes(Attributes::from([("data-x", "1"), ("class", "c"), ("type", "button")]))
            .render()
            .unwrap();
        assert_eq!(html, r#"<button type="button" class="c" data-x="1"></button>"#);
    }

    #[test]
    fn values_are_escaped_and_flags_are_bare() {
        let html = Tag::new("div")
            .attributes(Attributes::new().with("title", r#"a "b" <c>"#).with_flag("hidden"))
            .content("<b>x</b>")
            .render()
            .unwrap();
        assert_eq!(
            html,
            r#"<div title="a &quot;b&quot; &lt;c&gt;" hidden>&lt;b&gt;x&lt;/b&gt;</div>"#
        );
    }

    #[test]
    fn raw_content_is_embedded_verbatim() {
        let html = Tag::new("section")
            .class("dialog-body")
            .content("<p>&amp; kept</p>")
            .encode(false)
            .render()
            .unwrap();
        assert_eq!(html, r#"<section class="dialog-body"><p>&amp; kept</p></section>"#);
    }

    #[test]
    fn void_elements_have_no_end_tag() {
        assert_eq!(Tag::new("br").render().unwrap(), "<br>");
    }

    #[test]
    fn malformed_names_are_rejected() {
        let err = Tag::new("div")
            .attr("on click", "x")
            .render()
            .unwrap_err();
        assert_eq!(err, TagError::InvalidAttributeName("on click".to_string()));
        assert_eq!(
            Tag::new("").render().unwrap_err(),
            TagError::InvalidTagName(String::new())
        );
        assert!(Tag::new("p").attr("", "x").render().is_err());
    }
}
