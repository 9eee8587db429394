//! Small forgiving tokenizer for fragment and page markup.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are interned lowercase.
//! `script`/`style` bodies are raw text. Void elements are reported as self-closing.
//! There is no HTML5 error recovery beyond "skip what cannot be understood".

use crate::entities::decode_entities;
use crate::types::{AtomId, AtomTable, Token, TokenStream};
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')
}

/// Tokenizes `input` into a stream with interned names.
pub fn tokenize(input: &str) -> TokenStream {
    let mut cursor = Cursor {
        input,
        bytes: input.as_bytes(),
        pos: 0,
        atoms: AtomTable::new(),
        out: Vec::new(),
    };
    cursor.run();
    log::trace!(
        target: "html.tokenizer",
        "tokenized {} bytes into {} tokens",
        input.len(),
        cursor.out.len()
    );
    TokenStream::new(cursor.out, cursor.atoms)
}

struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    atoms: AtomTable,
    out: Vec<Token>,
}

impl<'a> Cursor<'a> {
    // Slices are only cut at ASCII structural bytes, so every endpoint is a char boundary.
    fn run(&mut self) {
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'<' {
                self.text();
                continue;
            }
            let rest = &self.input[self.pos..];
            if rest.starts_with(COMMENT_START) {
                self.comment();
            } else if self.starts_with_ignore_case(b"<!doctype") {
                if !self.doctype() {
                    break;
                }
            } else if self.bytes.get(self.pos + 1) == Some(&b'/') {
                self.end_tag();
            } else if self.bytes.get(self.pos + 1).is_some_and(|b| is_name_byte(*b)) {
                self.start_tag();
            } else {
                // A lone '<' is character data.
                self.push_text("<");
                self.pos += 1;
            }
        }
    }

    fn starts_with_ignore_case(&self, needle: &[u8]) -> bool {
        self.bytes
            .get(self.pos..self.pos + needle.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(needle))
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Token::Text(prev)) = self.out.last_mut() {
            prev.push_str(text);
        } else {
            self.out.push(Token::Text(text.to_string()));
        }
    }

    fn text(&mut self) {
        let start = self.pos;
        let end = memchr(b'<', &self.bytes[start..]).map_or(self.bytes.len(), |rel| start + rel);
        let decoded = decode_entities(&self.input[start..end]);
        if !decoded.is_empty() {
            self.push_text(&decoded);
        }
        self.pos = end;
    }

    fn comment(&mut self) {
        let body_start = self.pos + COMMENT_START.len();
        match self.input[body_start..].find(COMMENT_END) {
            Some(rel) => {
                let body = &self.input[body_start..body_start + rel];
                self.out.push(Token::Comment(body.to_string()));
                self.pos = body_start + rel + COMMENT_END.len();
            }
            None => {
                self.out
                    .push(Token::Comment(self.input[body_start..].to_string()));
                self.pos = self.bytes.len();
            }
        }
    }

    fn doctype(&mut self) -> bool {
        let rest = &self.input[self.pos + 2..];
        let Some(end) = rest.find('>') else {
            return false;
        };
        self.out.push(Token::Doctype(rest[..end].trim().to_string()));
        self.pos += 2 + end + 1;
        true
    }

    fn read_name(&mut self) -> Option<AtomId> {
        let start = self.pos;
        while self.pos < self.bytes.len() && is_name_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        let input = self.input;
        Some(self.atoms.intern_ascii_lowercase(&input[start..self.pos]))
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn end_tag(&mut self) {
        self.pos += 2;
        let name = self.read_name();
        match memchr(b'>', &self.bytes[self.pos..]) {
            Some(rel) => self.pos += rel + 1,
            None => self.pos = self.bytes.len(),
        }
        if let Some(name) = name {
            self.out.push(Token::EndTag(name));
        }
    }

    fn start_tag(&mut self) {
        self.pos += 1;
        let Some(name) = self.read_name() else {
            return;
        };
        let mut attributes: Vec<(AtomId, Option<String>)> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            let Some(&b) = self.bytes.get(self.pos) else {
                break;
            };
            match b {
                b'>' => {
                    self.pos += 1;
                    break;
                }
                b'/' => {
                    self.pos += 1;
                    if self.bytes.get(self.pos) == Some(&b'>') {
                        self_closing = true;
                        self.pos += 1;
                        break;
                    }
                }
                _ => match self.read_name() {
                    Some(attr) => {
                        let value = self.attribute_value();
                        // First occurrence wins, as in browsers.
                        if !attributes.iter().any(|(k, _)| *k == attr) {
                            attributes.push((attr, value));
                        }
                    }
                    None => self.pos += 1,
                },
            }
        }

        let tag = self.atoms.resolve(name).to_string();
        self_closing |= is_void_element(&tag);
        self.out.push(Token::StartTag {
            name,
            attributes,
            self_closing,
        });

        if !self_closing && (tag == "script" || tag == "style") {
            self.raw_text(name, &tag);
        }
    }

    fn attribute_value(&mut self) -> Option<String> {
        self.skip_whitespace();
        if self.bytes.get(self.pos) != Some(&b'=') {
            return None;
        }
        self.pos += 1;
        self.skip_whitespace();

        match self.bytes.get(self.pos) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let start = self.pos + 1;
                let end = memchr(quote, &self.bytes[start..])
                    .map_or(self.bytes.len(), |rel| start + rel);
                let value = decode_entities(&self.input[start..end]);
                self.pos = (end + 1).min(self.bytes.len());
                Some(value)
            }
            _ => {
                let start = self.pos;
                while self.pos < self.bytes.len() {
                    let b = self.bytes[self.pos];
                    if b.is_ascii_whitespace()
                        || b == b'>'
                        || (b == b'/' && self.bytes.get(self.pos + 1) == Some(&b'>'))
                    {
                        break;
                    }
                    self.pos += 1;
                }
                Some(decode_entities(&self.input[start..self.pos]))
            }
        }
    }

    /// Everything up to `</tag` (any case) is text; a missing close tag consumes the rest.
    fn raw_text(&mut self, name: AtomId, tag: &str) {
        let close = format!("</{tag}");
        let start = self.pos;
        let mut scan = start;
        let close_at = loop {
            let Some(rel) = memchr(b'<', &self.bytes[scan..]) else {
                break None;
            };
            let at = scan + rel;
            if self
                .bytes
                .get(at..at + close.len())
                .is_some_and(|s| s.eq_ignore_ascii_case(close.as_bytes()))
            {
                break Some(at);
            }
            scan = at + 1;
        };

        let end = close_at.unwrap_or(self.bytes.len());
        if end > start {
            self.out
                .push(Token::Text(self.input[start..end].to_string()));
        }
        self.out.push(Token::EndTag(name));
        self.pos = match close_at {
            Some(at) => memchr(b'>', &self.bytes[at..]).map_or(self.bytes.len(), |rel| at + rel + 1),
            None => self.bytes.len(),
        };
    }
}
