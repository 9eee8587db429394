//! Entity decoding for parsed markup and escaping for serialized markup.
//!
//! Decoding covers the named set below plus well-formed,
//! semicolon-terminated numeric references. Anything else passes through unchanged.

const NAMED: &[(&[u8], char)] = &[
    (b"&amp;", '&'),
    (b"&lt;", '<'),
    (b"&gt;", '>'),
    (b"&quot;", '"'),
    (b"&apos;", '\''),
    (b"&#39;", '\''),
    (b"&nbsp;", '\u{00A0}'),
    (b"&times;", '\u{00D7}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the supported entity subset in `s`.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut copy_start = 0;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            i += 1;
            continue;
        }
        out.push_str(&s[copy_start..i]);

        if let Some((len, ch)) = match_named(bytes, i) {
            out.push(ch);
            i += len;
        } else if let Some((len, ch)) = match_numeric(s, i) {
            out.push(ch);
            i += len;
        } else {
            out.push('&');
            i += 1;
        }
        copy_start = i;
    }

    out.push_str(&s[copy_start..]);
    out
}

fn match_named(bytes: &[u8], at: usize) -> Option<(usize, char)> {
    NAMED
        .iter()
        .find(|(pat, _)| bytes.get(at..at + pat.len()) == Some(*pat))
        .map(|(pat, ch)| (pat.len(), *ch))
}

/// `&#123;` or `&#x7B;`. Returns the consumed length and the decoded scalar.
fn match_numeric(s: &str, at: usize) -> Option<(usize, char)> {
    let bytes = s.as_bytes();
    if bytes.get(at + 1) != Some(&b'#') {
        return None;
    }
    let is_hex = matches!(bytes.get(at + 2), Some(b'x' | b'X'));
    let digits_start = if is_hex { at + 3 } else { at + 2 };
    let max_digits = if is_hex { MAX_HEX_DIGITS } else { MAX_DEC_DIGITS };

    let mut j = digits_start;
    while j < bytes.len() && j - digits_start < max_digits {
        let b = bytes[j];
        if b == b';' {
            break;
        }
        let ok = if is_hex {
            b.is_ascii_hexdigit()
        } else {
            b.is_ascii_digit()
        };
        if !ok {
            return None;
        }
        j += 1;
    }
    if j == digits_start || j >= bytes.len() || bytes[j] != b';' {
        return None;
    }

    let digits = &s[digits_start..j];
    let radix = if is_hex { 16 } else { 10 };
    let ch = u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)?;
    Some((j + 1 - at, ch))
}

/// Escape a value for use inside a double-quoted attribute.
pub fn encode_attribute(value: &str) -> String {
    encode_with(value, true)
}

/// Escape character data. Quotes are left alone.
pub fn encode_text(value: &str) -> String {
    encode_with(value, false)
}

fn encode_with(value: &str, quotes: bool) -> String {
    let needs_escape = value
        .bytes()
        .any(|b| matches!(b, b'&' | b'<' | b'>') || (quotes && matches!(b, b'"' | b'\'')));
    if !needs_escape {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&times;"), "×");
        assert_eq!(decode_entities("&#215;"), "×");
        assert_eq!(decode_entities("&#xD7;"), "×");
        assert_eq!(decode_entities("&#039;"), "'");
    }

    #[test]
    fn malformed_references_pass_through() {
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
        assert_eq!(decode_entities("&#xZZ;&amp;"), "&#xZZ;&");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#12345678;"), "&#12345678;");
        assert_eq!(decode_entities("&#;"), "&#;");
    }

    #[test]
    fn attribute_encoding_escapes_quotes() {
        assert_eq!(
            encode_attribute(r#"say "hi" & 'bye'"#),
            "say &quot;hi&quot; &amp; &#039;bye&#039;"
        );
        assert_eq!(encode_attribute("plain"), "plain");
    }

    #[test]
    fn text_encoding_keeps_quotes() {
        assert_eq!(encode_text(r#"<b>"x"</b>"#), r#"&lt;b&gt;"x"&lt;/b&gt;"#);
    }

    #[test]
    fn decode_reverses_attribute_encoding() {
        let raw = r#"a<b>&"c"'d'"#;
        assert_eq!(decode_entities(&encode_attribute(raw)), raw);
    }
}
