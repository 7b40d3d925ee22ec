//! Flattened text extraction for authored cell content
//!
//! Cells are compared for merging by their text content only, the way a
//! browser's `textContent` would read them: markup is dropped, character
//! references are decoded and whitespace is kept exactly as written.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::entities::lookup_entity;

lazy_static! {
    /// Comments, then any tag (opening, closing or self-closing). Quoted
    /// attribute values may contain `>`.
    static ref MARKUP: Regex =
        Regex::new(r#"(?s)<!--.*?-->|</?[A-Za-z](?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap();

    /// Named, decimal and hexadecimal character references
    static ref CHAR_REF: Regex =
        Regex::new(r"&(?:#[xX]([0-9A-Fa-f]{1,6})|#([0-9]{1,7})|([A-Za-z][A-Za-z0-9]{1,31}));")
            .unwrap();
}

/// Flatten an HTML fragment to its text content
pub fn flatten_text(html: &str) -> String {
    if !html.contains('<') && !html.contains('&') {
        return html.to_string();
    }

    let stripped = MARKUP.replace_all(html, "");
    decode_char_refs(&stripped)
}

/// Decode character references, leaving unknown ones untouched
pub fn decode_char_refs(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    CHAR_REF
        .replace_all(text, |caps: &Captures| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            if let Some(hex) = caps.get(1) {
                return code_point(u32::from_str_radix(hex.as_str(), 16).ok(), whole);
            }
            if let Some(dec) = caps.get(2) {
                return code_point(dec.as_str().parse().ok(), whole);
            }
            caps.get(3)
                .and_then(|name| lookup_entity(name.as_str()))
                .map(str::to_string)
                .unwrap_or_else(|| whole.to_string())
        })
        .into_owned()
}

fn code_point(value: Option<u32>, fallback: &str) -> String {
    value
        .and_then(char::from_u32)
        .map(|c| c.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Escape text for use inside HTML text or a double-quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(flatten_text("Revenue"), "Revenue");
        assert_eq!(flatten_text("  spaced  "), "  spaced  ");
    }

    #[test]
    fn test_strips_tags() {
        assert_eq!(flatten_text("<p><strong>Q1</strong> 2024</p>"), "Q1 2024");
        assert_eq!(flatten_text("a<br/>b"), "ab");
        assert_eq!(flatten_text("<!-- note -->x"), "x");
    }

    #[test]
    fn test_formatting_differences_flatten_equal() {
        assert_eq!(flatten_text("<em>Total</em>"), flatten_text("<b>Total</b>"));
    }

    #[test]
    fn test_decodes_references() {
        assert_eq!(flatten_text("R&amp;D"), "R&D");
        assert_eq!(flatten_text("&#65;&#x42;"), "AB");
        assert_eq!(flatten_text("a&nbsp;b"), "a\u{a0}b");
        assert_eq!(flatten_text("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_gt_inside_attribute() {
        assert_eq!(flatten_text(r#"<span title="a>b">Q1</span>"#), "Q1");
        assert_eq!(flatten_text("<abbr title='x > y'>Total</abbr>"), "Total");
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        assert_eq!(flatten_text("a < b"), "a < b");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }
}
