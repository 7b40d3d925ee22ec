//! HTML character reference table
//!
//! Named references that authored cell content commonly carries. Anything
//! not listed here is left in the flattened text as written.

use phf::phf_map;

/// Named character reference (without `&` and `;`) to its text
pub static NAMED_ENTITIES: phf::Map<&'static str, &'static str> = phf_map! {
    "amp" => "&",
    "lt" => "<",
    "gt" => ">",
    "quot" => "\"",
    "apos" => "'",
    "nbsp" => "\u{a0}",
    "ensp" => "\u{2002}",
    "emsp" => "\u{2003}",
    "thinsp" => "\u{2009}",
    "shy" => "\u{ad}",
    "ndash" => "\u{2013}",
    "mdash" => "\u{2014}",
    "lsquo" => "\u{2018}",
    "rsquo" => "\u{2019}",
    "ldquo" => "\u{201c}",
    "rdquo" => "\u{201d}",
    "hellip" => "\u{2026}",
    "bull" => "\u{2022}",
    "middot" => "\u{b7}",
    "copy" => "\u{a9}",
    "reg" => "\u{ae}",
    "trade" => "\u{2122}",
    "deg" => "\u{b0}",
    "plusmn" => "\u{b1}",
    "times" => "\u{d7}",
    "divide" => "\u{f7}",
    "euro" => "\u{20ac}",
    "pound" => "\u{a3}",
    "yen" => "\u{a5}",
    "cent" => "\u{a2}",
    "sect" => "\u{a7}",
    "para" => "\u{b6}",
    "laquo" => "\u{ab}",
    "raquo" => "\u{bb}",
    "check" => "\u{2713}",
};

/// Look up a named character reference
#[inline]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_entities() {
        assert_eq!(lookup_entity("amp"), Some("&"));
        assert_eq!(lookup_entity("nbsp"), Some("\u{a0}"));
        assert_eq!(lookup_entity("unknown"), None);
    }
}
