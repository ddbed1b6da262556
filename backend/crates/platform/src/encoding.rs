//! URL component encoding
//!
//! Matches the browser's `encodeURIComponent`: ASCII alphanumerics and
//! `- _ . ! ~ * ' ( )` pass through, everything else is percent-encoded
//! as UTF-8.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query value or path segment.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn test_reserved_characters_are_escaped() {
        assert_eq!(encode_component("a b&c=d?e/f"), "a%20b%26c%3Dd%3Fe%2Ff");
        assert_eq!(encode_component("x+y#z"), "x%2By%23z");
    }

    #[test]
    fn test_unreserved_marks_pass_through() {
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("Abc123"), "Abc123");
    }

    #[test]
    fn test_iso_instant_colons_are_escaped() {
        assert_eq!(
            encode_component("2026-12-24T18:30:00.000Z"),
            "2026-12-24T18%3A30%3A00.000Z"
        );
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        let encoded = encode_component("Zoë 🎂");
        assert_eq!(encoded, "Zo%C3%AB%20%F0%9F%8E%82");
        let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
        assert_eq!(decoded, "Zoë 🎂");
    }
}
