//! Internal helpers for input normalization.
//!
//! These utilities are **not** part of the public API.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Search/uniqueness key for free-text names: NFKD, combining marks dropped,
/// lowercase, runs of non-alphanumerics collapsed to one space.
///
/// `"São  Paulo!"` and `"sao paulo"` share the key `"sao paulo"`.
pub(crate) fn normalize_name_key(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut prev_space = false;
    for ch in value.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_case_and_punctuation() {
        assert_eq!(
            normalize_name_key("São  Paulo!").as_deref(),
            Some("sao paulo")
        );
        assert_eq!(normalize_name_key("ZÜRICH").as_deref(), Some("zurich"));
        assert_eq!(
            normalize_name_key(" Ho Chi Minh-City ").as_deref(),
            Some("ho chi minh city")
        );
    }

    #[test]
    fn blank_names_have_no_key() {
        assert_eq!(normalize_name_key("   "), None);
        assert_eq!(normalize_name_key("!?"), None);
    }
}
