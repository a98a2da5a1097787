//! Custom `format` validators beyond the standard JSON Schema set.

use regex_lite::Regex;
use std::sync::LazyLock;

// E.164-style international dialing: optional '+', no leading zero,
// 7 to 15 digits total.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{6,14}$").expect("phone regex"));

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug regex"));

/// Returns true for an international-dialing phone number.
pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Returns true for a lowercase-alphanumeric-hyphen slug.
pub fn is_slug(value: &str) -> bool {
    SLUG.is_match(value)
}
