use apiforge_schema::{is_phone, is_slug};
use proptest::prelude::*;

// ── phone ────────────────────────────────────────────────────────

#[test]
fn accepts_international_numbers() {
    assert!(is_phone("+14155550123"));
    assert!(is_phone("+442071838750"));
    assert!(is_phone("4155550123"));
}

#[test]
fn rejects_malformed_numbers() {
    assert!(!is_phone(""));
    assert!(!is_phone("+0123456789"));
    assert!(!is_phone("12345"));
    assert!(!is_phone("call me maybe"));
    assert!(!is_phone("+1 415 555 0123"));
}

// ── slug ─────────────────────────────────────────────────────────

#[test]
fn accepts_lowercase_alnum_hyphen() {
    assert!(is_slug("hello"));
    assert!(is_slug("hello-world"));
    assert!(is_slug("v2-final-3"));
}

#[test]
fn rejects_non_slugs() {
    assert!(!is_slug(""));
    assert!(!is_slug("Hello"));
    assert!(!is_slug("hello_world"));
    assert!(!is_slug("-leading"));
    assert!(!is_slug("trailing-"));
    assert!(!is_slug("double--hyphen"));
}

proptest! {
    #[test]
    fn slugs_never_contain_uppercase_or_spaces(s in "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,3}") {
        prop_assert!(is_slug(&s));
    }

    #[test]
    fn uppercase_input_is_never_a_slug(s in "[A-Z][A-Za-z0-9-]{0,16}") {
        prop_assert!(!is_slug(&s));
    }
}
