use apiforge_graphql::{singularize, type_name};
use pretty_assertions::assert_eq;

#[test]
fn ies_becomes_y() {
    assert_eq!(singularize("companies"), "company");
    assert_eq!(singularize("categories"), "category");
}

#[test]
fn es_strips_two() {
    assert_eq!(singularize("heroes"), "hero");
    assert_eq!(singularize("boxes"), "box");
}

#[test]
fn s_strips_one() {
    assert_eq!(singularize("users"), "user");
    assert_eq!(singularize("items"), "item");
}

#[test]
fn non_plural_names_pass_through() {
    assert_eq!(singularize("data"), "data");
    assert_eq!(singularize("fish"), "fish");
}

// The suffix rules are applied blindly; irregular plurals come out
// wrong and stay wrong.
#[test]
fn irregular_plurals_are_not_corrected() {
    // "…es → strip two" applies blindly.
    assert_eq!(singularize("notes"), "not");
    assert_eq!(singularize("databases"), "databas");
    // Suffixless irregulars pass through still plural.
    assert_eq!(singularize("people"), "people");
    assert_eq!(singularize("mice"), "mice");
}

#[test]
fn type_names_are_capitalized_singulars() {
    assert_eq!(type_name("users"), "User");
    assert_eq!(type_name("companies"), "Company");
    assert_eq!(type_name("heroes"), "Hero");
    assert_eq!(type_name("data"), "Data");
}
