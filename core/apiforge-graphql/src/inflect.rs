//! Resource-name inflection.
//!
//! The exact suffix heuristic: `…ies → …y`, `…es → strip two`,
//! `…s → strip one`, anything else unchanged. It is known to
//! mis-singularize irregular plurals ("people", "notes"); that behavior
//! is part of the contract and is not corrected here.

/// Singular form of a resource name.
#[must_use]
pub fn singularize(resource: &str) -> String {
    if let Some(stem) = resource.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = resource.strip_suffix("es") {
        stem.to_string()
    } else if let Some(stem) = resource.strip_suffix('s') {
        stem.to_string()
    } else {
        resource.to_string()
    }
}

/// GraphQL type name for a resource: capitalized singular.
#[must_use]
pub fn type_name(resource: &str) -> String {
    capitalize(&singularize(resource))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
