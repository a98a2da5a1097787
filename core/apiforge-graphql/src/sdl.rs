//! Planning and rendering of the synthesized schema.
//!
//! [`plan_resources`] is a pure function of the document: it decides, per
//! resource, the type name, the object fields (from the first sample
//! item) and the input fields. [`render_sdl`] turns the plan into schema
//! text; hashing that text is what drives the cache.

use crate::infer::{FieldKind, infer_type};
use crate::inflect::{singularize, type_name};
use apiforge_types::JsonObject;
use std::collections::HashSet;
use tracing::warn;

/// Fields excluded from input types: the engine owns them.
pub const INPUT_EXCLUDED: [&str; 5] = ["id", "_id", "uuid", "createdAt", "updatedAt"];

/// Everything needed to emit one resource's types and fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePlan {
    pub resource: String,
    pub type_name: String,
    /// Query field for a single item; `None` when the singular form
    /// collides with the collection field name.
    pub singular_field: Option<String>,
    pub fields: Vec<(String, FieldKind)>,
    pub input_fields: Vec<(String, FieldKind)>,
}

impl ResourcePlan {
    #[must_use]
    pub fn input_name(&self) -> String {
        format!("{}Input", self.type_name)
    }

    #[must_use]
    pub fn has_input(&self) -> bool {
        !self.input_fields.is_empty()
    }
}

fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Plans types for every resource with at least one sample item.
///
/// Resources whose name cannot be a GraphQL identifier, whose first item
/// is not an object, or whose type name collides with an earlier resource
/// are skipped with a warning rather than failing the whole schema.
#[must_use]
pub fn plan_resources(document: &JsonObject) -> Vec<ResourcePlan> {
    let mut plans = Vec::new();
    let mut used_type_names = HashSet::new();

    for (resource, value) in document {
        let Some(items) = value.as_array() else {
            continue;
        };
        let Some(first) = items.first() else {
            continue;
        };
        if !is_graphql_name(resource) {
            warn!(resource, "skipping resource: not a valid GraphQL name");
            continue;
        }
        let Some(sample) = first.as_object() else {
            warn!(resource, "skipping resource: first sample item is not an object");
            continue;
        };

        let name = type_name(resource);
        if !used_type_names.insert(name.clone()) {
            warn!(resource, type_name = %name, "skipping resource: type name already taken");
            continue;
        }

        let fields: Vec<(String, FieldKind)> = sample
            .iter()
            .filter(|(key, _)| is_graphql_name(key))
            .map(|(key, value)| (key.clone(), infer_type(value)))
            .collect();
        if fields.is_empty() {
            warn!(resource, "skipping resource: sample item has no usable fields");
            used_type_names.remove(&name);
            continue;
        }
        let input_fields = fields
            .iter()
            .filter(|(key, _)| !INPUT_EXCLUDED.contains(&key.as_str()))
            .cloned()
            .collect();

        let singular = singularize(resource);
        let singular_field =
            (singular != *resource && is_graphql_name(&singular)).then_some(singular);

        plans.push(ResourcePlan {
            resource: resource.clone(),
            type_name: name,
            singular_field,
            fields,
            input_fields,
        });
    }
    plans
}

/// Renders the plan as GraphQL schema text.
#[must_use]
pub fn render_sdl(plans: &[ResourcePlan]) -> String {
    let mut out = String::new();

    for plan in plans {
        out.push_str(&format!("type {} {{\n", plan.type_name));
        for (name, kind) in &plan.fields {
            out.push_str(&format!("  {name}: {}\n", kind.gql_type()));
        }
        out.push_str("}\n\n");

        if plan.has_input() {
            out.push_str(&format!("input {} {{\n", plan.input_name()));
            for (name, kind) in &plan.input_fields {
                out.push_str(&format!("  {name}: {}\n", kind.gql_type()));
            }
            out.push_str("}\n\n");
        }
    }

    out.push_str("type Query {\n");
    for plan in plans {
        out.push_str(&format!("  {}: [{}!]!\n", plan.resource, plan.type_name));
        if let Some(singular) = &plan.singular_field {
            out.push_str(&format!("  {singular}(id: ID!): {}\n", plan.type_name));
        }
    }
    out.push_str("}\n\n");

    out.push_str("type Mutation {\n");
    for plan in plans {
        if plan.has_input() {
            out.push_str(&format!(
                "  create{t}(input: {i}!): {t}!\n",
                t = plan.type_name,
                i = plan.input_name()
            ));
            out.push_str(&format!(
                "  update{t}(id: ID!, input: {i}!): {t}!\n",
                t = plan.type_name,
                i = plan.input_name()
            ));
        }
        out.push_str(&format!("  delete{}(id: ID!): Boolean!\n", plan.type_name));
    }
    out.push_str("}\n");

    out
}
