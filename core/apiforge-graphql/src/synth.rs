//! Builds the executable schema from a plan and wires every resolver to
//! the store's resource resolver.

use crate::infer::FieldKind;
use crate::sdl::ResourcePlan;
use apiforge_store::StoreService;
use apiforge_types::ApiError;
use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputObject, InputValue, Object, ResolverContext, Schema,
    SchemaError, TypeRef,
};
use async_graphql::{Error, ErrorExtensions, Value as GqlValue};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Builds the Query/Mutation schema for a non-empty plan.
pub fn build_schema(
    plans: &[ResourcePlan],
    store: Arc<StoreService>,
) -> Result<Schema, SchemaError> {
    let mut query = Object::new("Query");
    let mut mutation = Object::new("Mutation");
    let mut builder = Schema::build("Query", Some("Mutation"), None);

    for plan in plans {
        let mut object = Object::new(&plan.type_name);
        for (name, kind) in &plan.fields {
            object = object.field(item_field(name.clone(), kind.clone()));
        }
        builder = builder.register(object);

        if plan.has_input() {
            let mut input = InputObject::new(plan.input_name());
            for (name, kind) in &plan.input_fields {
                input = input.field(InputValue::new(name.clone(), type_ref(kind)));
            }
            builder = builder.register(input);
        }

        query = query.field(collection_field(plan, store.clone()));
        if plan.singular_field.is_some() {
            query = query.field(singular_field(plan, store.clone()));
        }
        if plan.has_input() {
            mutation = mutation.field(create_field(plan, store.clone()));
            mutation = mutation.field(update_field(plan, store.clone()));
        }
        mutation = mutation.field(delete_field(plan, store.clone()));
    }

    builder.register(query).register(mutation).finish()
}

/// The minimal schema served when generation is impossible: a single
/// `error: String!` query field carrying the reason.
#[must_use]
pub fn fallback_schema(message: &str) -> Schema {
    let message = message.to_string();
    let query = Object::new("Query").field(Field::new(
        "error",
        TypeRef::named_nn(TypeRef::STRING),
        move |_| {
            let message = message.clone();
            FieldFuture::new(async move {
                Ok(Some(FieldValue::value(GqlValue::String(message))))
            })
        },
    ));
    Schema::build("Query", None, None)
        .register(query)
        .finish()
        .expect("fallback schema is statically valid")
}

/// The schema text matching [`fallback_schema`].
#[must_use]
pub fn fallback_sdl() -> String {
    "type Query {\n  error: String!\n}\n".to_string()
}

// ── Object fields ────────────────────────────────────────────────

fn type_ref(kind: &FieldKind) -> TypeRef {
    match kind {
        FieldKind::Str => TypeRef::named(TypeRef::STRING),
        FieldKind::Int => TypeRef::named(TypeRef::INT),
        FieldKind::Float => TypeRef::named(TypeRef::FLOAT),
        FieldKind::Boolean => TypeRef::named(TypeRef::BOOLEAN),
        FieldKind::List(inner) => TypeRef::named_list(FieldKind::element_name(inner)),
        FieldKind::Object(_) => TypeRef::named(TypeRef::STRING),
    }
}

/// A field of a synthesized object type: reads the key out of the parent
/// JSON item, coercing per the inferred kind.
fn item_field(name: String, kind: FieldKind) -> Field {
    let key = name.clone();
    Field::new(name, type_ref(&kind), move |ctx| {
        let key = key.clone();
        let kind = kind.clone();
        FieldFuture::new(async move {
            let item = ctx.parent_value.try_downcast_ref::<Value>()?;
            Ok(item
                .get(&key)
                .and_then(|value| coerce_output(value, &kind))
                .map(FieldValue::value))
        })
    })
}

/// Coerces a stored value to the declared output kind. Values that no
/// longer match the inferred type resolve to null rather than erroring —
/// later items are allowed to drift from the first sample.
fn coerce_output(value: &Value, kind: &FieldKind) -> Option<GqlValue> {
    if value.is_null() {
        return None;
    }
    match kind {
        FieldKind::Str => Some(GqlValue::String(stringify(value))),
        FieldKind::Int => value.as_i64().map(GqlValue::from),
        FieldKind::Float => value.as_f64().map(GqlValue::from),
        FieldKind::Boolean => value.as_bool().map(GqlValue::from),
        FieldKind::List(inner) => {
            let element = element_kind(inner);
            let items = value.as_array()?;
            Some(GqlValue::List(
                items
                    .iter()
                    .map(|item| coerce_output(item, &element).unwrap_or(GqlValue::Null))
                    .collect(),
            ))
        }
        FieldKind::Object(_) => Some(GqlValue::String(stringify(value))),
    }
}

/// List elements after collapse: scalars stay, complex becomes String.
fn element_kind(inner: &FieldKind) -> FieldKind {
    if inner.is_scalar() {
        inner.clone()
    } else {
        FieldKind::Str
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Query fields ─────────────────────────────────────────────────

fn collection_field(plan: &ResourcePlan, store: Arc<StoreService>) -> Field {
    let resource = plan.resource.clone();
    Field::new(
        plan.resource.clone(),
        TypeRef::named_nn_list_nn(&plan.type_name),
        move |_ctx| {
            let store = store.clone();
            let resource = resource.clone();
            FieldFuture::new(async move {
                let items = store.list(&resource).await.map_err(to_gql_error)?;
                Ok(Some(FieldValue::list(
                    items.into_iter().map(FieldValue::owned_any),
                )))
            })
        },
    )
}

fn singular_field(plan: &ResourcePlan, store: Arc<StoreService>) -> Field {
    let resource = plan.resource.clone();
    let field_name = plan
        .singular_field
        .clone()
        .expect("singular_field checked by caller");
    Field::new(field_name, TypeRef::named(&plan.type_name), move |ctx| {
        let store = store.clone();
        let resource = resource.clone();
        FieldFuture::new(async move {
            let id = id_argument(&ctx)?;
            let item = store.get(&resource, &id).await.map_err(to_gql_error)?;
            Ok(Some(FieldValue::owned_any(item)))
        })
    })
    .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
}

// ── Mutation fields ──────────────────────────────────────────────

fn create_field(plan: &ResourcePlan, store: Arc<StoreService>) -> Field {
    let resource = plan.resource.clone();
    Field::new(
        format!("create{}", plan.type_name),
        TypeRef::named_nn(&plan.type_name),
        move |ctx| {
            let store = store.clone();
            let resource = resource.clone();
            FieldFuture::new(async move {
                let input: Value = ctx.args.try_get("input")?.deserialize()?;
                let item = store.create(&resource, input).await.map_err(to_gql_error)?;
                Ok(Some(FieldValue::owned_any(item)))
            })
        },
    )
    .argument(InputValue::new(
        "input",
        TypeRef::named_nn(plan.input_name()),
    ))
}

fn update_field(plan: &ResourcePlan, store: Arc<StoreService>) -> Field {
    let resource = plan.resource.clone();
    Field::new(
        format!("update{}", plan.type_name),
        TypeRef::named_nn(&plan.type_name),
        move |ctx| {
            let store = store.clone();
            let resource = resource.clone();
            FieldFuture::new(async move {
                let id = id_argument(&ctx)?;
                let input: Value = ctx.args.try_get("input")?.deserialize()?;
                let item = store
                    .replace(&resource, &id, input)
                    .await
                    .map_err(to_gql_error)?;
                Ok(Some(FieldValue::owned_any(item)))
            })
        },
    )
    .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
    .argument(InputValue::new(
        "input",
        TypeRef::named_nn(plan.input_name()),
    ))
}

fn delete_field(plan: &ResourcePlan, store: Arc<StoreService>) -> Field {
    let resource = plan.resource.clone();
    Field::new(
        format!("delete{}", plan.type_name),
        TypeRef::named_nn(TypeRef::BOOLEAN),
        move |ctx| {
            let store = store.clone();
            let resource = resource.clone();
            FieldFuture::new(async move {
                let id = id_argument(&ctx)?;
                store.remove(&resource, &id).await.map_err(to_gql_error)?;
                Ok(Some(FieldValue::value(GqlValue::from(true))))
            })
        },
    )
    .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
}

// ── Shared resolver plumbing ─────────────────────────────────────

fn id_argument(ctx: &ResolverContext<'_>) -> Result<String, Error> {
    let accessor = ctx.args.try_get("id")?;
    if let Ok(s) = accessor.string() {
        return Ok(s.to_string());
    }
    if let Ok(n) = accessor.i64() {
        return Ok(n.to_string());
    }
    if let Ok(f) = accessor.f64() {
        return Ok(f.to_string());
    }
    Err(Error::new("id must be a string or a number"))
}

/// Converts the taxonomy to a GraphQL error with `extensions.code`.
/// Internal errors are logged in full and reported generically.
fn to_gql_error(err: ApiError) -> Error {
    let code = err.code();
    let message = match &err {
        ApiError::Internal(detail) => {
            error!(%detail, "internal error in GraphQL resolver");
            "internal server error".to_string()
        }
        other => other.to_string(),
    };
    let details = match &err {
        ApiError::SchemaValidationFailed(errors) => Some(GqlValue::List(
            errors.iter().cloned().map(GqlValue::String).collect(),
        )),
        _ => None,
    };
    Error::new(message).extend_with(|_, ext| {
        ext.set("code", code);
        if let Some(details) = details {
            ext.set("details", details);
        }
    })
}
