//! Schema compilation and value validation.

use crate::formats::{is_phone, is_slug};
use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::{ValidationError, Validator};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// The outcome of validating a value against a schema: a verdict plus the
/// collected field-qualified messages (empty when valid).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// A report with no violations.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

fn compile(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .should_validate_formats(true)
        .with_format("phone", is_phone)
        .with_format("slug", is_slug)
        .build(schema)
        .map_err(|err| err.to_string())
}

/// Validates `value` against `schema`, collecting every violation.
///
/// Boolean schemas behave as JSON Schema defines (`true` accepts
/// everything). A
/// malformed schema yields an invalid report naming the compilation
/// failure rather than an error.
pub fn validate(value: &Value, schema: &Value) -> ValidationReport {
    let validator = match compile(schema) {
        Ok(validator) => validator,
        Err(message) => {
            debug!(error = %message, "schema failed to compile");
            return ValidationReport::invalid(vec![format!("Invalid schema: {message}")]);
        }
    };

    let errors: Vec<String> = validator.iter_errors(value).map(render_error).collect();
    if errors.is_empty() {
        ValidationReport::valid()
    } else {
        ValidationReport::invalid(errors)
    }
}

/// Renders one violation as `dotted.field.path: message`, or just the
/// message when the violation is at the document root.
fn render_error(error: ValidationError<'_>) -> String {
    let message = constraint_message(&error);
    let path = dotted_path(&error.instance_path.to_string());
    if path.is_empty() {
        message
    } else {
        format!("{path}: {message}")
    }
}

/// Converts a JSON pointer ("/users/0/email") to a dotted path
/// ("users.0.email").
fn dotted_path(pointer: &str) -> String {
    pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

fn constraint_message(error: &ValidationError<'_>) -> String {
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            format!("Missing required field: {}", plain(property))
        }
        ValidationErrorKind::Type { kind } => match kind {
            TypeKind::Single(t) => format!("Must be of type {t}"),
            TypeKind::Multiple(types) => {
                let names: Vec<String> =
                    (*types).into_iter().map(|t| t.to_string()).collect();
                format!("Must be of type {}", names.join(" or "))
            }
        },
        ValidationErrorKind::Enum { options } => {
            let listed = match options {
                Value::Array(values) => values
                    .iter()
                    .map(plain)
                    .collect::<Vec<_>>()
                    .join(", "),
                other => plain(other),
            };
            format!("Must be one of: {listed}")
        }
        ValidationErrorKind::Minimum { limit } => format!("Must be >= {}", plain(limit)),
        ValidationErrorKind::Maximum { limit } => format!("Must be <= {}", plain(limit)),
        ValidationErrorKind::ExclusiveMinimum { limit } => {
            format!("Must be > {}", plain(limit))
        }
        ValidationErrorKind::ExclusiveMaximum { limit } => {
            format!("Must be < {}", plain(limit))
        }
        ValidationErrorKind::MinLength { limit } => {
            format!("Must be at least {limit} characters")
        }
        ValidationErrorKind::MaxLength { limit } => {
            format!("Must be at most {limit} characters")
        }
        ValidationErrorKind::Pattern { .. } => "Does not match required pattern".to_string(),
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unexpected field: {}", unexpected.join(", "))
        }
        ValidationErrorKind::Format { format } => format_message(format),
        _ => error.to_string(),
    }
}

fn format_message(format: &str) -> String {
    match format {
        "email" => "Must be a valid email address".to_string(),
        "uri" => "Must be a valid URI".to_string(),
        "date" => "Must be a valid date (YYYY-MM-DD)".to_string(),
        "date-time" => "Must be a valid date-time (RFC 3339)".to_string(),
        "time" => "Must be a valid time".to_string(),
        "ipv4" => "Must be a valid IPv4 address".to_string(),
        "ipv6" => "Must be a valid IPv6 address".to_string(),
        "hostname" => "Must be a valid hostname".to_string(),
        "phone" => "Must be a valid phone number".to_string(),
        "slug" => "Must be a valid slug (lowercase letters, digits, hyphens)".to_string(),
        other => format!("Must be a valid {other}"),
    }
}

/// `Value::to_string` quotes strings; constraint messages want them bare.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
