use apiforge_schema::validate;
use pretty_assertions::assert_eq;
use serde_json::json;

fn user_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["id", "name", "email"],
        "properties": {
            "id": {"type": "integer"},
            "name": {"type": "string", "minLength": 1},
            "email": {"type": "string", "format": "email"}
        },
        "additionalProperties": false
    })
}

// ── Valid data ───────────────────────────────────────────────────

#[test]
fn valid_value_produces_empty_error_list() {
    let report = validate(
        &json!({"id": 1, "name": "Ada", "email": "ada@example.com"}),
        &user_schema(),
    );
    assert!(report.is_valid);
    assert_eq!(report.errors, Vec::<String>::new());
}

#[test]
fn true_schema_accepts_anything() {
    assert!(validate(&json!({"anything": [1, 2, 3]}), &json!(true)).is_valid);
    assert!(validate(&json!(null), &json!({})).is_valid);
}

// ── Constraint-specific messages ─────────────────────────────────

#[test]
fn invalid_email_mentions_valid_email_address() {
    let report = validate(
        &json!({"id": 1, "name": "Ada", "email": "not-an-email"}),
        &user_schema(),
    );
    assert!(!report.is_valid);
    assert_eq!(report.errors, vec!["email: Must be a valid email address"]);
}

#[test]
fn missing_required_field_is_named() {
    let report = validate(&json!({"id": 1, "name": "Ada"}), &user_schema());
    assert_eq!(report.errors, vec!["Missing required field: email"]);
}

#[test]
fn wrong_type_names_expected_type() {
    let report = validate(
        &json!({"id": "one", "name": "Ada", "email": "ada@example.com"}),
        &user_schema(),
    );
    assert_eq!(report.errors, vec!["id: Must be of type integer"]);
}

#[test]
fn enum_violation_lists_options() {
    let schema = json!({"enum": ["a", "b", "c"]});
    let report = validate(&json!("d"), &schema);
    assert_eq!(report.errors, vec!["Must be one of: a, b, c"]);
}

#[test]
fn range_violations_show_limits() {
    let schema = json!({"type": "integer", "minimum": 1, "maximum": 10});
    assert_eq!(validate(&json!(0), &schema).errors, vec!["Must be >= 1"]);
    assert_eq!(validate(&json!(11), &schema).errors, vec!["Must be <= 10"]);
}

#[test]
fn length_violations_show_limits() {
    let schema = json!({"type": "string", "minLength": 3, "maxLength": 5});
    assert_eq!(
        validate(&json!("ab"), &schema).errors,
        vec!["Must be at least 3 characters"]
    );
    assert_eq!(
        validate(&json!("abcdef"), &schema).errors,
        vec!["Must be at most 5 characters"]
    );
}

#[test]
fn pattern_violation_is_generic() {
    let schema = json!({"type": "string", "pattern": "^[0-9]+$"});
    assert_eq!(
        validate(&json!("abc"), &schema).errors,
        vec!["Does not match required pattern"]
    );
}

#[test]
fn unexpected_field_is_named() {
    let report = validate(
        &json!({"id": 1, "name": "Ada", "email": "ada@example.com", "admin": true}),
        &user_schema(),
    );
    assert_eq!(report.errors, vec!["Unexpected field: admin"]);
}

// ── Field paths ──────────────────────────────────────────────────

#[test]
fn nested_failures_carry_dotted_paths() {
    let schema = json!({
        "type": "object",
        "properties": {
            "users": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "email": {"type": "string", "format": "email"}
                    }
                }
            }
        }
    });
    let report = validate(
        &json!({"users": [{"email": "ok@example.com"}, {"email": "bad"}]}),
        &schema,
    );
    assert_eq!(
        report.errors,
        vec!["users.1.email: Must be a valid email address"]
    );
}

// ── All errors collected ─────────────────────────────────────────

#[test]
fn all_violations_are_collected() {
    let report = validate(&json!({"email": "nope", "admin": 1}), &user_schema());
    assert!(!report.is_valid);
    assert!(report.errors.len() >= 3, "got: {:?}", report.errors);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("Missing required field: id"))
    );
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("Must be a valid email address"))
    );
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("Unexpected field: admin"))
    );
}

// ── Standard formats ─────────────────────────────────────────────

#[test]
fn standard_formats_are_enforced() {
    let cases = [
        ("uri", "not a uri", "Must be a valid URI"),
        ("date", "2024-13-40", "Must be a valid date (YYYY-MM-DD)"),
        ("date-time", "yesterday", "Must be a valid date-time (RFC 3339)"),
        ("time", "25:99:00", "Must be a valid time"),
        ("ipv4", "999.0.0.1", "Must be a valid IPv4 address"),
        ("ipv6", "not-ipv6", "Must be a valid IPv6 address"),
        ("hostname", "bad_host_", "Must be a valid hostname"),
    ];
    for (format, value, expected) in cases {
        let schema = json!({"type": "string", "format": format});
        let report = validate(&json!(value), &schema);
        assert_eq!(report.errors, vec![expected], "format {format}");
    }
}

#[test]
fn custom_formats_are_enforced() {
    let phone_schema = json!({"type": "string", "format": "phone"});
    assert!(validate(&json!("+14155550123"), &phone_schema).is_valid);
    assert_eq!(
        validate(&json!("call-me"), &phone_schema).errors,
        vec!["Must be a valid phone number"]
    );

    let slug_schema = json!({"type": "string", "format": "slug"});
    assert!(validate(&json!("hello-world-42"), &slug_schema).is_valid);
    assert_eq!(
        validate(&json!("Hello World"), &slug_schema).errors,
        vec!["Must be a valid slug (lowercase letters, digits, hyphens)"]
    );
}

// ── Malformed inputs never panic ─────────────────────────────────

#[test]
fn malformed_schema_reports_instead_of_failing() {
    let report = validate(&json!({"a": 1}), &json!({"type": "not-a-type"}));
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Invalid schema:"));
}

#[test]
fn false_schema_rejects_everything() {
    let report = validate(&json!({"a": 1}), &json!(false));
    assert!(!report.is_valid);
    assert!(!report.errors.is_empty());
}
