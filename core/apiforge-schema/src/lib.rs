//! JSON Schema validation for apiforge.
//!
//! Wraps the `jsonschema` crate with:
//! - the two custom formats this engine supports (`phone`, `slug`)
//! - constraint-specific, human-readable messages qualified by the dotted
//!   field path of the failing location
//! - the timestamp injection policy (`createdAt` / `updatedAt`) driven by
//!   the per-item schema's openness
//!
//! Validation never fails the caller: a malformed schema or malformed data
//! still produces a well-formed [`ValidationReport`] with `is_valid: false`.

mod formats;
mod timestamps;
mod validate;

pub use formats::{is_phone, is_slug};
pub use timestamps::{
    TIMESTAMP_FIELDS, TimestampPolicy, augment_with_timestamp, now_rfc3339, timestamp_policy,
};
pub use validate::{ValidationReport, validate};
