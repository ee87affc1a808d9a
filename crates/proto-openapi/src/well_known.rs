//! Canonical schemas for well-known message types.
//!
//! These types have a special JSON encoding in the proto3 JSON mapping, so
//! their structural fields are never expanded. Keys are leading-dot
//! fully-qualified names.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::schema::{Schema, ScalarType};

/// Fully-qualified name of `google.protobuf.Empty`.
pub const EMPTY: &str = ".google.protobuf.Empty";

static REGISTRY: LazyLock<HashMap<&'static str, Schema>> = LazyLock::new(|| {
    HashMap::from([
        // Arbitrary HTTP body; its content type is only known at runtime.
        (".google.api.HttpBody", Schema::scalar(ScalarType::String)),
        (
            ".google.protobuf.Timestamp",
            Schema::scalar_with_format(ScalarType::String, "date-time"),
        ),
        (
            ".google.type.Date",
            Schema::scalar_with_format(ScalarType::String, "date"),
        ),
        (
            ".google.type.DateTime",
            Schema::scalar_with_format(ScalarType::String, "date-time"),
        ),
        (
            ".google.protobuf.FieldMask",
            Schema::scalar_with_format(ScalarType::String, "field-mask"),
        ),
        (
            ".google.protobuf.Struct",
            Schema::Map {
                additional_properties: Box::new(Schema::Any),
            },
        ),
        // Closer to JSON `undefined` than to `{}` or `null`.
        (EMPTY, Schema::Absent),
    ])
});

/// Look up the canonical schema for a well-known type.
///
/// Returns `None` for anything outside the fixed set. `google.protobuf.Empty`
/// yields `Some(Schema::Absent)`.
#[must_use]
pub fn lookup(full_name: &str) -> Option<Schema> {
    REGISTRY.get(full_name).cloned()
}

/// Whether `full_name` is one of the well-known types.
#[must_use]
pub fn is_well_known(full_name: &str) -> bool {
    REGISTRY.contains_key(full_name)
}
