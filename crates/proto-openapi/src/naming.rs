//! Property key policy.

use proto_openapi_core::FieldDescriptor;

use crate::config::Naming;

/// Produces the property key for a field.
///
/// Called exactly once per field; the result is used verbatim.
pub trait FieldNameFormatter {
    /// Property key for `field`.
    fn format(&self, field: &FieldDescriptor<'_>) -> String;
}

impl FieldNameFormatter for Naming {
    fn format(&self, field: &FieldDescriptor<'_>) -> String {
        match self {
            Self::Json => field.json_name().to_string(),
            Self::Proto => field.name().to_string(),
        }
    }
}

impl<F> FieldNameFormatter for F
where
    F: Fn(&FieldDescriptor<'_>) -> String,
{
    fn format(&self, field: &FieldDescriptor<'_>) -> String {
        self(field)
    }
}
