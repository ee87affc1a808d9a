//! Descriptor → schema reflection.
//!
//! [`Reflector`] walks a message descriptor field by field and produces an
//! object [`Schema`]. The walk is split across three modules:
//! - this module: the per-message walk, well-known short-circuit, cycle guard
//! - [`field`]: per-field dispatch, map-entry synthesis, list wrapping
//! - [`scalar`]: primitive kinds and enums
//!
//! Every reference to a message type is expanded independently. There is no
//! memoization; only the types on the current expansion path are tracked, so
//! a type that appears twice as a sibling is expanded twice but a type that
//! contains itself is caught.

mod field;
mod scalar;

pub use field::{list_schema, map_schema};
pub use scalar::{enum_schema, primitive_schema};

use proto_openapi_core::MessageDescriptor;

use crate::config::{CyclePolicy, GeneratorConfig};
use crate::diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{Error, Result};
use crate::naming::FieldNameFormatter;
use crate::schema::Schema;
use crate::well_known;

/// Prefix for `$ref` targets emitted under [`CyclePolicy::Reference`].
pub const COMPONENTS_SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// Builds schemas for message types under one fixed configuration.
///
/// A reflector holds no state between top-level calls beyond its borrowed
/// configuration, formatter, and diagnostic sink.
///
/// # Example
///
/// ```ignore
/// let pool = DescriptorPool::decode(&bytes)?;
/// let config = GeneratorConfig::default();
/// let mut sink = TracingSink;
/// let mut reflector = Reflector::new(&config, &mut sink);
/// let schema = reflector.schema_for_message(pool.get_message_by_name(".shop.v1.Order").unwrap())?;
/// ```
pub struct Reflector<'r> {
    config: &'r GeneratorConfig,
    formatter: &'r dyn FieldNameFormatter,
    sink: &'r mut dyn DiagnosticSink,
    /// Fully-qualified names of the messages currently being expanded.
    path: Vec<String>,
}

impl<'r> Reflector<'r> {
    /// Create a reflector using the formatter selected by `config.naming`.
    pub fn new(config: &'r GeneratorConfig, sink: &'r mut dyn DiagnosticSink) -> Self {
        Self {
            config,
            formatter: &config.naming,
            sink,
            path: Vec::new(),
        }
    }

    /// Replace the property key formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: &'r dyn FieldNameFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Build the schema for one message type.
    ///
    /// Well-known types return their canonical schema without looking at
    /// their fields. Everything else becomes an object whose properties
    /// follow field declaration order; fields without a schema still get a
    /// property holding [`Schema::Absent`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicSchema`] when the type graph loops back on the
    /// current expansion path and the policy is [`CyclePolicy::Error`].
    pub fn schema_for_message(&mut self, message: MessageDescriptor<'_>) -> Result<Schema> {
        let full_name = message.full_name();

        if let Some(schema) = well_known::lookup(full_name) {
            tracing::trace!(message_type = full_name, "well-known type");
            return Ok(schema);
        }

        if let Some(start) = self.path.iter().position(|n| n == full_name) {
            return self.close_cycle(start, full_name);
        }

        tracing::trace!(message_type = full_name, depth = self.path.len(), "expanding message");
        self.path.push(full_name.to_string());
        let properties = self.properties(message);
        self.path.pop();

        Ok(Schema::Object {
            properties: properties?,
            required: Vec::new(),
        })
    }

    fn properties(&mut self, message: MessageDescriptor<'_>) -> Result<Vec<(String, Schema)>> {
        let fields = message.fields();
        let mut properties = Vec::with_capacity(fields.len());
        for field in fields {
            properties.push(self.property_for_field(field)?);
        }
        Ok(properties)
    }

    fn close_cycle(&self, start: usize, full_name: &str) -> Result<Schema> {
        match self.config.cycle_policy {
            CyclePolicy::Error => {
                let mut path = self.path[start..].to_vec();
                path.push(full_name.to_string());
                Err(Error::CyclicSchema { path })
            }
            CyclePolicy::Reference => {
                tracing::debug!(message_type = full_name, "cycle closed with $ref");
                Ok(Schema::Reference {
                    reference: schema_reference(full_name),
                })
            }
        }
    }

    fn warn(&mut self, message_type: &str, field: &str, message: String) {
        self.sink.warn(Diagnostic {
            message_type: message_type.to_string(),
            field: field.to_string(),
            message,
        });
    }
}

/// `$ref` target for a message: `#/components/schemas/<name without leading dot>`.
#[must_use]
pub fn schema_reference(full_name: &str) -> String {
    format!(
        "{COMPONENTS_SCHEMAS_PREFIX}{}",
        full_name.strip_prefix('.').unwrap_or(full_name)
    )
}

/// Build the schema for `message` with diagnostics routed to `tracing`.
///
/// # Errors
///
/// See [`Reflector::schema_for_message`].
pub fn schema_for_message(
    message: MessageDescriptor<'_>,
    config: &GeneratorConfig,
) -> Result<Schema> {
    let mut sink = TracingSink;
    Reflector::new(config, &mut sink).schema_for_message(message)
}
