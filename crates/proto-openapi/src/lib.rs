#![allow(clippy::doc_markdown)] // README uses "OpenAPI" proper noun throughout
#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod components;
mod config;
mod diagnostic;
mod error;
mod naming;
mod reflector;
mod schema;
pub mod well_known;

pub use components::{components, Components};
pub use config::{CyclePolicy, EnumType, GeneratorConfig, Naming};
pub use diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{Error, Result};
pub use naming::FieldNameFormatter;
pub use reflector::{
    enum_schema, list_schema, map_schema, primitive_schema, schema_for_message, schema_reference,
    Reflector, COMPONENTS_SCHEMAS_PREFIX,
};
pub use schema::{ScalarSchema, ScalarType, Schema};

/// Descriptor layer re-exported from [`proto_openapi_core`].
pub use proto_openapi_core::{
    descriptor, DescriptorPool, EnumDescriptor, FieldDescriptor, Kind, MessageDescriptor,
};
