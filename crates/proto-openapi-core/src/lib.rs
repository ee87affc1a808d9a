//! Protobuf descriptor types for the proto-openapi ecosystem.
//!
//! This crate provides two layers:
//!
//! - [`descriptor`]: minimal [`prost::Message`] types that decode a binary
//!   `FileDescriptorSet` (as produced by `protoc --descriptor_set_out` or
//!   `buf build --as-file-descriptor-set`).
//! - [`reflect`]: a read-only reflection view over a decoded set, resolving
//!   fully-qualified type names, field kinds, and map-entry synthesis.
//!
//! `proto-openapi` builds its schemas on top of the reflection view. You
//! should not need to depend on this crate directly unless you are
//! assembling descriptor fixtures by hand.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod descriptor;
pub mod reflect;

pub use reflect::{DescriptorPool, EnumDescriptor, FieldDescriptor, Kind, MessageDescriptor};
