//! Generator configuration loaded from YAML.
//!
//! The configuration is read once and held constant for a whole generation
//! run; nothing in the reflector mutates it.
//!
//! # File format
//!
//! ```yaml
//! # api/openapi/schema.yaml
//!
//! # Enum representation: `integer` (default) or `string`.
//! enum_type: string
//!
//! # Property keys: `json` (default, lowerCamelCase json_name) or `proto`.
//! naming: proto
//!
//! # Self-referencing types: `error` (default) or `reference`.
//! cycle_policy: reference
//! ```

use std::path::Path;

use serde::Deserialize;

/// How enum fields are represented in the generated schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum EnumType {
    /// `type: integer, format: enum` (the proto wire number).
    #[default]
    Integer,
    /// `type: string, format: enum` with the value names listed under `enum`.
    String,
}

/// Which field name becomes the property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Naming {
    /// The field's `json_name` (`lowerCamelCase` unless overridden in the proto).
    #[default]
    Json,
    /// The field name exactly as declared in the `.proto` file.
    Proto,
}

/// What to do when a message type is reached again while it is still being expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Fail with [`Error::CyclicSchema`](crate::Error::CyclicSchema).
    #[default]
    Error,
    /// Emit `$ref: "#/components/schemas/<name>"` where the cycle closes.
    Reference,
}

/// Schema generation options.
///
/// Construct with [`GeneratorConfig::default`] and adjust via builder methods,
/// or load from a YAML file via [`GeneratorConfig::load`]. Missing keys keep
/// their defaults.
///
/// # Example
///
/// ```
/// use proto_openapi::{CyclePolicy, EnumType, GeneratorConfig};
///
/// let config = GeneratorConfig::default()
///     .enum_type(EnumType::String)
///     .cycle_policy(CyclePolicy::Reference);
/// assert_eq!(config.enum_type, EnumType::String);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct GeneratorConfig {
    /// Enum representation.
    pub enum_type: EnumType,

    /// Property key policy.
    pub naming: Naming,

    /// Handling of self-referencing message types.
    pub cycle_policy: CyclePolicy,
}

impl GeneratorConfig {
    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Set the enum representation.
    #[must_use]
    pub fn enum_type(mut self, enum_type: EnumType) -> Self {
        self.enum_type = enum_type;
        self
    }

    /// Set the property key policy.
    #[must_use]
    pub fn naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    /// Set the cycle handling policy.
    #[must_use]
    pub fn cycle_policy(mut self, cycle_policy: CyclePolicy) -> Self {
        self.cycle_policy = cycle_policy;
        self
    }
}
