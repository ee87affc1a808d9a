//! In-memory OpenAPI v3 schema tree.
//!
//! A [`Schema`] is built fresh for every generation call and never mutated
//! afterwards. Nothing is shared between sibling occurrences of the same
//! message type: each reference produces its own subtree.
//!
//! The [`Serialize`] impl writes the OpenAPI shape directly, so the tree can
//! be handed to `serde_yaml_ng` or `serde_json` without an intermediate
//! `Value`. Property order is preserved.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Primitive JSON Schema type of a [`ScalarSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
}

impl ScalarType {
    /// The JSON Schema keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// A primitive schema: `type`, optional `format`, optional `enum` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarSchema {
    /// JSON type.
    pub r#type: ScalarType,
    /// OpenAPI `format` (e.g., `int32`, `date-time`, `byte`).
    pub format: Option<String>,
    /// Allowed values, for string-represented enums. Empty otherwise.
    pub enum_values: Vec<String>,
}

impl ScalarSchema {
    /// A scalar without format or enum values.
    #[must_use]
    pub fn new(r#type: ScalarType) -> Self {
        Self {
            r#type,
            format: None,
            enum_values: Vec::new(),
        }
    }

    /// Attach a `format`.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Attach `enum` values.
    #[must_use]
    pub fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = values;
        self
    }
}

/// An OpenAPI v3 schema value (or `$ref`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// `type: object` with named properties in field declaration order.
    Object {
        /// `(property name, schema)` pairs. Order is significant.
        properties: Vec<(String, Schema)>,
        /// Required property names. Always empty under the proto3 policy.
        required: Vec<String>,
    },
    /// `type: array`.
    Array {
        /// Element schema.
        items: Box<Schema>,
    },
    /// `type: object` with `additionalProperties` (protobuf `map<K, V>`).
    Map {
        /// Value schema. Keys are implicitly strings.
        additional_properties: Box<Schema>,
    },
    /// Primitive value.
    Scalar(ScalarSchema),
    /// `$ref` to a schema defined under `components/schemas`.
    Reference {
        /// Reference target, e.g. `#/components/schemas/tree.v1.Node`.
        reference: String,
    },
    /// Any JSON value (`{}`); `additionalProperties: true` when used as a map value.
    Any,
    /// No schema at all. Serialized as `null`.
    ///
    /// Distinct from an empty object: `google.protobuf.Empty` and unsupported
    /// kinds produce this.
    Absent,
}

impl Schema {
    /// Shorthand for a bare [`ScalarSchema`].
    #[must_use]
    pub fn scalar(r#type: ScalarType) -> Self {
        Self::Scalar(ScalarSchema::new(r#type))
    }

    /// Shorthand for a [`ScalarSchema`] with a `format`.
    #[must_use]
    pub fn scalar_with_format(r#type: ScalarType, format: impl Into<String>) -> Self {
        Self::Scalar(ScalarSchema::new(r#type).with_format(format))
    }

    /// Whether this is the [`Absent`](Self::Absent) sentinel.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Look up an object property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Schema> {
        match self {
            Self::Object { properties, .. } => properties
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, schema)| schema),
            _ => None,
        }
    }

    /// Property names in order, for object schemas. Empty otherwise.
    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        match self {
            Self::Object { properties, .. } => {
                properties.iter().map(|(key, _)| key.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Every `$ref` target in this tree, depth first.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut targets = Vec::new();
        self.collect_references(&mut targets);
        targets
    }

    fn collect_references<'a>(&'a self, targets: &mut Vec<&'a str>) {
        match self {
            Self::Object { properties, .. } => {
                for (_, schema) in properties {
                    schema.collect_references(targets);
                }
            }
            Self::Array { items } => items.collect_references(targets),
            Self::Map {
                additional_properties,
            } => additional_properties.collect_references(targets),
            Self::Reference { reference } => targets.push(reference.as_str()),
            Self::Scalar(_) | Self::Any | Self::Absent => {}
        }
    }
}

/// Serializes `(key, value)` pairs as a map, preserving order.
pub(crate) struct OrderedMap<'a, V>(pub(crate) &'a [(String, V)]);

impl<V: Serialize> Serialize for OrderedMap<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for ScalarSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.format.is_some()) + usize::from(!self.enum_values.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", self.r#type.as_str())?;
        if let Some(format) = &self.format {
            map.serialize_entry("format", format)?;
        }
        if !self.enum_values.is_empty() {
            map.serialize_entry("enum", &self.enum_values)?;
        }
        map.end()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object {
                properties,
                required,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("properties", &OrderedMap(properties))?;
                if !required.is_empty() {
                    map.serialize_entry("required", required)?;
                }
                map.end()
            }
            Self::Array { items } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
                map.end()
            }
            Self::Map {
                additional_properties,
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "object")?;
                if matches!(**additional_properties, Self::Any) {
                    map.serialize_entry("additionalProperties", &true)?;
                } else {
                    map.serialize_entry("additionalProperties", additional_properties)?;
                }
                map.end()
            }
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Reference { reference } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$ref", reference)?;
                map.end()
            }
            Self::Any => serializer.serialize_map(Some(0))?.end(),
            Self::Absent => serializer.serialize_none(),
        }
    }
}
