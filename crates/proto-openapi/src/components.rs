//! Assembles message schemas into an OpenAPI `components/schemas` section.
//!
//! Only the components map is produced; paths, servers, and the rest of the
//! document belong to whatever tool embeds the output.

use std::collections::{HashSet, VecDeque};

use proto_openapi_core::{DescriptorPool, MessageDescriptor};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::diagnostic::DiagnosticSink;
use crate::error::{Error, Result};
use crate::reflector::{Reflector, COMPONENTS_SCHEMAS_PREFIX};
use crate::schema::{OrderedMap, Schema};
use crate::well_known;

/// Named schemas, keyed by fully-qualified name without the leading dot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    schemas: Vec<(String, Schema)>,
}

impl Components {
    /// `(name, schema)` pairs in generation order.
    #[must_use]
    pub fn schemas(&self) -> &[(String, Schema)] {
        &self.schemas
    }

    /// Look up a schema by name (`shop.v1.Order`).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    /// Render as `components: { schemas: ... }` YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct SchemasSection<'a>(&'a [(String, Schema)]);

impl Serialize for SchemasSection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("schemas", &OrderedMap(self.0))?;
        map.end()
    }
}

impl Serialize for Components {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("components", &SchemasSection(&self.schemas))?;
        map.end()
    }
}

/// Build schemas for the named messages, or for every message when `names` is empty.
///
/// Names may be given with or without the leading dot. When `names` is
/// empty, synthetic map-entry messages and well-known types are skipped.
/// Every message is expanded on its own; nested types are inlined, never
/// shared. A `$ref` emitted under [`CyclePolicy::Reference`] pulls its
/// target into the document as well, so every reference resolves.
///
/// # Errors
///
/// Returns [`Error::MessageNotFound`] for a name missing from the pool, or
/// [`Error::CyclicSchema`] per the configured cycle policy.
///
/// [`CyclePolicy::Reference`]: crate::CyclePolicy::Reference
pub fn components(
    pool: &DescriptorPool,
    config: &GeneratorConfig,
    names: &[&str],
    sink: &mut dyn DiagnosticSink,
) -> Result<Components> {
    let messages: Vec<MessageDescriptor<'_>> = if names.is_empty() {
        pool.messages()
            .filter(|m| !m.is_map_entry() && !well_known::is_well_known(m.full_name()))
            .collect()
    } else {
        names
            .iter()
            .map(|name| {
                let full_name = if name.starts_with('.') {
                    (*name).to_string()
                } else {
                    format!(".{name}")
                };
                pool.get_message_by_name(&full_name)
                    .ok_or_else(|| Error::MessageNotFound {
                        name: (*name).to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?
    };

    let mut reflector = Reflector::new(config, sink);
    let mut schemas = Vec::with_capacity(messages.len());
    let mut seen = HashSet::new();
    let mut pending: VecDeque<MessageDescriptor<'_>> = messages.into();

    while let Some(message) = pending.pop_front() {
        let full_name = message.full_name();
        let key = full_name.strip_prefix('.').unwrap_or(full_name);
        if !seen.insert(key) {
            continue;
        }

        let schema = reflector.schema_for_message(message)?;
        for target in schema.references() {
            let name = target.strip_prefix(COMPONENTS_SCHEMAS_PREFIX).unwrap_or(target);
            if let Some(referenced) = pool.get_message_by_name(&format!(".{name}")) {
                tracing::debug!(schema = key, reference = name, "queued referenced schema");
                pending.push_back(referenced);
            }
        }

        tracing::debug!(schema = key, "generated component schema");
        schemas.push((key.to_string(), schema));
    }

    Ok(Components { schemas })
}
