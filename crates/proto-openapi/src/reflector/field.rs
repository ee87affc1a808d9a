//! Per-field dispatch.
//!
//! Order of decisions for one field:
//! 1. message kind + map → `additionalProperties` over the entry's `value` field, returned as is
//! 2. message kind → recurse into the referenced message
//! 3. anything else → [`scalar`](super::scalar)
//!
//! Plain repeated fields are wrapped in an array exactly once, after the
//! base schema is known. Map fields are never wrapped.

use proto_openapi_core::{FieldDescriptor, Kind};

use super::Reflector;
use crate::error::Result;
use crate::schema::Schema;

impl Reflector<'_> {
    /// Build the schema for one field, including map and list wrapping.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::CyclicSchema`](crate::Error::CyclicSchema) from
    /// nested message expansion.
    pub fn schema_for_field(&mut self, field: FieldDescriptor<'_>) -> Result<Schema> {
        if field.kind() == Kind::Message && field.is_map() {
            return self.schema_for_map_field(field);
        }

        let base = if field.kind() == Kind::Message {
            if let Some(message) = field.message() {
                self.schema_for_message(message)?
            } else {
                self.unresolved(field);
                Schema::Absent
            }
        } else {
            self.schema_for_scalar_field(field)
        };

        Ok(if field.is_list() {
            list_schema(base)
        } else {
            base
        })
    }

    /// `(property key, schema)` for one field. The formatter runs once.
    pub(super) fn property_for_field(
        &mut self,
        field: FieldDescriptor<'_>,
    ) -> Result<(String, Schema)> {
        let name = self.formatter.format(&field);
        let schema = self.schema_for_field(field)?;
        Ok((name, schema))
    }

    /// `map<K, V>` → `additionalProperties: <schema of V>`. Keys are not schema'd.
    fn schema_for_map_field(&mut self, field: FieldDescriptor<'_>) -> Result<Schema> {
        let value = if let Some(value_field) = field.map_value() {
            self.schema_for_field(value_field)?
        } else {
            self.warn(
                field.containing_message().full_name(),
                field.name(),
                "map entry has no value field; emitting no schema".to_string(),
            );
            Schema::Absent
        };
        Ok(map_schema(value))
    }

    fn unresolved(&mut self, field: FieldDescriptor<'_>) {
        let target = field.type_name().unwrap_or("<none>");
        self.warn(
            field.containing_message().full_name(),
            field.name(),
            format!("unresolved type reference `{target}`; emitting no schema"),
        );
    }
}

/// Wrap an item schema (possibly [`Schema::Absent`]) in `type: array`.
#[must_use]
pub fn list_schema(items: Schema) -> Schema {
    Schema::Array {
        items: Box::new(items),
    }
}

/// Wrap a map value schema in `type: object, additionalProperties`.
#[must_use]
pub fn map_schema(value: Schema) -> Schema {
    Schema::Map {
        additional_properties: Box::new(value),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proto_openapi_core::descriptor::*;
    use proto_openapi_core::DescriptorPool;

    use super::*;
    use crate::config::GeneratorConfig;
    use crate::diagnostic::Diagnostic;
    use crate::schema::ScalarType;

    fn field(name: &str, number: i32, ty: i32, lbl: i32) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.to_string()),
            number: Some(number),
            label: Some(lbl),
            r#type: Some(ty),
            type_name: None,
            json_name: None,
        }
    }

    fn typed(name: &str, number: i32, ty: i32, lbl: i32, type_name: &str) -> FieldDescriptorProto {
        FieldDescriptorProto {
            type_name: Some(type_name.to_string()),
            ..field(name, number, ty, lbl)
        }
    }

    fn map_entry(name: &str, value: FieldDescriptorProto) -> DescriptorProto {
        DescriptorProto {
            name: Some(name.to_string()),
            field: vec![field("key", 1, field_type::STRING, label::OPTIONAL), value],
            nested_type: vec![],
            enum_type: vec![],
            options: Some(MessageOptions {
                map_entry: Some(true),
            }),
        }
    }

    /// ```proto
    /// message Inventory {
    ///   map<string, string> labels = 1;
    ///   map<string, Bin> bins = 2;
    ///   repeated bool flags = 3;
    ///   repeated Bin history = 4;
    ///   Ghost ghost = 5;
    ///   repeated google.protobuf.Empty nothing = 6;
    /// }
    /// message Bin { int32 count = 1; }
    /// ```
    fn inventory_pool() -> DescriptorPool {
        let inventory = DescriptorProto {
            name: Some("Inventory".to_string()),
            field: vec![
                typed("labels", 1, field_type::MESSAGE, label::REPEATED, ".store.v1.Inventory.LabelsEntry"),
                typed("bins", 2, field_type::MESSAGE, label::REPEATED, ".store.v1.Inventory.BinsEntry"),
                field("flags", 3, field_type::BOOL, label::REPEATED),
                typed("history", 4, field_type::MESSAGE, label::REPEATED, ".store.v1.Bin"),
                typed("ghost", 5, field_type::MESSAGE, label::OPTIONAL, ".store.v1.Ghost"),
                typed("nothing", 6, field_type::MESSAGE, label::REPEATED, ".google.protobuf.Empty"),
            ],
            nested_type: vec![
                map_entry(
                    "LabelsEntry",
                    field("value", 2, field_type::STRING, label::OPTIONAL),
                ),
                map_entry(
                    "BinsEntry",
                    typed("value", 2, field_type::MESSAGE, label::OPTIONAL, ".store.v1.Bin"),
                ),
            ],
            enum_type: vec![],
            options: None,
        };
        let bin = DescriptorProto {
            name: Some("Bin".to_string()),
            field: vec![field("count", 1, field_type::INT32, label::OPTIONAL)],
            nested_type: vec![],
            enum_type: vec![],
            options: None,
        };
        let empty = DescriptorProto {
            name: Some("Empty".to_string()),
            field: vec![],
            nested_type: vec![],
            enum_type: vec![],
            options: None,
        };

        DescriptorPool::new(FileDescriptorSet {
            file: vec![
                FileDescriptorProto {
                    name: Some("google/protobuf/empty.proto".to_string()),
                    package: Some("google.protobuf".to_string()),
                    message_type: vec![empty],
                    enum_type: vec![],
                },
                FileDescriptorProto {
                    name: Some("store.proto".to_string()),
                    package: Some("store.v1".to_string()),
                    message_type: vec![inventory, bin],
                    enum_type: vec![],
                },
            ],
        })
    }

    fn bin_schema() -> Schema {
        Schema::Object {
            properties: vec![(
                "count".to_string(),
                Schema::scalar_with_format(ScalarType::Integer, "int32"),
            )],
            required: Vec::new(),
        }
    }

    fn field_schema(name: &str) -> (Schema, Vec<Diagnostic>) {
        let pool = inventory_pool();
        let field = pool
            .get_message_by_name(".store.v1.Inventory")
            .and_then(|m| m.get_field_by_name(name))
            .unwrap();
        let config = GeneratorConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let schema = Reflector::new(&config, &mut sink)
            .schema_for_field(field)
            .unwrap();
        (schema, sink)
    }

    #[test]
    fn string_map_is_single_additional_properties_schema() {
        let (schema, _) = field_schema("labels");
        assert_eq!(schema, map_schema(Schema::scalar(ScalarType::String)));
    }

    #[test]
    fn message_map_recurses_into_value_type() {
        let (schema, _) = field_schema("bins");
        assert_eq!(schema, map_schema(bin_schema()));
    }

    #[test]
    fn repeated_bool_is_array_of_boolean() {
        let (schema, _) = field_schema("flags");
        assert_eq!(schema, list_schema(Schema::scalar(ScalarType::Boolean)));
    }

    #[test]
    fn repeated_message_is_array_of_object() {
        let (schema, _) = field_schema("history");
        assert_eq!(schema, list_schema(bin_schema()));
    }

    #[test]
    fn repeated_empty_wraps_absent() {
        let (schema, diagnostics) = field_schema("nothing");
        assert_eq!(schema, list_schema(Schema::Absent));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unresolved_message_is_absent_with_diagnostic() {
        let (schema, diagnostics) = field_schema("ghost");
        assert_eq!(schema, Schema::Absent);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message_type, ".store.v1.Inventory");
        assert_eq!(diagnostics[0].field, "ghost");
        assert!(diagnostics[0].message.contains(".store.v1.Ghost"));
    }

    /// `map` field whose entry declares only `key`.
    #[test]
    fn map_entry_without_value_is_absent_with_diagnostic() {
        let entry = DescriptorProto {
            name: Some("TagsEntry".to_string()),
            field: vec![field("key", 1, field_type::STRING, label::OPTIONAL)],
            nested_type: vec![],
            enum_type: vec![],
            options: Some(MessageOptions {
                map_entry: Some(true),
            }),
        };
        let pool = DescriptorPool::new(FileDescriptorSet {
            file: vec![FileDescriptorProto {
                name: Some("odd.proto".to_string()),
                package: Some("odd.v1".to_string()),
                message_type: vec![DescriptorProto {
                    name: Some("Tagged".to_string()),
                    field: vec![typed(
                        "tags",
                        1,
                        field_type::MESSAGE,
                        label::REPEATED,
                        ".odd.v1.Tagged.TagsEntry",
                    )],
                    nested_type: vec![entry],
                    enum_type: vec![],
                    options: None,
                }],
                enum_type: vec![],
            }],
        });
        let tags = pool
            .get_message_by_name(".odd.v1.Tagged")
            .and_then(|m| m.get_field_by_name("tags"))
            .unwrap();

        let config = GeneratorConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let schema = Reflector::new(&config, &mut sink)
            .schema_for_field(tags)
            .unwrap();

        assert_eq!(schema, map_schema(Schema::Absent));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].message_type, ".odd.v1.Tagged");
        assert_eq!(sink[0].field, "tags");
        assert!(sink[0].message.contains("no value field"));
    }

    #[test]
    fn map_field_contributes_one_property() {
        let pool = inventory_pool();
        let inventory = pool.get_message_by_name(".store.v1.Inventory").unwrap();
        let config = GeneratorConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let schema = Reflector::new(&config, &mut sink)
            .schema_for_message(inventory)
            .unwrap();

        assert_eq!(
            schema.property_names(),
            vec!["labels", "bins", "flags", "history", "ghost", "nothing"]
        );
    }

    #[test]
    fn custom_formatter_is_called_once_per_field() {
        use std::cell::Cell;

        use crate::naming::FieldNameFormatter;

        struct Counting(Cell<usize>);

        impl FieldNameFormatter for Counting {
            fn format(&self, field: &FieldDescriptor<'_>) -> String {
                self.0.set(self.0.get() + 1);
                format!("x_{}", field.name())
            }
        }

        let pool = inventory_pool();
        let bin = pool.get_message_by_name(".store.v1.Bin").unwrap();
        let formatter = Counting(Cell::new(0));

        let config = GeneratorConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let schema = Reflector::new(&config, &mut sink)
            .with_formatter(&formatter)
            .schema_for_message(bin)
            .unwrap();

        assert_eq!(schema.property_names(), vec!["x_count"]);
        assert_eq!(formatter.0.get(), 1);
    }
}
