//! Primitive kinds and enums.
//!
//! 64-bit integers are emitted as strings: the proto3 JSON mapping encodes
//! them as decimal strings because most JSON number implementations lose
//! precision past 2^53.

use proto_openapi_core::{EnumDescriptor, FieldDescriptor, Kind};

use super::Reflector;
use crate::config::EnumType;
use crate::schema::{ScalarSchema, ScalarType, Schema};

impl Reflector<'_> {
    /// Schema for a non-message field, before list wrapping.
    ///
    /// Unsupported kinds (`group`, unknown type numbers) and unresolvable
    /// enum references yield [`Schema::Absent`] plus a diagnostic.
    pub(super) fn schema_for_scalar_field(&mut self, field: FieldDescriptor<'_>) -> Schema {
        let kind = field.kind();

        if let Some(schema) = primitive_schema(kind) {
            return schema;
        }

        if kind == Kind::Enum {
            if let Some(enum_desc) = field.enum_type() {
                return enum_schema(self.config.enum_type, enum_desc);
            }
            let target = field.type_name().unwrap_or("<none>");
            self.warn(
                field.containing_message().full_name(),
                field.name(),
                format!("unresolved enum reference `{target}`; emitting no schema"),
            );
            return Schema::Absent;
        }

        self.warn(
            field.containing_message().full_name(),
            field.name(),
            format!("unsupported field kind `{kind}`; emitting no schema"),
        );
        Schema::Absent
    }
}

/// Schema for a primitive kind.
///
/// Returns `None` for kinds that need more than the kind itself: enums,
/// messages, groups, and unknown type numbers.
#[must_use]
pub fn primitive_schema(kind: Kind) -> Option<Schema> {
    let schema = match kind {
        Kind::String => Schema::scalar(ScalarType::String),
        Kind::Int32 | Kind::Sint32 | Kind::Uint32 | Kind::Sfixed32 | Kind::Fixed32 => {
            Schema::scalar_with_format(ScalarType::Integer, kind.name())
        }
        Kind::Int64 | Kind::Sint64 | Kind::Uint64 | Kind::Sfixed64 | Kind::Fixed64 => {
            Schema::scalar(ScalarType::String)
        }
        Kind::Bool => Schema::scalar(ScalarType::Boolean),
        Kind::Float | Kind::Double => Schema::scalar_with_format(ScalarType::Number, kind.name()),
        Kind::Bytes => Schema::scalar_with_format(ScalarType::String, "byte"),
        Kind::Enum | Kind::Message | Kind::Group | Kind::Unknown(_) => return None,
    };
    Some(schema)
}

/// Schema for an enum under the configured representation.
///
/// Both representations carry `format: enum`; only the string form lists
/// the value names.
#[must_use]
pub fn enum_schema(enum_type: EnumType, enum_desc: EnumDescriptor<'_>) -> Schema {
    let scalar = match enum_type {
        EnumType::String => ScalarSchema::new(ScalarType::String)
            .with_format("enum")
            .with_enum_values(enum_desc.value_names().map(ToString::to_string).collect()),
        EnumType::Integer => ScalarSchema::new(ScalarType::Integer).with_format("enum"),
    };
    Schema::Scalar(scalar)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proto_openapi_core::descriptor::*;
    use proto_openapi_core::DescriptorPool;

    use super::*;
    use crate::config::GeneratorConfig;
    use crate::diagnostic::Diagnostic;

    #[test]
    fn thirty_two_bit_integers_keep_kind_as_format() {
        for kind in [
            Kind::Int32,
            Kind::Sint32,
            Kind::Uint32,
            Kind::Sfixed32,
            Kind::Fixed32,
        ] {
            assert_eq!(
                primitive_schema(kind),
                Some(Schema::scalar_with_format(ScalarType::Integer, kind.name())),
                "{kind}"
            );
        }
    }

    #[test]
    fn sixty_four_bit_integers_are_strings() {
        for kind in [
            Kind::Int64,
            Kind::Sint64,
            Kind::Uint64,
            Kind::Sfixed64,
            Kind::Fixed64,
        ] {
            assert_eq!(
                primitive_schema(kind),
                Some(Schema::scalar(ScalarType::String)),
                "{kind}"
            );
        }
    }

    #[test]
    fn floats_bool_bytes_string() {
        assert_eq!(
            primitive_schema(Kind::Float),
            Some(Schema::scalar_with_format(ScalarType::Number, "float"))
        );
        assert_eq!(
            primitive_schema(Kind::Double),
            Some(Schema::scalar_with_format(ScalarType::Number, "double"))
        );
        assert_eq!(
            primitive_schema(Kind::Bool),
            Some(Schema::scalar(ScalarType::Boolean))
        );
        assert_eq!(
            primitive_schema(Kind::Bytes),
            Some(Schema::scalar_with_format(ScalarType::String, "byte"))
        );
        assert_eq!(
            primitive_schema(Kind::String),
            Some(Schema::scalar(ScalarType::String))
        );
    }

    #[test]
    fn non_primitive_kinds_need_more_context() {
        assert!(primitive_schema(Kind::Enum).is_none());
        assert!(primitive_schema(Kind::Message).is_none());
        assert!(primitive_schema(Kind::Group).is_none());
        assert!(primitive_schema(Kind::Unknown(42)).is_none());
    }

    /// `message Light { Color color = 1; group Legacy = 2; <type 99> odd = 3; Shade shade = 4; }`
    fn light_pool() -> DescriptorPool {
        fn field(name: &str, number: i32, ty: i32, type_name: Option<&str>) -> FieldDescriptorProto {
            FieldDescriptorProto {
                name: Some(name.to_string()),
                number: Some(number),
                label: Some(label::OPTIONAL),
                r#type: Some(ty),
                type_name: type_name.map(ToString::to_string),
                json_name: None,
            }
        }

        DescriptorPool::new(FileDescriptorSet {
            file: vec![FileDescriptorProto {
                name: Some("light.proto".to_string()),
                package: Some("light.v1".to_string()),
                message_type: vec![DescriptorProto {
                    name: Some("Light".to_string()),
                    field: vec![
                        field("color", 1, field_type::ENUM, Some(".light.v1.Color")),
                        field("legacy", 2, field_type::GROUP, Some(".light.v1.Light.Legacy")),
                        field("odd", 3, 99, None),
                        field("shade", 4, field_type::ENUM, Some(".light.v1.Shade")),
                    ],
                    nested_type: vec![],
                    enum_type: vec![],
                    options: None,
                }],
                enum_type: vec![EnumDescriptorProto {
                    name: Some("Color".to_string()),
                    value: ["COLOR_UNSPECIFIED", "COLOR_RED", "COLOR_GREEN"]
                        .iter()
                        .zip(0..)
                        .map(|(name, number)| EnumValueDescriptorProto {
                            name: Some((*name).to_string()),
                            number: Some(number),
                        })
                        .collect(),
                }],
            }],
        })
    }

    fn light_schema(config: &GeneratorConfig) -> (Schema, Vec<Diagnostic>) {
        let pool = light_pool();
        let light = pool.get_message_by_name(".light.v1.Light").unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let schema = Reflector::new(config, &mut sink)
            .schema_for_message(light)
            .unwrap();
        (schema, sink)
    }

    #[test]
    fn enum_as_integer_by_default() {
        let (schema, _) = light_schema(&GeneratorConfig::default());
        assert_eq!(
            schema.property("color"),
            Some(&Schema::scalar_with_format(ScalarType::Integer, "enum"))
        );
    }

    #[test]
    fn enum_as_string_lists_names_in_order() {
        let config = GeneratorConfig::default().enum_type(EnumType::String);
        let (schema, _) = light_schema(&config);
        assert_eq!(
            schema.property("color"),
            Some(&Schema::Scalar(
                ScalarSchema::new(ScalarType::String)
                    .with_format("enum")
                    .with_enum_values(vec![
                        "COLOR_UNSPECIFIED".to_string(),
                        "COLOR_RED".to_string(),
                        "COLOR_GREEN".to_string(),
                    ])
            ))
        );
    }

    #[test]
    fn unsupported_kinds_degrade_to_absent_and_continue() {
        let (schema, diagnostics) = light_schema(&GeneratorConfig::default());

        // Every field still contributes a property, in declaration order.
        assert_eq!(schema.property_names(), vec!["color", "legacy", "odd", "shade"]);
        assert_eq!(schema.property("legacy"), Some(&Schema::Absent));
        assert_eq!(schema.property("odd"), Some(&Schema::Absent));
        assert_eq!(schema.property("shade"), Some(&Schema::Absent));

        let fields: Vec<&str> = diagnostics.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["legacy", "odd", "shade"]);
        assert!(diagnostics[0].message.contains("`group`"));
        assert!(diagnostics[1].message.contains("unknown(99)"));
        assert!(diagnostics[2].message.contains(".light.v1.Shade"));
    }
}
