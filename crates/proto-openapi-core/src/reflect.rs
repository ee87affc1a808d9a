//! Read-only reflection view over a decoded [`FileDescriptorSet`].
//!
//! [`DescriptorPool`] flattens every message and enum (nested ones included)
//! into a single index keyed by leading-dot fully-qualified name, e.g.
//! `.google.protobuf.Timestamp`. Descriptor handles ([`MessageDescriptor`],
//! [`FieldDescriptor`], [`EnumDescriptor`]) are cheap `Copy` views borrowing
//! the pool, so a schema walk never clones descriptor data.
//!
//! The pool never validates the graph. A `type_name` that points nowhere
//! simply resolves to `None`.

use std::collections::HashMap;
use std::fmt;

use prost::Message as _;

use crate::descriptor::{
    field_type, label, DescriptorProto, EnumDescriptorProto, FileDescriptorSet,
};

/// Primitive or composite kind of a protobuf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `double`
    Double,
    /// `float`
    Float,
    /// `int64`
    Int64,
    /// `uint64`
    Uint64,
    /// `int32`
    Int32,
    /// `fixed64`
    Fixed64,
    /// `fixed32`
    Fixed32,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// proto2 `group`
    Group,
    /// Message-typed field (including synthetic map entries).
    Message,
    /// `bytes`
    Bytes,
    /// `uint32`
    Uint32,
    /// Enum-typed field.
    Enum,
    /// `sfixed32`
    Sfixed32,
    /// `sfixed64`
    Sfixed64,
    /// `sint32`
    Sint32,
    /// `sint64`
    Sint64,
    /// A type number this crate does not know about (or a missing one).
    Unknown(i32),
}

impl Kind {
    /// Map a raw `FieldDescriptorProto.type` value to a kind.
    #[must_use]
    pub fn from_type_id(id: i32) -> Self {
        match id {
            field_type::DOUBLE => Self::Double,
            field_type::FLOAT => Self::Float,
            field_type::INT64 => Self::Int64,
            field_type::UINT64 => Self::Uint64,
            field_type::INT32 => Self::Int32,
            field_type::FIXED64 => Self::Fixed64,
            field_type::FIXED32 => Self::Fixed32,
            field_type::BOOL => Self::Bool,
            field_type::STRING => Self::String,
            field_type::GROUP => Self::Group,
            field_type::MESSAGE => Self::Message,
            field_type::BYTES => Self::Bytes,
            field_type::UINT32 => Self::Uint32,
            field_type::ENUM => Self::Enum,
            field_type::SFIXED32 => Self::Sfixed32,
            field_type::SFIXED64 => Self::Sfixed64,
            field_type::SINT32 => Self::Sint32,
            field_type::SINT64 => Self::Sint64,
            other => Self::Unknown(other),
        }
    }

    /// The `.proto` keyword for this kind (`"int32"`, `"sfixed64"`, …).
    ///
    /// Used verbatim as the OpenAPI `format` of integer and number schemas.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int32 => "int32",
            Self::Fixed64 => "fixed64",
            Self::Fixed32 => "fixed32",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Group => "group",
            Self::Message => "message",
            Self::Bytes => "bytes",
            Self::Uint32 => "uint32",
            Self::Enum => "enum",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "unknown({id})"),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug)]
struct MessageData {
    full_name: String,
    name: String,
    fields: Vec<FieldData>,
    map_entry: bool,
}

#[derive(Debug)]
struct FieldData {
    name: String,
    json_name: String,
    number: i32,
    label: i32,
    kind: Kind,
    type_name: Option<String>,
}

#[derive(Debug)]
struct EnumData {
    full_name: String,
    name: String,
    values: Vec<(String, i32)>,
}

/// Flattened, immutable index of all messages and enums in a descriptor set.
#[derive(Debug, Default)]
pub struct DescriptorPool {
    messages: Vec<MessageData>,
    enums: Vec<EnumData>,
    message_index: HashMap<String, usize>,
    enum_index: HashMap<String, usize>,
}

impl DescriptorPool {
    /// Decode raw `FileDescriptorSet` bytes and index them.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoded `FileDescriptorSet`.
    pub fn decode(bytes: &[u8]) -> Result<Self, prost::DecodeError> {
        Ok(Self::new(FileDescriptorSet::decode(bytes)?))
    }

    /// Index an already-decoded descriptor set.
    ///
    /// When two files declare the same fully-qualified name, the first wins.
    #[must_use]
    pub fn new(fdset: FileDescriptorSet) -> Self {
        let mut pool = Self::default();

        for file in fdset.file {
            let package = file.package.unwrap_or_default();
            let scope = if package.is_empty() {
                String::new()
            } else {
                format!(".{package}")
            };

            pool.add_enums(&scope, file.enum_type);
            pool.add_messages(&scope, file.message_type);
        }

        pool
    }

    /// Recursively flatten messages (handles nested types and nested enums).
    fn add_messages(&mut self, scope: &str, messages: Vec<DescriptorProto>) {
        for msg in messages {
            let name = msg.name.unwrap_or_default();
            let full_name = format!("{scope}.{name}");
            let map_entry = msg
                .options
                .as_ref()
                .and_then(|o| o.map_entry)
                .unwrap_or(false);

            let fields = msg
                .field
                .into_iter()
                .map(|f| {
                    let name = f.name.unwrap_or_default();
                    let json_name = f
                        .json_name
                        .filter(|j| !j.is_empty())
                        .unwrap_or_else(|| snake_to_lower_camel(&name));
                    FieldData {
                        json_name,
                        name,
                        number: f.number.unwrap_or(0),
                        label: f.label.unwrap_or(label::OPTIONAL),
                        kind: Kind::from_type_id(f.r#type.unwrap_or(0)),
                        type_name: f.type_name,
                    }
                })
                .collect();

            if !self.message_index.contains_key(&full_name) {
                self.message_index
                    .insert(full_name.clone(), self.messages.len());
                self.messages.push(MessageData {
                    full_name: full_name.clone(),
                    name,
                    fields,
                    map_entry,
                });
            }

            self.add_enums(&full_name, msg.enum_type);
            self.add_messages(&full_name, msg.nested_type);
        }
    }

    fn add_enums(&mut self, scope: &str, enums: Vec<EnumDescriptorProto>) {
        for e in enums {
            let name = e.name.unwrap_or_default();
            let full_name = format!("{scope}.{name}");
            if self.enum_index.contains_key(&full_name) {
                continue;
            }

            let values = e
                .value
                .into_iter()
                .map(|v| (v.name.unwrap_or_default(), v.number.unwrap_or(0)))
                .collect();

            self.enum_index.insert(full_name.clone(), self.enums.len());
            self.enums.push(EnumData {
                full_name,
                name,
                values,
            });
        }
    }

    /// Look up a message by leading-dot fully-qualified name.
    #[must_use]
    pub fn get_message_by_name(&self, full_name: &str) -> Option<MessageDescriptor<'_>> {
        self.message_index
            .get(full_name)
            .map(|&index| MessageDescriptor { pool: self, index })
    }

    /// Look up an enum by leading-dot fully-qualified name.
    #[must_use]
    pub fn get_enum_by_name(&self, full_name: &str) -> Option<EnumDescriptor<'_>> {
        self.enum_index
            .get(full_name)
            .map(|&index| EnumDescriptor { pool: self, index })
    }

    /// All messages, in file order with nested types following their parent.
    pub fn messages(&self) -> impl Iterator<Item = MessageDescriptor<'_>> + '_ {
        (0..self.messages.len()).map(move |index| MessageDescriptor { pool: self, index })
    }

    /// All enums, in file order.
    pub fn enums(&self) -> impl Iterator<Item = EnumDescriptor<'_>> + '_ {
        (0..self.enums.len()).map(move |index| EnumDescriptor { pool: self, index })
    }
}

/// Handle to a message type in a [`DescriptorPool`].
#[derive(Clone, Copy)]
pub struct MessageDescriptor<'a> {
    pool: &'a DescriptorPool,
    index: usize,
}

impl<'a> MessageDescriptor<'a> {
    fn data(&self) -> &'a MessageData {
        &self.pool.messages[self.index]
    }

    /// Leading-dot fully-qualified name (e.g., `.shop.v1.Order`).
    #[must_use]
    pub fn full_name(&self) -> &'a str {
        &self.data().full_name
    }

    /// Short name (e.g., `Order`).
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// Whether this is the compiler-synthesized entry type of a `map<K, V>` field.
    #[must_use]
    pub fn is_map_entry(&self) -> bool {
        self.data().map_entry
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = FieldDescriptor<'a>> + 'a {
        let pool = self.pool;
        let message = self.index;
        (0..self.data().fields.len()).map(move |index| FieldDescriptor {
            pool,
            message,
            index,
        })
    }

    /// Find a field by its proto name.
    #[must_use]
    pub fn get_field_by_name(&self, name: &str) -> Option<FieldDescriptor<'a>> {
        self.fields().find(|f| f.name() == name)
    }

    /// Identity of this type within its pool.
    ///
    /// Two handles with equal ids refer to the same message type.
    #[must_use]
    pub fn id(&self) -> usize {
        self.index
    }
}

impl PartialEq for MessageDescriptor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.pool, other.pool) && self.index == other.index
    }
}

impl Eq for MessageDescriptor<'_> {}

impl fmt::Debug for MessageDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageDescriptor")
            .field(&self.full_name())
            .finish()
    }
}

/// Handle to a field of a message in a [`DescriptorPool`].
#[derive(Clone, Copy)]
pub struct FieldDescriptor<'a> {
    pool: &'a DescriptorPool,
    message: usize,
    index: usize,
}

impl<'a> FieldDescriptor<'a> {
    fn data(&self) -> &'a FieldData {
        &self.pool.messages[self.message].fields[self.index]
    }

    /// Field name as declared in the `.proto` file (`snake_case` by convention).
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// JSON name: the compiler-provided `json_name`, else `lowerCamelCase` of [`name`](Self::name).
    #[must_use]
    pub fn json_name(&self) -> &'a str {
        &self.data().json_name
    }

    /// Field number.
    #[must_use]
    pub fn number(&self) -> i32 {
        self.data().number
    }

    /// Field kind.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.data().kind
    }

    /// Raw `type_name` reference for message and enum fields.
    #[must_use]
    pub fn type_name(&self) -> Option<&'a str> {
        self.data().type_name.as_deref()
    }

    /// The message declaring this field.
    #[must_use]
    pub fn containing_message(&self) -> MessageDescriptor<'a> {
        MessageDescriptor {
            pool: self.pool,
            index: self.message,
        }
    }

    fn is_repeated(&self) -> bool {
        self.data().label == label::REPEATED
    }

    /// Whether this is a `map<K, V>` field (a repeated synthetic entry message).
    #[must_use]
    pub fn is_map(&self) -> bool {
        self.is_repeated()
            && self.kind() == Kind::Message
            && self.message().is_some_and(|m| m.is_map_entry())
    }

    /// Whether this is a plain `repeated` field. Never true for map fields.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.is_repeated() && !self.is_map()
    }

    /// Referenced message type, for message-kind fields.
    ///
    /// `None` for other kinds or when the reference does not resolve.
    #[must_use]
    pub fn message(&self) -> Option<MessageDescriptor<'a>> {
        if self.kind() != Kind::Message && self.kind() != Kind::Group {
            return None;
        }
        self.pool.get_message_by_name(self.type_name()?)
    }

    /// Referenced enum type, for enum-kind fields.
    #[must_use]
    pub fn enum_type(&self) -> Option<EnumDescriptor<'a>> {
        if self.kind() != Kind::Enum {
            return None;
        }
        self.pool.get_enum_by_name(self.type_name()?)
    }

    /// The `value` field of the synthetic entry, for map fields.
    ///
    /// Looked up by name, falling back to the entry's second declared field.
    #[must_use]
    pub fn map_value(&self) -> Option<FieldDescriptor<'a>> {
        if !self.is_map() {
            return None;
        }
        let entry = self.message()?;
        entry
            .get_field_by_name("value")
            .or_else(|| entry.fields().nth(1))
    }
}

impl fmt::Debug for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("message", &self.containing_message().full_name())
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

/// Handle to an enum type in a [`DescriptorPool`].
#[derive(Clone, Copy)]
pub struct EnumDescriptor<'a> {
    pool: &'a DescriptorPool,
    index: usize,
}

impl<'a> EnumDescriptor<'a> {
    fn data(&self) -> &'a EnumData {
        &self.pool.enums[self.index]
    }

    /// Leading-dot fully-qualified name.
    #[must_use]
    pub fn full_name(&self) -> &'a str {
        &self.data().full_name
    }

    /// Short name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// Value names in declaration order.
    pub fn value_names(&self) -> impl ExactSizeIterator<Item = &'a str> + 'a {
        self.data().values.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, number)` pairs in declaration order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = (&'a str, i32)> + 'a {
        self.data()
            .values
            .iter()
            .map(|(name, number)| (name.as_str(), *number))
    }
}

impl fmt::Debug for EnumDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumDescriptor")
            .field(&self.full_name())
            .finish()
    }
}

/// Convert `snake_case` to `lowerCamelCase` (the protoc default `json_name`).
#[must_use]
pub fn snake_to_lower_camel(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}
