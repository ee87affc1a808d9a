//! Minimal protobuf descriptor types.
//!
//! Only the subset of `google/protobuf/descriptor.proto` needed to derive
//! JSON schemas is modeled. Everything else (services, source info, custom
//! options) is skipped by prost as unknown fields during decoding.

#[allow(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
mod types {
    use prost::Message;

    #[derive(Clone, PartialEq, Message)]
    pub struct FileDescriptorSet {
        #[prost(message, repeated, tag = "1")]
        pub file: Vec<FileDescriptorProto>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct FileDescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(string, optional, tag = "2")]
        pub package: Option<String>,
        #[prost(message, repeated, tag = "4")]
        pub message_type: Vec<DescriptorProto>,
        #[prost(message, repeated, tag = "5")]
        pub enum_type: Vec<EnumDescriptorProto>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct DescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(message, repeated, tag = "2")]
        pub field: Vec<FieldDescriptorProto>,
        #[prost(message, repeated, tag = "3")]
        pub nested_type: Vec<DescriptorProto>,
        #[prost(message, repeated, tag = "4")]
        pub enum_type: Vec<EnumDescriptorProto>,
        #[prost(message, optional, tag = "7")]
        pub options: Option<MessageOptions>,
    }

    /// Message-level options. Only `map_entry` matters here.
    #[derive(Clone, PartialEq, Message)]
    pub struct MessageOptions {
        /// Set by the compiler on the synthetic `XxxEntry` message of a `map<K, V>` field.
        #[prost(bool, optional, tag = "7")]
        pub map_entry: Option<bool>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct FieldDescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(int32, optional, tag = "3")]
        pub number: Option<i32>,
        /// 1=optional, 2=required, 3=repeated.
        #[prost(int32, optional, tag = "4")]
        pub label: Option<i32>,
        /// Protobuf field type enum: 1=double, 5=int32, 9=string, 11=message, 14=enum, …
        #[prost(int32, optional, tag = "5")]
        pub r#type: Option<i32>,
        /// Fully-qualified type name for message/enum fields (e.g., `.shop.v1.Order`).
        #[prost(string, optional, tag = "6")]
        pub type_name: Option<String>,
        /// JSON name computed by the compiler (lowerCamelCase unless overridden).
        #[prost(string, optional, tag = "10")]
        pub json_name: Option<String>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct EnumDescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(message, repeated, tag = "2")]
        pub value: Vec<EnumValueDescriptorProto>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct EnumValueDescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(int32, optional, tag = "2")]
        pub number: Option<i32>,
    }
}

pub use types::*;

/// Proto field type constants (from `google.protobuf.FieldDescriptorProto.Type`).
pub mod field_type {
    /// `TYPE_DOUBLE = 1`
    pub const DOUBLE: i32 = 1;
    /// `TYPE_FLOAT = 2`
    pub const FLOAT: i32 = 2;
    /// `TYPE_INT64 = 3`
    pub const INT64: i32 = 3;
    /// `TYPE_UINT64 = 4`
    pub const UINT64: i32 = 4;
    /// `TYPE_INT32 = 5`
    pub const INT32: i32 = 5;
    /// `TYPE_FIXED64 = 6`
    pub const FIXED64: i32 = 6;
    /// `TYPE_FIXED32 = 7`
    pub const FIXED32: i32 = 7;
    /// `TYPE_BOOL = 8`
    pub const BOOL: i32 = 8;
    /// `TYPE_STRING = 9`
    pub const STRING: i32 = 9;
    /// `TYPE_GROUP = 10` (proto2 only, deprecated)
    pub const GROUP: i32 = 10;
    /// `TYPE_MESSAGE = 11`
    pub const MESSAGE: i32 = 11;
    /// `TYPE_BYTES = 12`
    pub const BYTES: i32 = 12;
    /// `TYPE_UINT32 = 13`
    pub const UINT32: i32 = 13;
    /// `TYPE_ENUM = 14`
    pub const ENUM: i32 = 14;
    /// `TYPE_SFIXED32 = 15`
    pub const SFIXED32: i32 = 15;
    /// `TYPE_SFIXED64 = 16`
    pub const SFIXED64: i32 = 16;
    /// `TYPE_SINT32 = 17`
    pub const SINT32: i32 = 17;
    /// `TYPE_SINT64 = 18`
    pub const SINT64: i32 = 18;
}

/// Proto field label constants (from `google.protobuf.FieldDescriptorProto.Label`).
pub mod label {
    /// `LABEL_OPTIONAL = 1`
    pub const OPTIONAL: i32 = 1;
    /// `LABEL_REQUIRED = 2`
    pub const REQUIRED: i32 = 2;
    /// `LABEL_REPEATED = 3`
    pub const REPEATED: i32 = 3;
}
