//! Typed error enum for the `proto-openapi` library API.
//!
//! Library consumers can match on specific variants. The CLI (`main.rs`)
//! converts these to `anyhow::Error` at the binary boundary for richer
//! context messages.
//!
//! Unsupported field kinds and dangling type references are *not* errors:
//! they are reported through a [`DiagnosticSink`](crate::DiagnosticSink)
//! and generation continues.

/// Errors produced by `proto-openapi` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File I/O failure (reading config or descriptor files).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Proto `FileDescriptorSet` decoding failure.
    #[error("failed to decode proto descriptor: {0}")]
    ProtoDecode(#[from] prost::DecodeError),

    /// A requested message type is not present in the descriptor set.
    #[error("message '{name}' not found in proto descriptors")]
    MessageNotFound {
        /// The unresolved fully-qualified name.
        name: String,
    },

    /// A message type contains itself through a chain of message fields.
    ///
    /// Raised under [`CyclePolicy::Error`](crate::CyclePolicy::Error). Switch
    /// to [`CyclePolicy::Reference`](crate::CyclePolicy::Reference) to emit a
    /// `$ref` at the point the cycle closes instead.
    #[error("cyclic schema: {}", path.join(" -> "))]
    CyclicSchema {
        /// Fully-qualified type names from the first repeated type back to itself.
        path: Vec<String>,
    },
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time assertion that `Error` is `Send + Sync`.
    /// Required for use across thread boundaries.
    const _: () = {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    };

    #[test]
    fn cyclic_schema_message_lists_chain() {
        let err = Error::CyclicSchema {
            path: vec![
                ".tree.v1.Node".to_string(),
                ".tree.v1.Branch".to_string(),
                ".tree.v1.Node".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "cyclic schema: .tree.v1.Node -> .tree.v1.Branch -> .tree.v1.Node"
        );
    }
}
