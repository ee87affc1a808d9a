//! Non-fatal generation diagnostics.
//!
//! Generation is best-effort: an unsupported field kind or a dangling type
//! reference yields [`Schema::Absent`](crate::Schema::Absent) for that field
//! plus one [`Diagnostic`] delivered to a [`DiagnosticSink`].

use std::fmt;

/// A warning raised while mapping one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Fully-qualified name of the message declaring the field.
    pub message_type: String,
    /// Proto field name.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.message_type, self.field, self.message)
    }
}

/// Receiver for generation warnings.
pub trait DiagnosticSink {
    /// Record one warning. Must not abort generation.
    fn warn(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at `WARN` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            message_type = %diagnostic.message_type,
            field = %diagnostic.field,
            "{}",
            diagnostic.message
        );
    }
}

/// Collects diagnostics for later inspection.
impl DiagnosticSink for Vec<Diagnostic> {
    fn warn(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
