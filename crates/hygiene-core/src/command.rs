//! Command abstractions.

use tracing::Span;
use uuid::Uuid;

/// Trait that all user-initiated commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through to the events it produces.
    fn correlation_id(&self) -> Uuid;

    /// Opens a tracing span carrying the command type and correlation ID.
    fn span(&self) -> Span {
        tracing::info_span!(
            "command",
            command_type = self.command_type(),
            correlation_id = %self.correlation_id(),
        )
    }
}
