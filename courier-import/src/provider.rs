//! Device provider contract — the telephony/contacts source the pipeline
//! reads from. Implemented by the platform shell, queried at most once per
//! import run each.

use courier_storage::{Contact, Conversation};
use thiserror::Error;

/// Result type for provider reads.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by the device provider. Provider failures are not caught
/// inside the pipeline — they propagate and are fatal to the import run.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("conversation query failed: {0}")]
    Conversations(String),

    #[error("contact query failed: {0}")]
    Contacts(String),
}

/// Read-only source of the device's existing data.
pub trait DeviceProvider: Send + Sync {
    /// Returns the device's full conversation list. The size is known up
    /// front; ordering is the provider's (typically newest first).
    fn load_conversations(&self) -> ProviderResult<Vec<Conversation>>;

    /// Returns the device's contact list, cross-referenced against the
    /// already-imported conversations to resolve display names and colors.
    fn load_contacts(&self, conversations: &[Conversation]) -> ProviderResult<Vec<Contact>>;
}
