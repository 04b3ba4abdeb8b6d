//! The import pipeline itself.

use crate::provider::{DeviceProvider, ProviderError};
use courier_crypto::RecordCipher;
use courier_storage::{MessageStore, StorageError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

/// Result type for import runs.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that end an import run. There is no partial-import recovery: a
/// provider or storage failure leaves the store as-is and the run fails.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("provider read failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("store write failed: {0}")]
    Storage(#[from] StorageError),
}

/// Progress reported while the pipeline runs.
///
/// The stream starts indeterminate (conversation count not yet known), turns
/// determinate while conversations are written, and goes indeterminate again
/// for the contact phase. `current` is 1-based and never decreases within a
/// run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportProgress {
    Indeterminate,
    Conversations { current: usize, total: usize },
}

/// What an import run wrote.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub conversations: usize,
    pub contacts: usize,
    pub elapsed: Duration,
}

/// One-shot bulk import of device conversations and contacts.
pub struct ImportPipeline {
    store_path: PathBuf,
    cipher: Arc<dyn RecordCipher>,
}

impl ImportPipeline {
    pub fn new(store_path: PathBuf, cipher: Arc<dyn RecordCipher>) -> Self {
        Self { store_path, cipher }
    }

    /// Runs the full import: open store, write conversations (with per-record
    /// progress), write contacts, close. Blocking — call from a dedicated
    /// worker thread, never from the runtime driving the UI.
    ///
    /// Progress sends ignore a closed receiver; the importing side must not
    /// fail just because nobody is watching anymore.
    pub fn run(
        &self,
        provider: &dyn DeviceProvider,
        progress: &UnboundedSender<ImportProgress>,
    ) -> ImportResult<ImportSummary> {
        let started = Instant::now();
        let _ = progress.send(ImportProgress::Indeterminate);

        let store = MessageStore::open(&self.store_path, self.cipher.clone())?;

        let conversations = provider.load_conversations()?;
        info!("[IMPORT] importing {} conversations", conversations.len());
        store.insert_conversations(&conversations, |current, total| {
            let _ = progress.send(ImportProgress::Conversations { current, total });
        })?;

        // Back to the spinner while contacts resolve.
        let _ = progress.send(ImportProgress::Indeterminate);

        let contacts = provider.load_contacts(&conversations)?;
        info!("[IMPORT] importing {} contacts", contacts.len());
        // No encryption context for contacts here: contact encryption is
        // handled at a later stage of the account lifecycle.
        store.insert_contacts(&contacts, None)?;

        drop(store);

        let summary = ImportSummary {
            conversations: conversations.len(),
            contacts: contacts.len(),
            elapsed: started.elapsed(),
        };
        info!("[IMPORT] initial load took {} ms", summary.elapsed.as_millis());
        Ok(summary)
    }
}
