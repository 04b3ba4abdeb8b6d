//! The onboarding context — explicit installation state.
//!
//! Replaces the process-wide account/settings singletons a client shell
//! would otherwise reach for: the flow and the import pipeline receive this
//! object and mutate its clearly owned fields instead of ambient globals.

use courier_crypto::RecordCipher;
use courier_types::Account;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mutable installation state owned by one onboarding run.
pub struct OnboardingContext {
    /// This installation's account record. Stamped with the owner identity
    /// when local import starts; marked primary when setup is cancelled.
    pub account: Mutex<Account>,
    /// Where the message store lives on disk.
    pub store_path: PathBuf,
    /// Cipher the store seals conversation fields through.
    pub cipher: Arc<dyn RecordCipher>,
}

impl OnboardingContext {
    pub fn new(store_path: PathBuf, cipher: Arc<dyn RecordCipher>) -> Self {
        Self {
            account: Mutex::new(Account::default()),
            store_path,
            cipher,
        }
    }
}
