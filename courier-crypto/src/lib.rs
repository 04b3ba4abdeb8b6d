//! Record encryption layer for Courier.
//!
//! Sensitive record fields (conversation titles, message bodies, contact
//! names) are sealed before they reach the store and opened after they are
//! read back. The store itself never interprets ciphertext — it moves opaque
//! strings.
//!
//! # Architecture
//!
//! - **Account key**: derived from the user's passphrase with Argon2id. The
//!   key is never persisted; it is re-derived on unlock and zeroized on drop.
//! - **Record sealing**: ChaCha20-Poly1305 with a random per-record nonce,
//!   nonce prepended to the ciphertext, the whole thing base64-encoded so it
//!   fits in a TEXT column.
//! - **Passthrough**: before the account key is available (first run, locked
//!   state) a [`PassthroughCipher`] stands in and stores plaintext; callers
//!   check [`RecordCipher::is_available`] to tell the two states apart.

mod cipher;
mod error;
mod key;

pub use cipher::{AccountCipher, PassthroughCipher, RecordCipher, NONCE_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, generate_random_key, DerivedKey, Salt, KEY_SIZE, SALT_SIZE};
