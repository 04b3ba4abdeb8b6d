//! Record ciphers — the sealing boundary entities encrypt through.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use rand::RngCore;

/// Size of the per-record nonce prepended to every ciphertext.
pub const NONCE_SIZE: usize = 12;

/// Seals and opens sensitive record fields.
///
/// Implementations must be cheap to clone behind an `Arc` and safe to call
/// from the import worker thread.
pub trait RecordCipher: Send + Sync {
    /// Encrypts a field value into a base64 string suitable for a TEXT column.
    fn seal(&self, plaintext: &str) -> CryptoResult<String>;

    /// Decrypts a field value previously produced by [`RecordCipher::seal`].
    fn open(&self, sealed: &str) -> CryptoResult<String>;

    /// Whether real encryption is active. When `false`, callers store
    /// plaintext (pre-unlock state) rather than failing.
    fn is_available(&self) -> bool;
}

/// No-op cipher used before the account key exists and in tests.
/// Fields pass through unchanged and the store keeps plaintext.
pub struct PassthroughCipher;

impl RecordCipher for PassthroughCipher {
    fn seal(&self, plaintext: &str) -> CryptoResult<String> {
        Ok(plaintext.to_string())
    }

    fn open(&self, sealed: &str) -> CryptoResult<String> {
        Ok(sealed.to_string())
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// ChaCha20-Poly1305 record cipher keyed by the account key.
pub struct AccountCipher {
    cipher: ChaCha20Poly1305,
}

impl AccountCipher {
    pub fn new(key: &DerivedKey) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(key.as_bytes())),
        }
    }
}

impl RecordCipher for AccountCipher {
    fn seal(&self, plaintext: &str) -> CryptoResult<String> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| CryptoError::Cipher(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(sealed))
    }

    fn open(&self, sealed: &str) -> CryptoResult<String> {
        let raw = BASE64
            .decode(sealed)
            .map_err(|e| CryptoError::Encoding(e.to_string()))?;
        if raw.len() <= NONCE_SIZE {
            return Err(CryptoError::Encoding("ciphertext too short".into()));
        }
        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_SIZE);

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| CryptoError::Cipher(e.to_string()))?;

        String::from_utf8(plaintext).map_err(|e| CryptoError::Encoding(e.to_string()))
    }

    fn is_available(&self) -> bool {
        true
    }
}
