//! Key material — Argon2id derivation and zeroized storage.

use crate::error::{CryptoError, CryptoResult};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the account key in bytes (ChaCha20-Poly1305).
pub const KEY_SIZE: usize = 32;

/// Size of the derivation salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Random salt persisted alongside the account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Generates a fresh random salt.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Account key material. Zeroized when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Derives the account key from a passphrase and salt with Argon2id.
pub fn derive_key(passphrase: &str, salt: &Salt) -> CryptoResult<DerivedKey> {
    let mut key = [0u8; KEY_SIZE];
    argon2::Argon2::default()
        .hash_password_into(passphrase.as_bytes(), salt.as_bytes(), &mut key)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(DerivedKey(key))
}

/// Generates a random account key directly, without a passphrase.
/// Used when the key is wrapped and stored by a platform keystore instead.
pub fn generate_random_key() -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    rand::rng().fill_bytes(&mut key);
    DerivedKey(key)
}
