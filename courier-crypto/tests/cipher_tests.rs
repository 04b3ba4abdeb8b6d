use courier_crypto::{
    derive_key, generate_random_key, AccountCipher, PassthroughCipher, RecordCipher, Salt,
    SALT_SIZE,
};
use proptest::prelude::*;

fn test_cipher() -> AccountCipher {
    AccountCipher::new(&generate_random_key())
}

// ── AccountCipher ───────────────────────────────────────────────

#[test]
fn seal_and_open_roundtrip() {
    let cipher = test_cipher();
    let sealed = cipher.seal("Lunch on Friday?").unwrap();
    assert_ne!(sealed, "Lunch on Friday?");
    assert_eq!(cipher.open(&sealed).unwrap(), "Lunch on Friday?");
}

#[test]
fn empty_field_roundtrip() {
    let cipher = test_cipher();
    let sealed = cipher.seal("").unwrap();
    assert_eq!(cipher.open(&sealed).unwrap(), "");
}

#[test]
fn sealing_twice_yields_distinct_ciphertexts() {
    // Random per-record nonce — identical plaintexts must not be linkable.
    let cipher = test_cipher();
    let a = cipher.seal("same text").unwrap();
    let b = cipher.seal("same text").unwrap();
    assert_ne!(a, b);
    assert_eq!(cipher.open(&a).unwrap(), cipher.open(&b).unwrap());
}

#[test]
fn wrong_key_fails_to_open() {
    let sealed = test_cipher().seal("secret").unwrap();
    let other = test_cipher();
    assert!(other.open(&sealed).is_err());
}

#[test]
fn tampered_ciphertext_fails_to_open() {
    let cipher = test_cipher();
    let sealed = cipher.seal("secret").unwrap();
    let mut bytes = sealed.into_bytes();
    let last = bytes.len() - 1;
    bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();
    assert!(cipher.open(&tampered).is_err());
}

#[test]
fn garbage_input_is_an_encoding_error() {
    let cipher = test_cipher();
    assert!(cipher.open("not base64 at all!!!").is_err());
    assert!(cipher.open("QQ==").is_err()); // valid base64, far too short
}

#[test]
fn account_cipher_is_available() {
    assert!(test_cipher().is_available());
}

// ── PassthroughCipher ───────────────────────────────────────────

#[test]
fn passthrough_is_identity_and_unavailable() {
    let cipher = PassthroughCipher;
    assert!(!cipher.is_available());
    assert_eq!(cipher.seal("plain").unwrap(), "plain");
    assert_eq!(cipher.open("plain").unwrap(), "plain");
}

// ── Key derivation ──────────────────────────────────────────────

#[test]
fn derive_key_is_deterministic_per_salt() {
    let salt = Salt::from_bytes([7u8; SALT_SIZE]);
    let a = derive_key("hunter2", &salt).unwrap();
    let b = derive_key("hunter2", &salt).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn different_salts_derive_different_keys() {
    let a = derive_key("hunter2", &Salt::from_bytes([1u8; SALT_SIZE])).unwrap();
    let b = derive_key("hunter2", &Salt::from_bytes([2u8; SALT_SIZE])).unwrap();
    assert_ne!(a.as_bytes(), b.as_bytes());
}

#[test]
fn derived_key_drives_a_working_cipher() {
    let salt = Salt::generate();
    let sealer = AccountCipher::new(&derive_key("correct horse", &salt).unwrap());
    let opener = AccountCipher::new(&derive_key("correct horse", &salt).unwrap());
    let sealed = sealer.seal("battery staple").unwrap();
    assert_eq!(opener.open(&sealed).unwrap(), "battery staple");
}

// ── Property coverage ───────────────────────────────────────────

proptest! {
    #[test]
    fn any_field_value_roundtrips(text in ".{0,200}") {
        let cipher = test_cipher();
        let sealed = cipher.seal(&text).unwrap();
        prop_assert_ne!(&sealed, &text);
        prop_assert_eq!(cipher.open(&sealed).unwrap(), text);
    }
}
