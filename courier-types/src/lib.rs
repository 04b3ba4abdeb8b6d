//! Shared identity types for Courier.
//!
//! The account record describes this installation: who owns it, which phone
//! number it answers for, and whether it is the primary data owner or a
//! secondary device syncing from a remote account. It is created once during
//! onboarding and read by every subsequent session; after onboarding it is
//! mutated only by explicit account-management operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the remote backend to a secondary device.
///
/// The primary device has no `DeviceId` — it owns the canonical data and
/// other devices sync from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub String);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// This installation's account record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Owner display name, captured from the device profile during import.
    pub name: String,
    /// Normalized phone number (digits plus an optional leading `+`).
    pub phone_number: String,
    /// Remote device id; `None` on the primary device.
    pub device_id: Option<DeviceId>,
    /// Whether this device owns the canonical data.
    pub primary: bool,
}

impl Account {
    /// Marks this device as the primary data owner with no remote device id.
    pub fn mark_primary_owner(&mut self) {
        self.device_id = None;
        self.primary = true;
    }

    /// Stamps the owner identity onto the account, normalizing the phone number.
    pub fn set_identity(&mut self, name: &str, phone_number: &str) {
        self.name = name.to_string();
        self.phone_number = normalize_phone(phone_number);
    }
}

/// Strips formatting from a phone number.
///
/// Keeps ASCII digits and a single leading `+`; everything else (spaces,
/// dashes, parentheses) is dropped.
pub fn normalize_phone(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_digit() || (c == '+' && out.is_empty()) {
            out.push(c);
        }
    }
    out
}
