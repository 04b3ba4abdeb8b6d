//! Record models — one struct per logical table.
//!
//! Each record knows how to hydrate itself from a raw row and how to seal or
//! open its sensitive fields against a [`RecordCipher`]. Non-sensitive
//! columns (timestamps, flags, colors) stay plaintext so queries keep
//! working without decryption.

use crate::schema::LED_COLOR_WHITE;
use courier_crypto::{CryptoResult, RecordCipher};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    /// Comma-separated participant numbers, as reported by the provider.
    pub phone_numbers: String,
    pub title: String,
    pub snippet: String,
    pub color: i64,
    pub image_uri: Option<String>,
    pub ringtone: Option<String>,
    pub timestamp: i64,
    pub read: bool,
    pub mute: bool,
    pub pinned: bool,
    pub archive: bool,
    pub private_notifications: bool,
    pub led_color: i64,
}

impl Conversation {
    /// A minimal conversation with flag and color defaults.
    pub fn new(id: i64, phone_numbers: &str, title: &str) -> Self {
        Self {
            id,
            phone_numbers: phone_numbers.to_string(),
            title: title.to_string(),
            snippet: String::new(),
            color: 0,
            image_uri: None,
            ringtone: None,
            timestamp: 0,
            read: false,
            mute: false,
            pinned: false,
            archive: false,
            private_notifications: false,
            led_color: LED_COLOR_WHITE,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            phone_numbers: row.get("phone_numbers")?,
            title: row.get("title")?,
            snippet: row.get("snippet")?,
            color: row.get("color")?,
            image_uri: row.get("image_uri")?,
            ringtone: row.get("ringtone")?,
            timestamp: row.get("timestamp")?,
            read: row.get("read")?,
            mute: row.get("mute")?,
            pinned: row.get("pinned")?,
            archive: row.get("archive")?,
            private_notifications: row.get("private_notifications")?,
            led_color: row.get("led_color")?,
        })
    }

    pub fn seal(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.phone_numbers = cipher.seal(&self.phone_numbers)?;
        self.title = cipher.seal(&self.title)?;
        self.snippet = cipher.seal(&self.snippet)?;
        Ok(())
    }

    pub fn open(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.phone_numbers = cipher.open(&self.phone_numbers)?;
        self.title = cipher.open(&self.title)?;
        self.snippet = cipher.open(&self.snippet)?;
        Ok(())
    }
}

/// A device contact, cross-referenced against imported conversations for
/// display names and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub phone_number: String,
    pub name: String,
    pub color: i64,
}

impl Contact {
    pub fn new(id: i64, phone_number: &str, name: &str) -> Self {
        Self {
            id,
            phone_number: phone_number.to_string(),
            name: name.to_string(),
            color: 0,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            phone_number: row.get("phone_number")?,
            name: row.get("name")?,
            color: row.get("color")?,
        })
    }

    pub fn seal(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.phone_number = cipher.seal(&self.phone_number)?;
        self.name = cipher.seal(&self.name)?;
        Ok(())
    }

    pub fn open(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.phone_number = cipher.open(&self.phone_number)?;
        self.name = cipher.open(&self.name)?;
        Ok(())
    }
}

/// A single message within a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    /// 0 = received, 1 = sent; further kinds are provider-defined.
    pub kind: i64,
    pub body: String,
    pub mime_type: String,
    pub timestamp: i64,
    pub read: bool,
    pub seen: bool,
    pub sender: Option<String>,
}

impl Message {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            conversation_id: row.get("conversation_id")?,
            kind: row.get("kind")?,
            body: row.get("body")?,
            mime_type: row.get("mime_type")?,
            timestamp: row.get("timestamp")?,
            read: row.get("read")?,
            seen: row.get("seen")?,
            sender: row.get("sender")?,
        })
    }

    pub fn seal(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.body = cipher.seal(&self.body)?;
        Ok(())
    }

    pub fn open(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.body = cipher.open(&self.body)?;
        Ok(())
    }
}

/// An unsent draft attached to a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: i64,
    pub conversation_id: i64,
    pub body: String,
    pub mime_type: String,
}

impl Draft {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            conversation_id: row.get("conversation_id")?,
            body: row.get("body")?,
            mime_type: row.get("mime_type")?,
        })
    }

    pub fn seal(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.body = cipher.seal(&self.body)?;
        Ok(())
    }

    pub fn open(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.body = cipher.open(&self.body)?;
        Ok(())
    }
}

/// A message scheduled for future delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMessage {
    pub id: i64,
    pub title: String,
    pub recipient: String,
    pub body: String,
    pub mime_type: String,
    pub timestamp: i64,
}

impl ScheduledMessage {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            recipient: row.get("recipient")?,
            body: row.get("body")?,
            mime_type: row.get("mime_type")?,
            timestamp: row.get("timestamp")?,
        })
    }

    pub fn seal(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.title = cipher.seal(&self.title)?;
        self.recipient = cipher.seal(&self.recipient)?;
        self.body = cipher.seal(&self.body)?;
        Ok(())
    }

    pub fn open(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.title = cipher.open(&self.title)?;
        self.recipient = cipher.open(&self.recipient)?;
        self.body = cipher.open(&self.body)?;
        Ok(())
    }
}

/// A blocked phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blacklist {
    pub id: i64,
    pub phone_number: String,
}

impl Blacklist {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            phone_number: row.get("phone_number")?,
        })
    }

    pub fn seal(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.phone_number = cipher.seal(&self.phone_number)?;
        Ok(())
    }

    pub fn open(&mut self, cipher: &dyn RecordCipher) -> CryptoResult<()> {
        self.phone_number = cipher.open(&self.phone_number)?;
        Ok(())
    }
}
