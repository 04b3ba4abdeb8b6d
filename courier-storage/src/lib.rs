//! Encrypted SQLite storage layer for Courier.
//!
//! The message store holds one physical table per logical entity (contact,
//! conversation, message, draft, scheduled message, blacklist) plus a single
//! schema version persisted as SQLite `user_version`.
//!
//! # Architecture
//!
//! - The schema registry declares each table's creation statement and
//!   indexes once; fresh creation and incremental upgrade converge to the
//!   same structure for any given version.
//! - Migrations run automatically on open. Individual steps tolerate partial
//!   prior application — a step that fails is logged and skipped so a
//!   crashed upgrade can safely be re-attempted.
//! - Sensitive record fields are sealed through a
//!   [`courier_crypto::RecordCipher`] before they reach disk; the store
//!   itself only moves opaque strings.

mod error;
mod migrations;
mod models;
mod schema;
mod store;

pub use error::{StorageError, StorageResult};
pub use migrations::SCHEMA_VERSION;
pub use models::{Blacklist, Contact, Conversation, Draft, Message, ScheduledMessage};
pub use schema::{TableSchema, LED_COLOR_WHITE, TABLES};
pub use store::MessageStore;
