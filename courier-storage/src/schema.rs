//! Schema registry — the six logical tables of the message store.
//!
//! Each table declares its creation statement and index statements exactly
//! once. The fresh-create path (`migrations::create_all`) and the upgrade
//! path (`migrations::STEPS`) must converge to the same structure for any
//! given version, so columns added by a migration also appear here with the
//! same type and default.

/// Default notification LED color for a conversation (opaque white, ARGB).
/// Must match the SQL default on `conversation.led_color`.
pub const LED_COLOR_WHITE: i64 = 0xFFFF_FFFF;

/// One logical table: a stable name, a creation statement, and its indexes.
pub struct TableSchema {
    pub name: &'static str,
    pub create: &'static str,
    pub indexes: &'static [&'static str],
}

pub(crate) const CREATE_CONTACT: &str = "\
CREATE TABLE contact (
    id integer primary key,
    phone_number text not null,
    name text not null,
    color integer not null
)";

pub(crate) const CREATE_CONVERSATION: &str = "\
CREATE TABLE conversation (
    id integer primary key,
    phone_numbers text not null,
    title text not null,
    snippet text not null,
    color integer not null,
    image_uri text,
    ringtone text,
    timestamp integer not null,
    read integer not null DEFAULT 0,
    mute integer not null DEFAULT 0,
    pinned integer not null DEFAULT 0,
    archive integer not null DEFAULT 0,
    private_notifications integer not null DEFAULT 0,
    led_color integer not null DEFAULT 4294967295
)";

pub(crate) const CREATE_MESSAGE: &str = "\
CREATE TABLE message (
    id integer primary key,
    conversation_id integer not null,
    kind integer not null,
    body text not null,
    mime_type text not null,
    timestamp integer not null,
    read integer not null DEFAULT 0,
    seen integer not null DEFAULT 0,
    sender text
)";

pub(crate) const CREATE_DRAFT: &str = "\
CREATE TABLE draft (
    id integer primary key,
    conversation_id integer not null,
    body text not null,
    mime_type text not null
)";

pub(crate) const CREATE_SCHEDULED_MESSAGE: &str = "\
CREATE TABLE scheduled_message (
    id integer primary key,
    title text not null,
    recipient text not null,
    body text not null,
    mime_type text not null,
    timestamp integer not null
)";

pub(crate) const CREATE_BLACKLIST: &str = "\
CREATE TABLE blacklist (
    id integer primary key,
    phone_number text not null
)";

// No separate indexes: the v3 migration re-issues only the creation
// statement, and upgraded stores must match fresh ones exactly.
pub const CONTACT: TableSchema = TableSchema {
    name: "contact",
    create: CREATE_CONTACT,
    indexes: &[],
};

pub const CONVERSATION: TableSchema = TableSchema {
    name: "conversation",
    create: CREATE_CONVERSATION,
    indexes: &["CREATE INDEX idx_conversation_timestamp ON conversation (timestamp)"],
};

pub const MESSAGE: TableSchema = TableSchema {
    name: "message",
    create: CREATE_MESSAGE,
    indexes: &[
        "CREATE INDEX idx_message_conversation_id ON message (conversation_id)",
        "CREATE INDEX idx_message_timestamp ON message (timestamp)",
    ],
};

pub const DRAFT: TableSchema = TableSchema {
    name: "draft",
    create: CREATE_DRAFT,
    indexes: &["CREATE INDEX idx_draft_conversation_id ON draft (conversation_id)"],
};

pub const SCHEDULED_MESSAGE: TableSchema = TableSchema {
    name: "scheduled_message",
    create: CREATE_SCHEDULED_MESSAGE,
    indexes: &[],
};

pub const BLACKLIST: TableSchema = TableSchema {
    name: "blacklist",
    create: CREATE_BLACKLIST,
    indexes: &[],
};

/// Every table the store must contain, in creation order.
pub const TABLES: &[&TableSchema] = &[
    &CONTACT,
    &CONVERSATION,
    &MESSAGE,
    &DRAFT,
    &SCHEDULED_MESSAGE,
    &BLACKLIST,
];
