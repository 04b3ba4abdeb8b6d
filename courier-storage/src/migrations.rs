//! Versioned schema migrations for the message store.
//!
//! The stored version lives in SQLite `user_version`. A fresh store gets the
//! full registry schema and the current version in one go; an older store is
//! brought up to date by applying every step whose threshold exceeds the
//! stored version, in ascending order.
//!
//! Each step runs wrapped: a failure (typically a duplicate column from a
//! partially applied earlier run) is logged and skipped, and the remaining
//! steps still execute. Re-attempting an interrupted upgrade is therefore
//! always safe. The stored version is never lowered — a store written by a
//! newer build opens untouched.

use crate::error::StorageResult;
use crate::schema::{self, TABLES};
use rusqlite::Connection;
use tracing::{info, warn};

/// Current compiled schema version.
pub const SCHEMA_VERSION: i32 = 5;

/// A single version-gated structural change: applied when the stored
/// version is below `version`, upgrading the store *to* that version.
struct MigrationStep {
    version: i32,
    sql: &'static str,
}

const STEPS: &[MigrationStep] = &[
    MigrationStep {
        version: 2,
        sql: "ALTER TABLE conversation ADD COLUMN archive integer not null DEFAULT 0",
    },
    // Repairs stores created before contact existed as its own table; the
    // create fails harmlessly where the table is already present.
    MigrationStep {
        version: 3,
        sql: schema::CREATE_CONTACT,
    },
    MigrationStep {
        version: 4,
        sql: "ALTER TABLE conversation ADD COLUMN private_notifications integer not null DEFAULT 0",
    },
    MigrationStep {
        version: 5,
        sql: "ALTER TABLE conversation ADD COLUMN led_color integer not null DEFAULT 4294967295",
    },
];

/// Brings the connection's schema to [`SCHEMA_VERSION`], creating it from
/// scratch when the store is fresh.
pub(crate) fn prepare(conn: &Connection) -> StorageResult<()> {
    let stored = stored_version(conn)?;
    if stored == 0 {
        create_all(conn)?;
        set_version(conn, SCHEMA_VERSION)?;
        info!("[STORE] created fresh store at version {SCHEMA_VERSION}");
    } else if stored < SCHEMA_VERSION {
        upgrade(conn, stored);
        set_version(conn, SCHEMA_VERSION)?;
        info!("[STORE] upgraded store from v{stored} to v{SCHEMA_VERSION}");
    } else if stored > SCHEMA_VERSION {
        warn!("[STORE] store version {stored} is ahead of this build ({SCHEMA_VERSION}); leaving it untouched");
    }
    Ok(())
}

/// Creates every table and index in the registry.
pub(crate) fn create_all(conn: &Connection) -> StorageResult<()> {
    for table in TABLES {
        conn.execute_batch(table.create)?;
        for index in table.indexes {
            conn.execute_batch(index)?;
        }
    }
    Ok(())
}

/// Applies every step above `from`, tolerating per-step failures.
fn upgrade(conn: &Connection, from: i32) {
    for step in STEPS {
        if from < step.version {
            if let Err(e) = conn.execute_batch(step.sql) {
                warn!("[STORE] migration step to v{} skipped: {e}", step.version);
            }
        }
    }
}

fn stored_version(conn: &Connection) -> StorageResult<i32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

fn set_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.pragma_update(None, "user_version", version)?;
    Ok(())
}
