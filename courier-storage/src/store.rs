//! The message store handle.

use crate::error::{StorageError, StorageResult};
use crate::migrations;
use crate::models::{Contact, Conversation};
use crate::schema::TABLES;
use courier_crypto::{PassthroughCipher, RecordCipher};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Handle to the encrypted local message store.
///
/// Opening runs the create-or-migrate path. During an import run the handle
/// is opened once, written on a single worker thread, and dropped when the
/// run finishes; it is not shared across threads concurrently.
#[derive(Clone)]
pub struct MessageStore {
    conn: Arc<Mutex<Connection>>,
    cipher: Arc<dyn RecordCipher>,
}

impl MessageStore {
    /// Opens or creates the store at `path`, migrating an older store to the
    /// current schema version. Inability to open the file at all is fatal
    /// and surfaces here.
    pub fn open(path: &Path, cipher: Arc<dyn RecordCipher>) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        migrations::prepare(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            cipher,
        })
    }

    /// Opens an in-memory store with no encryption (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::prepare(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            cipher: Arc::new(PassthroughCipher),
        })
    }

    /// The stored schema version (`PRAGMA user_version`).
    pub fn version(&self) -> StorageResult<i32> {
        let conn = self.conn.lock().unwrap();
        Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }

    /// Bulk-writes conversations in a single transaction, sealing sensitive
    /// fields through the store's cipher when it is available.
    ///
    /// `on_progress` is invoked once per record with `(current, total)`,
    /// `current` being the 1-based count written so far.
    pub fn insert_conversations<F>(
        &self,
        conversations: &[Conversation],
        mut on_progress: F,
    ) -> StorageResult<usize>
    where
        F: FnMut(usize, usize),
    {
        let total = conversations.len();
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO conversation (id, phone_numbers, title, snippet, color, image_uri, \
                 ringtone, timestamp, read, mute, pinned, archive, private_notifications, led_color) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for (index, conversation) in conversations.iter().enumerate() {
                let mut record = conversation.clone();
                if self.cipher.is_available() {
                    record
                        .seal(self.cipher.as_ref())
                        .map_err(|e| StorageError::Encryption(e.to_string()))?;
                }
                stmt.execute(params![
                    record.id,
                    record.phone_numbers,
                    record.title,
                    record.snippet,
                    record.color,
                    record.image_uri,
                    record.ringtone,
                    record.timestamp,
                    record.read,
                    record.mute,
                    record.pinned,
                    record.archive,
                    record.private_notifications,
                    record.led_color,
                ])?;
                on_progress(index + 1, total);
            }
        }
        tx.commit()?;
        debug!("[STORE] wrote {total} conversations");
        Ok(total)
    }

    /// Bulk-writes contacts in a single transaction.
    ///
    /// The cipher is an explicit parameter rather than the store's own:
    /// the initial import passes `None` because contact encryption happens
    /// at a later stage of the account lifecycle.
    pub fn insert_contacts(
        &self,
        contacts: &[Contact],
        cipher: Option<&dyn RecordCipher>,
    ) -> StorageResult<usize> {
        let total = contacts.len();
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO contact (id, phone_number, name, color) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for contact in contacts {
                let mut record = contact.clone();
                if let Some(cipher) = cipher.filter(|c| c.is_available()) {
                    record
                        .seal(cipher)
                        .map_err(|e| StorageError::Encryption(e.to_string()))?;
                }
                stmt.execute(params![
                    record.id,
                    record.phone_number,
                    record.name,
                    record.color,
                ])?;
            }
        }
        tx.commit()?;
        debug!("[STORE] wrote {total} contacts");
        Ok(total)
    }

    /// Lists all conversations, newest first, opened through the store's cipher.
    pub fn conversations(&self) -> StorageResult<Vec<Conversation>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, phone_numbers, title, snippet, color, image_uri, ringtone, timestamp, \
             read, mute, pinned, archive, private_notifications, led_color \
             FROM conversation ORDER BY timestamp DESC",
        )?;
        let mut records: Vec<Conversation> = stmt
            .query_map([], |row| Conversation::from_row(row))?
            .collect::<Result<_, _>>()?;
        drop(stmt);
        drop(conn);

        if self.cipher.is_available() {
            for record in &mut records {
                record
                    .open(self.cipher.as_ref())
                    .map_err(|e| StorageError::Encryption(e.to_string()))?;
            }
        }
        Ok(records)
    }

    /// Lists all contacts, opened through `cipher` when one is given.
    pub fn contacts(&self, cipher: Option<&dyn RecordCipher>) -> StorageResult<Vec<Contact>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, phone_number, name, color FROM contact ORDER BY name")?;
        let mut records: Vec<Contact> = stmt
            .query_map([], |row| Contact::from_row(row))?
            .collect::<Result<_, _>>()?;
        drop(stmt);
        drop(conn);

        if let Some(cipher) = cipher.filter(|c| c.is_available()) {
            for record in &mut records {
                record
                    .open(cipher)
                    .map_err(|e| StorageError::Encryption(e.to_string()))?;
            }
        }
        Ok(records)
    }

    pub fn count_conversations(&self) -> StorageResult<usize> {
        self.count("conversation")
    }

    pub fn count_contacts(&self) -> StorageResult<usize> {
        self.count("contact")
    }

    fn count(&self, table: &str) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Drops every table in the registry. Used only for destructive reset
    /// flows (account deletion), never invoked automatically.
    pub fn drop_all(&self) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        for table in TABLES {
            conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", table.name))?;
        }
        info!("[STORE] dropped all tables");
        Ok(())
    }
}
