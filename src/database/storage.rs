//! Durable local storage behind a small key/value trait.

use super::db;
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub const FAVORITES_KEY: &str = "favorites";
pub const REVIEWED_KEY: &str = "reviewed";
pub const CARDS_BACKUP_KEY: &str = "cards_backup";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("stored data could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub trait KeyValueStore: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: db::init_database(path)?,
        })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(db::get_item(key, &self.conn)?)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        Ok(db::set_item(key, value, &self.conn)?)
    }
}

/// Non-persistent store. Used with `--in-memory`, when the database cannot be
/// opened, and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Test double that fails every call, as a full or disabled disk would.
#[cfg(test)]
pub(crate) struct UnavailableStore;

#[cfg(test)]
impl KeyValueStore for UnavailableStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Err(StorageError::Unavailable(rusqlite::Error::InvalidQuery))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(StorageError::Unavailable(rusqlite::Error::InvalidQuery))
    }
}
