//! Loading persisted favorites and ratings at startup.
//!
//! Best-effort: each key is read and parsed independently, and anything that
//! cannot be read or parsed comes back empty. Nothing here returns an error.

use crate::database::storage::{FAVORITES_KEY, REVIEWED_KEY, Result};
use crate::database::{KeyValueStore, SqliteStore};
use crate::models::{FavoritesSet, ReviewLedger};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersistedState {
    pub favorites: FavoritesSet,
    pub ledger: ReviewLedger,
}

pub fn load_persisted(store: &dyn KeyValueStore) -> PersistedState {
    PersistedState {
        favorites: load_key(store, FAVORITES_KEY),
        ledger: load_key(store, REVIEWED_KEY),
    }
}

fn load_key<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match read_key(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Discarding stored '{}': {}", key, e);
            T::default()
        }
    }
}

fn read_key<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Reads the database on a background thread so the first frame is not held up.
/// The receiver yields exactly one state; an unreadable database yields an empty one.
pub fn spawn_rehydration(database_path: PathBuf) -> Receiver<PersistedState> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let state = match SqliteStore::open(&database_path) {
            Ok(store) => load_persisted(&store),
            Err(e) => {
                log::warn!("Could not open {:?} for rehydration: {}", database_path, e);
                PersistedState::default()
            }
        };
        // The receiver is gone if the window closed first
        let _ = tx.send(state);
    });
    rx
}
