//! Cached access to the card catalog.
//!
//! The parsed catalog is kept in memory for [`CACHE_TTL_MINUTES`]. Every
//! successful read also produces a backup for durable storage, tagged with the
//! file it came from. The backup is the last resort when that same file later
//! becomes unreadable; it never stands in for a different file.

use super::json::{CatalogError, load_catalog};
use crate::database::KeyValueStore;
use crate::database::storage::CARDS_BACKUP_KEY;
use crate::models::Card;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CACHE_TTL_MINUTES: i64 = 30;

struct CachedCatalog {
    cards: Vec<Card>,
    loaded_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct CatalogBackup {
    source: PathBuf,
    cards: Vec<Card>,
}

pub struct CatalogLoader {
    path: PathBuf,
    cache: Option<CachedCatalog>,
    pending_backup: Option<String>,
}

impl CatalogLoader {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: None,
            pending_backup: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Points the loader at a different catalog file and drops the cache.
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = path;
        self.clear_cache();
    }

    pub fn clear_cache(&mut self) {
        if self.cache.take().is_some() {
            log::debug!("catalog cache cleared");
        }
    }

    /// Serialized backup of the last successful file read, to be stored under
    /// [`CARDS_BACKUP_KEY`]. Yields each backup once.
    pub fn take_backup(&mut self) -> Option<String> {
        self.pending_backup.take()
    }

    /// Returns the catalog, from cache when it is fresh and `force_refresh` is not set.
    ///
    /// When the file cannot be read or parsed, falls back to the cached copy
    /// (however old), then to a backup in `backup` taken from this same path.
    /// The error is returned only when neither exists.
    pub fn load(
        &mut self,
        force_refresh: bool,
        backup: &dyn KeyValueStore,
        now: DateTime<Utc>,
    ) -> Result<Vec<Card>, CatalogError> {
        if !force_refresh {
            if let Some(cache) = &self.cache {
                if now - cache.loaded_at < Duration::minutes(CACHE_TTL_MINUTES) {
                    log::debug!("using cached catalog ({} cards)", cache.cards.len());
                    return Ok(cache.cards.clone());
                }
            }
        }

        match load_catalog(&self.path) {
            Ok(cards) => {
                self.pending_backup = serialize_backup(&self.path, &cards);
                self.cache = Some(CachedCatalog {
                    cards: cards.clone(),
                    loaded_at: now,
                });
                Ok(cards)
            }
            Err(e) => {
                log::error!("Error loading catalog {:?}: {}", self.path, e);

                if let Some(cache) = &self.cache {
                    log::warn!("Using stale catalog cache");
                    return Ok(cache.cards.clone());
                }

                if let Some(cards) = load_backup(backup, &self.path) {
                    log::warn!("Loaded {} cards from storage backup", cards.len());
                    self.cache = Some(CachedCatalog {
                        cards: cards.clone(),
                        loaded_at: now,
                    });
                    return Ok(cards);
                }

                Err(e)
            }
        }
    }
}

fn serialize_backup(source: &Path, cards: &[Card]) -> Option<String> {
    let backup = CatalogBackup {
        source: source.to_path_buf(),
        cards: cards.to_vec(),
    };
    match serde_json::to_string(&backup) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Failed to back up catalog: {}", e);
            None
        }
    }
}

fn load_backup(backup: &dyn KeyValueStore, source: &Path) -> Option<Vec<Card>> {
    let json = match backup.get_item(CARDS_BACKUP_KEY) {
        Ok(json) => json?,
        Err(e) => {
            log::warn!("Catalog backup unavailable: {}", e);
            return None;
        }
    };
    match serde_json::from_str::<CatalogBackup>(&json) {
        Ok(stored) if stored.source.as_path() == source => Some(stored.cards),
        Ok(stored) => {
            log::debug!("catalog backup is from {:?}, not {:?}", stored.source, source);
            None
        }
        Err(e) => {
            log::warn!("Discarding catalog backup: {}", e);
            None
        }
    }
}
