//! Application state shared by every screen: the loaded cards, the current
//! locale, favorites and the review ledger.
//!
//! In-memory state is the source of truth for the session. Every mutation of
//! favorites or ratings queues a write of the whole collection; nothing reaches
//! storage until [`CardStore::flush_pending`] runs.

use super::rehydrate::{PersistedState, load_persisted};
use crate::database::storage::{CARDS_BACKUP_KEY, FAVORITES_KEY, REVIEWED_KEY};
use crate::database::{KeyValueStore, WriteBehindQueue};
use crate::models::scheduler::{self, ReviewStats};
use crate::models::{Card, FavoritesSet, InvalidScore, Locale, ReviewLedger, ReviewScore};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    InvalidScore(#[from] InvalidScore),

    #[error("card id must not be empty")]
    EmptyCardId,
}

pub struct CardStore {
    locale: Locale,
    cards: Vec<Card>,
    favorites: FavoritesSet,
    ledger: ReviewLedger,
    hydrated: bool,
    writes: WriteBehindQueue,
    storage: Box<dyn KeyValueStore>,
}

impl CardStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            locale: Locale::default(),
            cards: Vec::new(),
            favorites: FavoritesSet::new(),
            ledger: ReviewLedger::new(),
            hydrated: false,
            writes: WriteBehindQueue::new(),
            storage,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    pub fn card_ids(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|c| c.id.as_str())
    }

    // ==================== Favorites ====================

    /// Flips membership of `card_id` and queues a write. Returns the new membership.
    pub fn toggle_favorite(&mut self, card_id: &str) -> bool {
        let is_favorite = self.favorites.toggle(card_id);
        match self.favorites.to_json() {
            Ok(json) => self.writes.enqueue(FAVORITES_KEY, json),
            Err(e) => log::warn!("Could not serialize favorites: {}", e),
        }
        is_favorite
    }

    pub fn is_favorite(&self, card_id: &str) -> bool {
        self.favorites.contains(card_id)
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    // ==================== Review ledger ====================

    /// Records the latest self-rating for a card and queues a write.
    ///
    /// Only rejects bad input; storage problems surface later, in the log,
    /// when the queue is flushed.
    pub fn mark_reviewed(&mut self, card_id: &str, score: i64) -> Result<(), StoreError> {
        if card_id.is_empty() {
            return Err(StoreError::EmptyCardId);
        }
        let score = ReviewScore::try_from(score)?;

        self.ledger.record(card_id, score);
        match self.ledger.to_json() {
            Ok(json) => self.writes.enqueue(REVIEWED_KEY, json),
            Err(e) => log::warn!("Could not serialize review ledger: {}", e),
        }
        Ok(())
    }

    pub fn score(&self, card_id: &str) -> Option<i64> {
        self.ledger.score(card_id)
    }

    pub fn ledger(&self) -> &ReviewLedger {
        &self.ledger
    }

    pub fn due_card_ids(&self) -> Vec<String> {
        scheduler::select_due(self.card_ids(), &self.ledger)
    }

    pub fn due_cards(&self) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|c| scheduler::is_due(&c.id, &self.ledger))
            .collect()
    }

    pub fn stats(&self) -> ReviewStats {
        ReviewStats::compute(self.card_ids(), &self.ledger)
    }

    // ==================== Persistence ====================

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Reads favorites and ratings from this store's own storage.
    pub fn rehydrate(&mut self) {
        let state = load_persisted(self.storage.as_ref());
        self.apply_rehydration(state);
    }

    /// Replaces favorites and ledger with `state`, unconditionally, and marks
    /// the store hydrated. Anything rated before this call is overwritten.
    pub fn apply_rehydration(&mut self, state: PersistedState) {
        log::info!(
            "Rehydrated {} favorite(s) and {} rating(s)",
            state.favorites.len(),
            state.ledger.len()
        );
        self.favorites = state.favorites;
        self.ledger = state.ledger;
        self.hydrated = true;
    }

    /// Queues a catalog backup produced by the catalog loader.
    pub fn queue_catalog_backup(&mut self, json: String) {
        self.writes.enqueue(CARDS_BACKUP_KEY, json);
    }

    pub fn has_pending_writes(&self) -> bool {
        !self.writes.is_empty()
    }

    /// Writes everything queued since the last flush. Returns the number of
    /// keys written; failures are logged and dropped.
    pub fn flush_pending(&mut self) -> usize {
        self.writes.flush(self.storage.as_mut())
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::database::storage::UnavailableStore;
    use crate::models::CardLocaleContent;

    fn create_test_card(id: &str) -> Card {
        let content = |q: &str| {
            Some(CardLocaleContent {
                question: format!("{q} {id}"),
                answer: format!("answer {id}"),
            })
        };
        Card {
            id: id.to_string(),
            category: "general".to_string(),
            tags: Vec::new(),
            zh: content("问题"),
            ja: content("問題"),
            en: content("question"),
        }
    }

    fn create_test_store(ids: &[&str]) -> CardStore {
        let mut store = CardStore::new(Box::new(MemoryStore::new()));
        store.set_cards(ids.iter().map(|id| create_test_card(id)).collect());
        store
    }

    fn stored(store: &CardStore, key: &str) -> Option<String> {
        store.storage().get_item(key).unwrap()
    }

    #[test]
    fn test_new_store_is_empty_and_not_hydrated() {
        let store = create_test_store(&[]);
        assert!(!store.is_hydrated());
        assert_eq!(store.locale(), Locale::Ja);
        assert!(store.ledger().is_empty());
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_mark_reviewed_updates_due_cards() {
        let mut store = create_test_store(&["q1", "q2", "q3"]);

        store.mark_reviewed("q1", 3).unwrap();
        store.mark_reviewed("q2", 1).unwrap();

        assert_eq!(store.due_card_ids(), vec!["q2", "q3"]);
        let due: Vec<_> = store.due_cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(due, vec!["q2", "q3"]);
    }

    #[test]
    fn test_mark_reviewed_overwrites() {
        let mut store = create_test_store(&["q1"]);

        store.mark_reviewed("q1", 3).unwrap();
        store.mark_reviewed("q1", 1).unwrap();

        assert_eq!(store.score("q1"), Some(1));
        assert_eq!(store.score("q2"), None);
    }

    #[test]
    fn test_mark_reviewed_rejects_bad_input() {
        let mut store = create_test_store(&["q1"]);

        assert_eq!(
            store.mark_reviewed("q1", 4),
            Err(StoreError::InvalidScore(InvalidScore(4)))
        );
        assert_eq!(store.mark_reviewed("", 2), Err(StoreError::EmptyCardId));
        assert!(store.ledger().is_empty());
        assert!(!store.has_pending_writes());
    }

    #[test]
    fn test_writes_are_deferred_until_flush() {
        let mut store = create_test_store(&["q1"]);

        store.mark_reviewed("q1", 2).unwrap();
        store.toggle_favorite("q1");
        assert!(store.has_pending_writes());
        assert_eq!(stored(&store, REVIEWED_KEY), None);

        assert_eq!(store.flush_pending(), 2);
        assert!(!store.has_pending_writes());
        assert_eq!(stored(&store, REVIEWED_KEY).as_deref(), Some(r#"{"q1":2}"#));
        assert_eq!(stored(&store, FAVORITES_KEY).as_deref(), Some(r#"["q1"]"#));
    }

    #[test]
    fn test_toggle_favorite_twice_persists_empty_list() {
        let mut store = create_test_store(&["q1"]);

        assert!(store.toggle_favorite("q1"));
        assert!(!store.toggle_favorite("q1"));
        assert!(!store.is_favorite("q1"));

        store.flush_pending();
        assert_eq!(stored(&store, FAVORITES_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_storage_failure_does_not_reach_caller() {
        let mut store = CardStore::new(Box::new(UnavailableStore));
        store.set_cards(vec![create_test_card("q1")]);

        store.mark_reviewed("q1", 3).unwrap();
        assert_eq!(store.flush_pending(), 0);
        assert_eq!(store.score("q1"), Some(3));
        assert!(store.due_card_ids().is_empty());
    }

    #[test]
    fn test_rehydrate_from_storage() {
        let storage = MemoryStore::new()
            .with_item(FAVORITES_KEY, r#"["q3"]"#)
            .with_item(REVIEWED_KEY, r#"{"q1":3,"q2":1}"#);
        let mut store = CardStore::new(Box::new(storage));
        store.set_cards(["q1", "q2", "q3"].iter().map(|id| create_test_card(id)).collect());

        store.rehydrate();

        assert!(store.is_hydrated());
        assert!(store.is_favorite("q3"));
        assert_eq!(store.due_card_ids(), vec!["q2", "q3"]);
    }

    #[test]
    fn test_rehydrate_with_corrupt_ledger() {
        let storage = MemoryStore::new().with_item(REVIEWED_KEY, "{{{");
        let mut store = CardStore::new(Box::new(storage));

        store.rehydrate();

        assert!(store.is_hydrated());
        assert!(store.ledger().is_empty());
    }

    #[test]
    fn test_rehydrate_with_unavailable_storage() {
        let mut store = CardStore::new(Box::new(UnavailableStore));
        store.rehydrate();
        assert!(store.is_hydrated());
        assert!(store.ledger().is_empty());
    }

    #[test]
    fn test_rehydration_replaces_existing_state() {
        let mut store = create_test_store(&["q1", "q2"]);
        store.mark_reviewed("q1", 3).unwrap();

        let mut ledger = ReviewLedger::new();
        ledger.record("q2", ReviewScore::Good);
        store.apply_rehydration(PersistedState {
            favorites: FavoritesSet::new(),
            ledger,
        });

        assert_eq!(store.score("q1"), None);
        assert_eq!(store.score("q2"), Some(2));
    }

    #[test]
    fn test_catalog_backup_waits_for_flush() {
        let mut store = create_test_store(&[]);

        store.queue_catalog_backup(r#"{"source":"all.json","cards":[]}"#.to_string());
        assert!(store.has_pending_writes());
        assert_eq!(stored(&store, CARDS_BACKUP_KEY), None);

        assert_eq!(store.flush_pending(), 1);
        assert!(stored(&store, CARDS_BACKUP_KEY).is_some());
    }

    #[test]
    fn test_stats() {
        let mut store = create_test_store(&["q1", "q2", "q3"]);
        store.mark_reviewed("q1", 1).unwrap();
        store.mark_reviewed("q2", 3).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.reviewed, 2);
        assert_eq!(stats.need_work, 1);
        assert_eq!(stats.due, 2);
    }
}
