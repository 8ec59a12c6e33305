//! Last self-rating per card. There is no history: a new rating overwrites the old one.
//!
//! Stored scores are raw integers. Rehydrated data is not range-checked, so the
//! ledger can hold values outside 1..=3; only new ratings go through
//! [`ReviewScore`] validation.
use super::ReviewScore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewLedger {
    scores: BTreeMap<String, i64>,
}

impl ReviewLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, card_id: &str, score: ReviewScore) {
        self.scores.insert(card_id.to_string(), score.value());
    }

    /// `None` means the card was never rated.
    pub fn score(&self, card_id: &str) -> Option<i64> {
        self.scores.get(card_id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.scores.iter().map(|(id, &score)| (id.as_str(), score))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FromIterator<(String, i64)> for ReviewLedger {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrated_card_has_no_score() {
        let ledger = ReviewLedger::new();
        assert_eq!(ledger.score("q1"), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_last_rating_wins() {
        let mut ledger = ReviewLedger::new();
        ledger.record("q1", ReviewScore::Easy);
        ledger.record("q1", ReviewScore::Hard);

        assert_eq!(ledger.score("q1"), Some(1));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_repeated_rating_is_idempotent() {
        let mut once = ReviewLedger::new();
        once.record("q1", ReviewScore::Good);

        let mut twice = ReviewLedger::new();
        twice.record("q1", ReviewScore::Good);
        twice.record("q1", ReviewScore::Good);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_json_is_a_plain_object() {
        let mut ledger = ReviewLedger::new();
        ledger.record("q1", ReviewScore::Easy);
        ledger.record("q2", ReviewScore::Hard);

        assert_eq!(ledger.to_json().unwrap(), r#"{"q1":3,"q2":1}"#);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut ledger = ReviewLedger::new();
        ledger.record("q1", ReviewScore::Easy);
        ledger.record("q2", ReviewScore::Hard);
        ledger.record("日本語", ReviewScore::Good);

        let restored = ReviewLedger::from_json(&ledger.to_json().unwrap()).unwrap();
        assert_eq!(restored, ledger);
    }

    #[test]
    fn test_stored_values_are_not_range_checked() {
        let ledger = ReviewLedger::from_json(r#"{"q1":0,"q2":7}"#).unwrap();
        assert_eq!(ledger.score("q1"), Some(0));
        assert_eq!(ledger.score("q2"), Some(7));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(ReviewLedger::from_json("[1,2,3]").is_err());
        assert!(ReviewLedger::from_json("not json").is_err());
    }
}
