//! Due-card selection.
//!
//! The rule is binary and has no notion of time:
//! - A card with no entry in the ledger is due (never reviewed)
//! - A card rated below 2 ("hard") is due
//! - A card rated 2 ("good") or higher is not due
//!
//! Rating a card "good" or "easy" takes it out of review until it is rated "hard" again.

use super::ReviewLedger;

/// Scores strictly below this keep a card in review.
pub const DUE_THRESHOLD: i64 = 2;

pub fn is_due(card_id: &str, ledger: &ReviewLedger) -> bool {
    match ledger.score(card_id) {
        None => true,
        Some(score) => score < DUE_THRESHOLD,
    }
}

/// Returns the ids from `all_card_ids` that are due, keeping their input order.
pub fn select_due<'a, I>(all_card_ids: I, ledger: &ReviewLedger) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    all_card_ids
        .into_iter()
        .filter(|id| is_due(id, ledger))
        .map(str::to_string)
        .collect()
}

/// Summary numbers shown on the statistics panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReviewStats {
    pub total: usize,
    pub reviewed: usize,
    /// Ledger entries rated "hard" or lower
    pub need_work: usize,
    pub due: usize,
}

impl ReviewStats {
    pub fn compute<'a, I>(all_card_ids: I, ledger: &ReviewLedger) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut total = 0;
        let mut due = 0;
        for id in all_card_ids {
            total += 1;
            if is_due(id, ledger) {
                due += 1;
            }
        }

        Self {
            total,
            reviewed: ledger.len(),
            need_work: ledger.iter().filter(|&(_, score)| score <= 1).count(),
            due,
        }
    }
}
