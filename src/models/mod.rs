pub mod card;
pub mod favorites;
pub mod locale;
pub mod review_ledger;
pub mod review_score;
pub mod scheduler;

pub use card::{Card, CardLocaleContent, ContentError};
pub use favorites::FavoritesSet;
pub use locale::Locale;
pub use review_ledger::ReviewLedger;
pub use review_score::{InvalidScore, ReviewScore};
pub use scheduler::ReviewStats;
