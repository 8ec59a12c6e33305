pub mod catalog;
pub mod config;
pub mod database;
pub mod i18n;
pub mod models;
pub mod store;

pub use models::{Card, CardLocaleContent, FavoritesSet, Locale, ReviewLedger, ReviewScore};
pub use store::CardStore;
