//! Startup configuration from the command line.

use crate::models::Locale;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "knowledge-cards", about = "Trilingual knowledge cards with self-rated review", version)]
pub struct Cli {
    /// SQLite file holding favorites and review ratings
    #[arg(long, default_value = "db.sqlite3")]
    pub database: PathBuf,

    /// Card catalog JSON document
    #[arg(long, default_value = "data/cards/all.json")]
    pub catalog: PathBuf,

    /// Display language for this session (zh, ja, en)
    #[arg(long, default_value = "ja")]
    pub locale: Locale,

    /// Keep favorites and ratings in memory only
    #[arg(long)]
    pub in_memory: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// `None` when nothing should be persisted
    pub database_path: Option<PathBuf>,
    pub catalog_path: PathBuf,
    pub locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: Some(PathBuf::from("db.sqlite3")),
            catalog_path: PathBuf::from("data/cards/all.json"),
            locale: Locale::default(),
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            database_path: (!cli.in_memory).then_some(cli.database),
            catalog_path: cli.catalog,
            locale: cli.locale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_default_config() {
        let cli = Cli::try_parse_from(["knowledge-cards"]).unwrap();
        assert_eq!(AppConfig::from(cli), AppConfig::default());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "knowledge-cards",
            "--database",
            "/tmp/cards.db",
            "--catalog",
            "cards.json",
            "--locale",
            "en",
        ])
        .unwrap();
        let config = AppConfig::from(cli);

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/cards.db")));
        assert_eq!(config.catalog_path, PathBuf::from("cards.json"));
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_in_memory_disables_database() {
        let cli = Cli::try_parse_from(["knowledge-cards", "--in-memory"]).unwrap();
        assert_eq!(AppConfig::from(cli).database_path, None);
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert!(Cli::try_parse_from(["knowledge-cards", "--locale", "fr"]).is_err());
    }
}
