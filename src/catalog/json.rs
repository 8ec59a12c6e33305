//! Reading the card catalog document: `{ "cards": [ ... ] }`.

use crate::models::Card;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct CatalogDocument {
    cards: Vec<Card>,
}

pub fn parse_catalog(json: &str) -> Result<Vec<Card>, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    Ok(document.cards)
}

/// Reads and parses the catalog file at `path`.
pub fn load_catalog(path: &Path) -> Result<Vec<Card>, CatalogError> {
    let contents = fs::read_to_string(path)?;
    let cards = parse_catalog(&contents)?;
    log::info!("Loaded {} cards from {:?}", cards.len(), path);
    Ok(cards)
}
