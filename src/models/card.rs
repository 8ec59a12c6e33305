//! Card is a unit of study content with question/answer text in every supported locale
use super::Locale;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLocaleContent {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zh: Option<CardLocaleContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ja: Option<CardLocaleContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<CardLocaleContent>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("card '{card_id}' has no content for locale '{locale}'")]
    MissingLocaleContent { card_id: String, locale: Locale },
}

impl Card {
    pub fn content(&self, locale: Locale) -> Option<&CardLocaleContent> {
        match locale {
            Locale::Zh => self.zh.as_ref(),
            Locale::Ja => self.ja.as_ref(),
            Locale::En => self.en.as_ref(),
        }
    }
}

/// Looks up the question and answer for `locale`.
pub fn resolve_content(card: &Card, locale: Locale) -> Result<&CardLocaleContent, ContentError> {
    card.content(locale)
        .ok_or_else(|| ContentError::MissingLocaleContent {
            card_id: card.id.clone(),
            locale,
        })
}

/// Like [`resolve_content`], but falls back to English and then to any locale
/// the card does have. Returns `None` only for a card with no content at all.
pub fn resolve_content_or_fallback(card: &Card, locale: Locale) -> Option<&CardLocaleContent> {
    resolve_content(card, locale)
        .ok()
        .or_else(|| card.content(Locale::En))
        .or_else(|| Locale::ALL.iter().find_map(|&l| card.content(l)))
}
