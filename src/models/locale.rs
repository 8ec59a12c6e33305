//! Supported display languages
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Zh,
    #[default]
    Ja,
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Zh, Locale::Ja, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }

    /// Name of the language in that language, for the switcher
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::Zh => "中文",
            Locale::Ja => "日本語",
            Locale::En => "English",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported locale '{0}', expected one of zh, ja, en")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" => Ok(Locale::Zh),
            "ja" => Ok(Locale::Ja),
            "en" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_japanese() {
        assert_eq!(Locale::default(), Locale::Ja);
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("zh".parse::<Locale>().unwrap(), Locale::Zh);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_code_matches_display() {
        for locale in Locale::ALL {
            assert_eq!(locale.to_string(), locale.code());
        }
    }
}
