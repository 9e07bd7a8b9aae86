//! TOML deck files
//!
//! ```toml
//! [deck]
//! name = "Capitals"
//! default_user = "alice"
//!
//! [[cards]]
//! id = "fr"
//! question = "Capital of France?"
//! answer = "Paris"
//! tags = ["geo"]
//! category = 3
//! last_review = "2024-01-01T10:00:00Z"
//! ```
//!
//! Dates are RFC 3339 strings. A card without `category` and `last_review`
//! is new; otherwise it is restored with its review history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{Card, Category, Tag};
use crate::utils::error::{ReviewError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_unique, Validate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    pub deck: DeckInfo,
    #[serde(default)]
    pub cards: Vec<DeckCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckInfo {
    pub name: String,
    pub description: Option<String>,
    pub default_user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckCard {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Integer or float; fractional values are rejected.
    pub category: Option<toml::Value>,
    pub last_review: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl DeckConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let deck: DeckConfig = toml::from_str(content)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Builds the deck's cards; cards without a creation date get `now`.
    pub fn into_cards(self, now: DateTime<Utc>) -> Result<Vec<Card>> {
        self.cards
            .into_iter()
            .map(|card| card.into_card(now))
            .collect()
    }
}

impl DeckCard {
    fn category(&self) -> Result<Option<Category>> {
        match &self.category {
            None => Ok(None),
            Some(toml::Value::Integer(value)) => Category::new(*value).map(Some),
            Some(toml::Value::Float(value)) => Category::from_number(*value).map(Some),
            Some(other) => Err(ReviewError::validation(
                "category",
                format!("Category must be a number, got {}", other),
            )),
        }
    }

    fn into_card(self, now: DateTime<Utc>) -> Result<Card> {
        let tags = self
            .tags
            .iter()
            .map(|name| Tag::new(name))
            .collect::<Result<Vec<_>>>()?;
        let category = self.category()?;
        let created_at = self.created_at.unwrap_or(now);

        if category.is_none() && self.last_review.is_none() {
            return Card::create(&self.id, &self.question, &self.answer, tags, created_at);
        }
        Ok(Card::reconstitute(
            self.id.trim(),
            self.question.trim(),
            self.answer.trim(),
            category.unwrap_or_default(),
            tags,
            self.last_review,
            created_at,
        ))
    }
}

impl Validate for DeckConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("deck.name", &self.deck.name, "Deck name cannot be empty")?;
        for card in &self.cards {
            validate_non_empty_string("cards.id", &card.id, "Card ID cannot be empty")?;
            validate_non_empty_string("cards.question", &card.question, "Question cannot be empty")?;
            validate_non_empty_string("cards.answer", &card.answer, "Answer cannot be empty")?;
        }
        validate_unique("card id", self.cards.iter().map(|c| c.id.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
    }

    const DECK: &str = r#"
[deck]
name = "Basics"
default_user = "alice"

[[cards]]
id = "add"
question = "What is 2+2?"
answer = "4"
tags = ["math"]

[[cards]]
id = "fr"
question = "Capital of France?"
answer = "Paris"
tags = ["geo", "europe"]
category = 3
last_review = "2024-01-05T10:00:00Z"
created_at = "2023-12-01T00:00:00Z"
"#;

    #[test]
    fn loads_new_and_reviewed_cards() {
        let deck = DeckConfig::from_toml_str(DECK).unwrap();
        assert_eq!(deck.deck.default_user.as_deref(), Some("alice"));

        let cards = deck.into_cards(now()).unwrap();
        assert_eq!(cards.len(), 2);

        assert_eq!(cards[0].category().value(), 1);
        assert!(cards[0].last_review_date().is_none());
        assert_eq!(cards[0].created_at(), now());

        assert_eq!(cards[1].category().value(), 3);
        assert_eq!(
            cards[1].last_review_date(),
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap())
        );
        assert_eq!(cards[1].tag_names(), vec!["geo", "europe"]);
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DECK.as_bytes()).unwrap();

        let deck = DeckConfig::from_file(file.path()).unwrap();
        assert_eq!(deck.deck.name, "Basics");
        assert_eq!(deck.cards.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DeckConfig::from_file("/nonexistent/deck.toml").unwrap_err();
        assert!(matches!(err, ReviewError::IoError(_)));
    }

    #[test]
    fn float_category_must_be_whole() {
        let whole = r#"
[deck]
name = "d"
[[cards]]
id = "c1"
question = "Q"
answer = "A"
category = 2.0
"#;
        let cards = DeckConfig::from_toml_str(whole).unwrap().into_cards(now()).unwrap();
        assert_eq!(cards[0].category().value(), 2);

        let fractional = whole.replace("2.0", "2.5");
        let err = DeckConfig::from_toml_str(&fractional)
            .unwrap()
            .into_cards(now())
            .unwrap_err();
        assert!(matches!(err, ReviewError::CategoryNotInteger { .. }));
    }

    #[test]
    fn out_of_range_category_is_rejected() {
        let deck = r#"
[deck]
name = "d"
[[cards]]
id = "c1"
question = "Q"
answer = "A"
category = 8
"#;
        let err = DeckConfig::from_toml_str(deck)
            .unwrap()
            .into_cards(now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Category must be between 1 and 7, got 8");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let deck = r#"
[deck]
name = "d"
[[cards]]
id = "c1"
question = "Q"
answer = "A"
[[cards]]
id = " c1 "
question = "Q2"
answer = "A2"
"#;
        let err = DeckConfig::from_toml_str(deck).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate card id: c1");
    }

    #[test]
    fn blank_deck_name_is_rejected() {
        let err = DeckConfig::from_toml_str("[deck]\nname = \" \"\n").unwrap_err();
        assert_eq!(err.to_string(), "Deck name cannot be empty");
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = DeckConfig::from_toml_str("[deck\nname = ").unwrap_err();
        assert!(matches!(err, ReviewError::TomlError(_)));
    }
}
