//! Card lookups: listing with filters, single-card detail, deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::load_card;
use crate::domain::ports::CardRepository;
use crate::domain::{Card, Category, Tag};
use crate::utils::error::{ReviewError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: u8,
    pub tags: Vec<String>,
    pub last_review_date: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id().to_string(),
            question: card.question().to_string(),
            answer: card.answer().to_string(),
            category: card.category().value(),
            tags: card.tag_names(),
            last_review_date: card.last_review_date(),
            next_review_date: card.next_review_date(),
            created_at: card.created_at(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListCardsRequest {
    pub tag: Option<String>,
    pub category: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCardsResponse {
    pub cards: Vec<CardView>,
    pub total: usize,
}

/// All cards in storage order, optionally narrowed to one tag and/or one box.
pub struct ListCards {
    cards: Arc<dyn CardRepository>,
}

impl ListCards {
    pub fn new(cards: Arc<dyn CardRepository>) -> Self {
        Self { cards }
    }

    pub async fn execute(&self, request: ListCardsRequest) -> Result<ListCardsResponse> {
        let tag = request.tag.as_deref().map(Tag::new).transpose()?;
        let category = request.category.map(Category::new).transpose()?;

        let mut cards = match &tag {
            Some(tag) => self.cards.find_by_tag(tag).await?,
            None => self.cards.find_all().await?,
        };
        if let Some(category) = category {
            cards.retain(|c| c.category() == category);
        }

        let cards: Vec<CardView> = cards.iter().map(CardView::from).collect();
        Ok(ListCardsResponse {
            total: cards.len(),
            cards,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetCardRequest {
    pub card_id: String,
}

pub struct GetCard {
    cards: Arc<dyn CardRepository>,
}

impl GetCard {
    pub fn new(cards: Arc<dyn CardRepository>) -> Self {
        Self { cards }
    }

    pub async fn execute(&self, request: GetCardRequest) -> Result<CardView> {
        let card = load_card(self.cards.as_ref(), &request.card_id).await?;
        Ok(CardView::from(&card))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteCardRequest {
    pub card_id: String,
}

pub struct DeleteCard {
    cards: Arc<dyn CardRepository>,
}

impl DeleteCard {
    pub fn new(cards: Arc<dyn CardRepository>) -> Self {
        Self { cards }
    }

    pub async fn execute(&self, request: DeleteCardRequest) -> Result<()> {
        if !self.cards.delete(&request.card_id).await? {
            return Err(ReviewError::CardNotFound {
                card_id: request.card_id,
            });
        }
        tracing::info!("Deleted card {}", request.card_id);
        Ok(())
    }
}
