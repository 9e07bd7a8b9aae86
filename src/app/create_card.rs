use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::ports::{CardRepository, Clock};
use crate::domain::{Card, Tag};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCardRequest {
    pub card_id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCardResponse {
    pub card_id: String,
    pub category: u8,
}

pub struct CreateCard {
    cards: Arc<dyn CardRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateCard {
    pub fn new(cards: Arc<dyn CardRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { cards, clock }
    }

    pub async fn execute(&self, request: CreateCardRequest) -> Result<CreateCardResponse> {
        let tags = request
            .tags
            .iter()
            .map(|name| Tag::new(name))
            .collect::<Result<Vec<_>>>()?;

        let card = Card::create(
            &request.card_id,
            &request.question,
            &request.answer,
            tags,
            self.clock.now(),
        )?;
        self.cards.save(&card).await?;
        tracing::info!("Created card {}", card.id());

        Ok(CreateCardResponse {
            card_id: card.id().to_string(),
            category: card.category().value(),
        })
    }
}
