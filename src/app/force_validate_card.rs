use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::load_card;
use crate::domain::ports::{CardRepository, Clock};
use crate::domain::ReviewResult;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForceValidateCardRequest {
    pub card_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForceValidateCardResponse {
    pub card_id: String,
    pub new_category: u8,
    pub correct_answer: String,
}

/// "I already knew this": promotes the card without looking at an answer.
pub struct ForceValidateCard {
    cards: Arc<dyn CardRepository>,
    clock: Arc<dyn Clock>,
}

impl ForceValidateCard {
    pub fn new(cards: Arc<dyn CardRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { cards, clock }
    }

    pub async fn execute(
        &self,
        request: ForceValidateCardRequest,
    ) -> Result<ForceValidateCardResponse> {
        let mut card = load_card(self.cards.as_ref(), &request.card_id).await?;

        let previous = card.category();
        card.review(ReviewResult::forced_correct(), self.clock.now());
        self.cards.save(&card).await?;

        tracing::info!(
            "Card {} force-validated: box {} -> {}",
            card.id(),
            previous,
            card.category()
        );

        Ok(ForceValidateCardResponse {
            card_id: card.id().to_string(),
            new_category: card.category().value(),
            correct_answer: card.answer().to_string(),
        })
    }
}
