use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::load_card;
use crate::domain::ports::{CardRepository, Clock};
use crate::domain::ReviewResult;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerCardRequest {
    pub card_id: String,
    pub user_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerCardResponse {
    pub card_id: String,
    pub is_correct: bool,
    pub new_category: u8,
    /// Stored answer as written on the card.
    pub correct_answer: String,
}

/// Answers are compared after trimming and case folding.
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    normalize_answer(submitted) == normalize_answer(expected)
}

fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Checks a submitted answer and moves the card up or back to box 1.
pub struct AnswerCard {
    cards: Arc<dyn CardRepository>,
    clock: Arc<dyn Clock>,
}

impl AnswerCard {
    pub fn new(cards: Arc<dyn CardRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { cards, clock }
    }

    pub async fn execute(&self, request: AnswerCardRequest) -> Result<AnswerCardResponse> {
        let mut card = load_card(self.cards.as_ref(), &request.card_id).await?;

        let is_correct = answers_match(&request.user_answer, card.answer());
        let result = if is_correct {
            ReviewResult::correct()
        } else {
            ReviewResult::incorrect()
        };

        let previous = card.category();
        card.review(result, self.clock.now());
        self.cards.save(&card).await?;

        tracing::info!(
            "Card {} answered {}: box {} -> {}",
            card.id(),
            result,
            previous,
            card.category()
        );

        Ok(AnswerCardResponse {
            card_id: card.id().to_string(),
            is_correct,
            new_category: card.category().value(),
            correct_answer: card.answer().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_ignores_case_and_surrounding_whitespace() {
        assert!(answers_match("  4  ", "4"));
        assert!(answers_match("PARIS", "Paris"));
        assert!(!answers_match("Pa ris", "Paris"));
        assert!(!answers_match("5", "4"));
    }
}
