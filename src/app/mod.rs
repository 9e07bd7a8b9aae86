//! Scheduling use cases
//!
//! Each use case is constructed with the storage ports and clock it needs and
//! exposes one `execute` call taking an explicit request struct. Use cases
//! read, mutate and write back without locking: two concurrent calls on the
//! same card or the same (user, day) session race, and the last save wins.

pub mod answer_card;
pub mod cards;
pub mod create_card;
pub mod daily_quiz;
pub mod force_validate_card;
pub mod get_due_cards;
pub mod start_daily_quiz;
pub mod tags;

pub use answer_card::{AnswerCard, AnswerCardRequest, AnswerCardResponse};
pub use cards::{
    CardView, DeleteCard, DeleteCardRequest, GetCard, GetCardRequest, ListCards,
    ListCardsRequest, ListCardsResponse,
};
pub use create_card::{CreateCard, CreateCardRequest, CreateCardResponse};
pub use daily_quiz::{
    AnswerQuizCard, AnswerQuizCardRequest, AnswerQuizCardResponse, CompleteDailyQuiz,
    CompleteDailyQuizRequest, CompleteDailyQuizResponse, GetDailyQuizStatus,
    GetDailyQuizStatusRequest, GetDailyQuizStatusResponse, QuizAnswer,
};
pub use force_validate_card::{
    ForceValidateCard, ForceValidateCardRequest, ForceValidateCardResponse,
};
pub use get_due_cards::{GetDueCards, GetDueCardsResponse};
pub use start_daily_quiz::{
    session_id_for, StartDailyQuiz, StartDailyQuizRequest, StartDailyQuizResponse,
};
pub use tags::{AddTag, AddTagRequest, AddTagResponse, ListCardsByTags, ListCardsByTagsRequest, ListCardsByTagsResponse};

use crate::domain::ports::CardRepository;
use crate::domain::Card;
use crate::utils::error::{ReviewError, Result};

/// Loads a card or fails with [`ReviewError::CardNotFound`].
pub(crate) async fn load_card(cards: &dyn CardRepository, card_id: &str) -> Result<Card> {
    cards
        .find_by_id(card_id)
        .await?
        .ok_or_else(|| ReviewError::CardNotFound {
            card_id: card_id.to_string(),
        })
}
