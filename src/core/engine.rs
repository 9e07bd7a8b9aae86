use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::adapters::{InMemoryCardRepository, InMemorySessionRepository};
use crate::app::{
    AddTag, AddTagRequest, AddTagResponse, AnswerCard, AnswerCardRequest, AnswerCardResponse,
    AnswerQuizCard, AnswerQuizCardRequest, AnswerQuizCardResponse, CardView, CompleteDailyQuiz,
    CompleteDailyQuizRequest, CompleteDailyQuizResponse, CreateCard, CreateCardRequest,
    CreateCardResponse, DeleteCard, DeleteCardRequest, ForceValidateCard,
    ForceValidateCardRequest, ForceValidateCardResponse, GetCard, GetCardRequest,
    GetDailyQuizStatus, GetDailyQuizStatusRequest, GetDailyQuizStatusResponse, GetDueCards,
    GetDueCardsResponse, ListCards, ListCardsByTags, ListCardsByTagsRequest,
    ListCardsByTagsResponse, ListCardsRequest, ListCardsResponse, QuizAnswer, StartDailyQuiz,
    StartDailyQuizRequest, StartDailyQuizResponse,
};
use crate::domain::ports::{CardRepository, Clock, SessionRepository};
use crate::domain::{Card, UserId};
use crate::utils::error::Result;

/// Typed at the prompt to validate a card without answering it.
pub const SKIP_COMMAND: &str = "!skip";

/// Composition point: owns the storage and clock and hands them to the use cases.
pub struct ReviewEngine {
    cards: Arc<dyn CardRepository>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl ReviewEngine {
    pub fn new(
        cards: Arc<dyn CardRepository>,
        sessions: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cards,
            sessions,
            clock,
        }
    }

    /// Engine over fresh in-memory storage seeded with `cards`.
    pub fn in_memory(cards: Vec<Card>, clock: Arc<dyn Clock>) -> Self {
        tracing::debug!("Seeding in-memory storage with {} cards", cards.len());
        Self::new(
            Arc::new(InMemoryCardRepository::with_cards(cards)),
            Arc::new(InMemorySessionRepository::new()),
            clock,
        )
    }

    pub async fn create_card(&self, request: CreateCardRequest) -> Result<CreateCardResponse> {
        CreateCard::new(self.cards.clone(), self.clock.clone())
            .execute(request)
            .await
    }

    pub async fn add_tag(&self, request: AddTagRequest) -> Result<AddTagResponse> {
        AddTag::new(self.cards.clone()).execute(request).await
    }

    pub async fn list_cards(&self, request: ListCardsRequest) -> Result<ListCardsResponse> {
        ListCards::new(self.cards.clone()).execute(request).await
    }

    pub async fn list_cards_by_tags(
        &self,
        request: ListCardsByTagsRequest,
    ) -> Result<ListCardsByTagsResponse> {
        ListCardsByTags::new(self.cards.clone())
            .execute(request)
            .await
    }

    pub async fn get_card(&self, request: GetCardRequest) -> Result<CardView> {
        GetCard::new(self.cards.clone()).execute(request).await
    }

    pub async fn delete_card(&self, request: DeleteCardRequest) -> Result<()> {
        DeleteCard::new(self.cards.clone()).execute(request).await
    }

    pub async fn due_cards(&self) -> Result<GetDueCardsResponse> {
        GetDueCards::new(self.cards.clone(), self.clock.clone())
            .execute()
            .await
    }

    pub async fn answer_card(&self, request: AnswerCardRequest) -> Result<AnswerCardResponse> {
        AnswerCard::new(self.cards.clone(), self.clock.clone())
            .execute(request)
            .await
    }

    pub async fn force_validate_card(
        &self,
        request: ForceValidateCardRequest,
    ) -> Result<ForceValidateCardResponse> {
        ForceValidateCard::new(self.cards.clone(), self.clock.clone())
            .execute(request)
            .await
    }

    pub async fn start_daily_quiz(
        &self,
        request: StartDailyQuizRequest,
    ) -> Result<StartDailyQuizResponse> {
        StartDailyQuiz::new(self.cards.clone(), self.sessions.clone(), self.clock.clone())
            .execute(request)
            .await
    }

    pub async fn quiz_status(
        &self,
        request: GetDailyQuizStatusRequest,
    ) -> Result<GetDailyQuizStatusResponse> {
        GetDailyQuizStatus::new(self.cards.clone(), self.sessions.clone(), self.clock.clone())
            .execute(request)
            .await
    }

    pub async fn answer_quiz_card(
        &self,
        request: AnswerQuizCardRequest,
    ) -> Result<AnswerQuizCardResponse> {
        AnswerQuizCard::new(self.cards.clone(), self.sessions.clone(), self.clock.clone())
            .execute(request)
            .await
    }

    pub async fn complete_daily_quiz(
        &self,
        request: CompleteDailyQuizRequest,
    ) -> Result<CompleteDailyQuizResponse> {
        CompleteDailyQuiz::new(self.sessions.clone(), self.clock.clone())
            .execute(request)
            .await
    }

    /// Runs today's quiz for `user_id` interactively.
    ///
    /// Questions go to `output`, one answer per line is read from `input`.
    /// Cards already answered earlier in the day are not asked again, and cards
    /// deleted since the quiz started are skipped. Returns the summary once
    /// every remaining card is answered and the session is completed, `None` if
    /// input ended first or the quiz was already completed.
    pub async fn run_quiz<R: BufRead, W: Write>(
        &self,
        user_id: &str,
        mut input: R,
        mut output: W,
    ) -> Result<Option<CompleteDailyQuizResponse>> {
        let started = self
            .start_daily_quiz(StartDailyQuizRequest {
                user_id: user_id.to_string(),
            })
            .await?;
        if started.completed {
            writeln!(output, "Today's quiz is already completed.")?;
            return Ok(None);
        }

        let user = UserId::new(user_id)?;
        let pending = match self
            .sessions
            .find_by_user_and_date(&user, self.clock.now())
            .await?
        {
            Some(session) => session.pending_card_ids(),
            None => started.card_ids,
        };

        let mut cards = Vec::with_capacity(pending.len());
        for card_id in pending {
            match self.cards.find_by_id(&card_id).await? {
                Some(card) => cards.push(card),
                None => tracing::warn!("Skipping card {} listed in today's quiz: not found", card_id),
            }
        }

        if cards.is_empty() {
            writeln!(output, "No cards to review today.")?;
        }

        let total = cards.len();
        for (index, card) in cards.into_iter().enumerate() {
            writeln!(output, "[{}/{}] {}", index + 1, total, card.question())?;
            write!(output, "> ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                writeln!(output, "Quiz paused with {} cards left.", total - index)?;
                tracing::info!("Quiz input ended with {} cards pending", total - index);
                return Ok(None);
            }

            let line = line.trim_end_matches(['\r', '\n']);
            let answer = if line.trim() == SKIP_COMMAND {
                QuizAnswer::AlreadyKnown
            } else {
                QuizAnswer::Text(line.to_string())
            };

            let result = self
                .answer_quiz_card(AnswerQuizCardRequest {
                    user_id: user_id.to_string(),
                    card_id: card.id().to_string(),
                    answer,
                })
                .await?;
            match (&result.user_answer, result.correct) {
                (None, _) => writeln!(output, "Validated. Box {}.", result.new_category)?,
                (Some(_), true) => writeln!(output, "Correct! Box {}.", result.new_category)?,
                (Some(_), false) => writeln!(
                    output,
                    "Incorrect, expected: {}. Back to box {}.",
                    result.expected_answer, result.new_category
                )?,
            }
        }

        let summary = self
            .complete_daily_quiz(CompleteDailyQuizRequest {
                user_id: user_id.to_string(),
            })
            .await?;
        writeln!(
            output,
            "Quiz complete: {}/{} correct ({:.0}%).",
            summary.correct_answers, summary.total_cards, summary.success_rate
        )?;
        Ok(Some(summary))
    }
}
