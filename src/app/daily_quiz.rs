//! Daily quiz orchestration on top of [`ReviewSession`]
//!
//! The session itself accepts answers in any state; these use cases refuse to
//! record into a completed session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::answer_card::{AnswerCard, AnswerCardRequest};
use super::force_validate_card::{ForceValidateCard, ForceValidateCardRequest};
use crate::domain::ports::{CardRepository, Clock, SessionRepository};
use crate::domain::{ReviewSession, UserId};
use crate::utils::error::{ReviewError, Result};

async fn load_session(
    sessions: &dyn SessionRepository,
    user_id: &UserId,
    now: DateTime<Utc>,
) -> Result<ReviewSession> {
    sessions
        .find_by_user_and_date(user_id, now)
        .await?
        .ok_or_else(|| ReviewError::SessionNotFound {
            user_id: user_id.to_string(),
            date: now.date_naive().to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetDailyQuizStatusRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetDailyQuizStatusResponse {
    pub available: bool,
    /// Today, once today's quiz has been completed.
    pub last_quiz_date: Option<NaiveDate>,
    pub cards_count: usize,
}

pub struct GetDailyQuizStatus {
    cards: Arc<dyn CardRepository>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl GetDailyQuizStatus {
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

    pub async fn execute(
        &self,
        request: GetDailyQuizStatusRequest,
    ) -> Result<GetDailyQuizStatusResponse> {
        let user_id = UserId::new(&request.user_id)?;
        let now = self.clock.now();

        let session = self.sessions.find_by_user_and_date(&user_id, now).await?;
        let due_count = self.cards.find_due_cards(now).await?.len();

        let completed = session.as_ref().is_some_and(|s| s.is_completed());
        let in_progress = session.as_ref().is_some_and(|s| !s.is_completed());

        Ok(GetDailyQuizStatusResponse {
            available: !completed && (due_count > 0 || in_progress),
            last_quiz_date: completed.then(|| now.date_naive()),
            cards_count: due_count,
        })
    }
}

/// What the learner gave for a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizAnswer {
    Text(String),
    /// "I already knew this": validated without comparing text.
    AlreadyKnown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerQuizCardRequest {
    pub user_id: String,
    pub card_id: String,
    pub answer: QuizAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerQuizCardResponse {
    pub card_id: String,
    pub correct: bool,
    pub expected_answer: String,
    pub user_answer: Option<String>,
    pub new_category: u8,
}

pub struct AnswerQuizCard {
    cards: Arc<dyn CardRepository>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl AnswerQuizCard {
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

    pub async fn execute(&self, request: AnswerQuizCardRequest) -> Result<AnswerQuizCardResponse> {
        let user_id = UserId::new(&request.user_id)?;
        let mut session = load_session(self.sessions.as_ref(), &user_id, self.clock.now()).await?;
        if session.is_completed() {
            tracing::warn!("Rejected answer for card {} in completed session {}", request.card_id, session.id());
            return Err(ReviewError::SessionCompleted {
                session_id: session.id().to_string(),
            });
        }

        let response = match request.answer {
            QuizAnswer::Text(text) => {
                let answered = AnswerCard::new(self.cards.clone(), self.clock.clone())
                    .execute(AnswerCardRequest {
                        card_id: request.card_id,
                        user_answer: text.clone(),
                    })
                    .await?;
                AnswerQuizCardResponse {
                    card_id: answered.card_id,
                    correct: answered.is_correct,
                    expected_answer: answered.correct_answer,
                    user_answer: Some(text),
                    new_category: answered.new_category,
                }
            }
            QuizAnswer::AlreadyKnown => {
                let forced = ForceValidateCard::new(self.cards.clone(), self.clock.clone())
                    .execute(ForceValidateCardRequest {
                        card_id: request.card_id,
                    })
                    .await?;
                AnswerQuizCardResponse {
                    card_id: forced.card_id,
                    correct: true,
                    expected_answer: forced.correct_answer,
                    user_answer: None,
                    new_category: forced.new_category,
                }
            }
        };

        session.record_answer(response.card_id.clone(), response.correct);
        self.sessions.save(&session).await?;
        Ok(response)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompleteDailyQuizRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteDailyQuizResponse {
    pub session_id: String,
    pub completed_at: DateTime<Utc>,
    pub total_cards: usize,
    pub correct_answers: usize,
    pub incorrect_answers: usize,
    /// Percentage of correct answers, 0 when nothing was answered.
    pub success_rate: f64,
}

pub struct CompleteDailyQuiz {
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl CompleteDailyQuiz {
    pub fn new(sessions: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { sessions, clock }
    }

    pub async fn execute(
        &self,
        request: CompleteDailyQuizRequest,
    ) -> Result<CompleteDailyQuizResponse> {
        let user_id = UserId::new(&request.user_id)?;
        let now = self.clock.now();
        let mut session = load_session(self.sessions.as_ref(), &user_id, now).await?;

        session.complete();
        self.sessions.save(&session).await?;

        let stats = session.stats();
        let success_rate = if stats.total > 0 {
            stats.correct as f64 / stats.total as f64 * 100.0
        } else {
            0.0
        };
        tracing::info!(
            "Completed session {}: {}/{} correct",
            session.id(),
            stats.correct,
            stats.total
        );

        Ok(CompleteDailyQuizResponse {
            session_id: session.id().to_string(),
            completed_at: now,
            total_cards: stats.total,
            correct_answers: stats.correct,
            incorrect_answers: stats.incorrect,
            success_rate,
        })
    }
}
