use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::ports::{CardRepository, Clock, SessionRepository};
use crate::domain::{ReviewSession, UserId};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartDailyQuizRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartDailyQuizResponse {
    pub session_id: String,
    pub card_ids: Vec<String>,
    pub completed: bool,
}

impl From<&ReviewSession> for StartDailyQuizResponse {
    fn from(session: &ReviewSession) -> Self {
        Self {
            session_id: session.id().to_string(),
            card_ids: session.card_ids().to_vec(),
            completed: session.is_completed(),
        }
    }
}

/// Session id for a user's quiz on the calendar day of `date`: `{user}-{YYYYMMDD}`.
pub fn session_id_for(user_id: &UserId, date: DateTime<Utc>) -> String {
    format!("{}-{}", user_id.as_str(), date.format("%Y%m%d"))
}

/// Opens today's quiz for a user, or returns the one already opened today.
///
/// A second call on the same day returns the stored session unchanged, even
/// once it has been completed.
pub struct StartDailyQuiz {
    cards: Arc<dyn CardRepository>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl StartDailyQuiz {
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

    pub async fn execute(&self, request: StartDailyQuizRequest) -> Result<StartDailyQuizResponse> {
        let user_id = UserId::new(&request.user_id)?;
        let today = self.clock.now();

        if let Some(existing) = self.sessions.find_by_user_and_date(&user_id, today).await? {
            tracing::debug!("Resuming session {} for {}", existing.id(), user_id);
            return Ok(StartDailyQuizResponse::from(&existing));
        }

        let due = self.cards.find_due_cards(today).await?;
        let card_ids = due.iter().map(|c| c.id().to_string()).collect();
        let session = ReviewSession::create(
            &session_id_for(&user_id, today),
            user_id.clone(),
            today,
            card_ids,
        )?;
        self.sessions.save(&session).await?;

        tracing::info!(
            "Started session {} for {} with {} cards",
            session.id(),
            user_id,
            session.card_ids().len()
        );
        Ok(StartDailyQuizResponse::from(&session))
    }
}
