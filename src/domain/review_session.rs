//! Daily review session (quiz)
//!
//! One session exists per user and calendar day. It lists the cards due that
//! day and keeps its own tally of answers; cards know nothing about sessions.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::UserId;
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

/// Lifecycle of a stored session. A day without a session is "not started".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub correct: usize,
    pub incorrect: usize,
    /// Distinct cards answered, not cards listed in the session.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSession {
    id: String,
    user_id: UserId,
    date: DateTime<Utc>,
    card_ids: Vec<String>,
    answers: BTreeMap<String, bool>,
    completed: bool,
}

impl ReviewSession {
    pub fn create(
        id: &str,
        user_id: UserId,
        date: DateTime<Utc>,
        card_ids: Vec<String>,
    ) -> Result<Self> {
        validate_non_empty_string("session_id", id, "Session ID cannot be empty")?;

        let mut session = Self {
            id: id.to_string(),
            user_id,
            date,
            card_ids: Vec::with_capacity(card_ids.len()),
            answers: BTreeMap::new(),
            completed: false,
        };
        for card_id in card_ids {
            session.add_card(card_id);
        }
        Ok(session)
    }

    /// Rebuilds a stored session as is.
    pub fn reconstitute(
        id: impl Into<String>,
        user_id: UserId,
        date: DateTime<Utc>,
        card_ids: Vec<String>,
        answers: BTreeMap<String, bool>,
        completed: bool,
    ) -> Self {
        Self {
            id: id.into(),
            user_id,
            date,
            card_ids,
            answers,
            completed,
        }
    }

    pub fn add_card(&mut self, card_id: impl Into<String>) {
        let card_id = card_id.into();
        if !self.card_ids.contains(&card_id) {
            self.card_ids.push(card_id);
        }
    }

    /// Records an answer; the last answer for a card wins. The card does not
    /// have to be listed in the session.
    pub fn record_answer(&mut self, card_id: impl Into<String>, correct: bool) {
        self.answers.insert(card_id.into(), correct);
    }

    pub fn stats(&self) -> SessionStats {
        let correct = self.answers.values().filter(|&&ok| ok).count();
        SessionStats {
            correct,
            incorrect: self.answers.len() - correct,
            total: self.answers.len(),
        }
    }

    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Compares the calendar day (UTC), ignoring the time of day.
    pub fn is_for_date(&self, date: DateTime<Utc>) -> bool {
        self.date.year() == date.year()
            && self.date.month() == date.month()
            && self.date.day() == date.day()
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn state(&self) -> SessionState {
        if self.completed {
            SessionState::Completed
        } else {
            SessionState::InProgress
        }
    }

    pub fn is_answered(&self, card_id: &str) -> bool {
        self.answers.contains_key(card_id)
    }

    /// Listed cards that have no recorded answer yet, in session order.
    pub fn pending_card_ids(&self) -> Vec<String> {
        self.card_ids
            .iter()
            .filter(|id| !self.is_answered(id))
            .cloned()
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn card_ids(&self) -> &[String] {
        &self.card_ids
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
