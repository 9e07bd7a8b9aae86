//! Card aggregate
//!
//! A card owns its Leitner box and review history. Answering correctly moves
//! it one box up, answering incorrectly sends it back to box 1. A card is due
//! once the interval of its box has elapsed since the last review, counted in
//! whole calendar days.

use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, ReviewResult, Tag};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    id: String,
    question: String,
    answer: String,
    category: Category,
    tags: Vec<Tag>,
    last_review_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Card {
    /// Creates a new card in box 1 that has never been reviewed.
    ///
    /// Tags are kept exactly as given, duplicates included; only
    /// [`Card::add_tag`] guards against duplicates.
    pub fn create(
        id: &str,
        question: &str,
        answer: &str,
        tags: Vec<Tag>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_non_empty_string("card_id", id, "Card ID cannot be empty")?;
        validate_non_empty_string("question", question, "Question cannot be empty")?;
        validate_non_empty_string("answer", answer, "Answer cannot be empty")?;

        Ok(Self {
            id: id.trim().to_string(),
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
            category: Category::first(),
            tags,
            last_review_date: None,
            created_at,
        })
    }

    /// Rebuilds a card from stored state without re-validating its text.
    pub fn reconstitute(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: Category,
        tags: Vec<Tag>,
        last_review_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
            category,
            tags,
            last_review_date,
            created_at,
        }
    }

    /// Applies an answer outcome and stamps the review date.
    ///
    /// The date is taken as is, even if it is earlier than the previous review.
    pub fn review(&mut self, result: ReviewResult, date: DateTime<Utc>) {
        self.category = if result.is_correct() {
            self.category.next()
        } else {
            Category::first()
        };
        self.last_review_date = Some(date);
    }

    /// Appends the tag unless an equal one is already present.
    pub fn add_tag(&mut self, tag: Tag) {
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Returns true if the card should be presented at `current_date`.
    ///
    /// Never-reviewed cards are always due, graduated cards never are. The
    /// boundary is inclusive: a box 1 card reviewed at 10:00 is due from 10:00
    /// the next day.
    pub fn is_due(&self, current_date: DateTime<Utc>) -> bool {
        if self.last_review_date.is_none() {
            return true;
        }
        if self.is_graduated() {
            return false;
        }
        self.next_review_date()
            .is_some_and(|next_review| current_date >= next_review)
    }

    /// Moment the card becomes due again, if it is scheduled at all.
    pub fn next_review_date(&self) -> Option<DateTime<Utc>> {
        if self.is_graduated() {
            return None;
        }
        let days = Days::new(u64::from(self.category.days_between_reviews()));
        self.last_review_date?.checked_add_days(days)
    }

    pub fn is_graduated(&self) -> bool {
        self.category.is_graduated()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.value().to_string()).collect()
    }

    pub fn last_review_date(&self) -> Option<DateTime<Utc>> {
        self.last_review_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
