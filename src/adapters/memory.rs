//! In-memory storage
//!
//! Each repository owns its state; share one instance between use cases by
//! wrapping it in an `Arc`. Values are cloned on the way in and out, so a
//! caller mutating a loaded card changes nothing until it saves it back.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::ports::{CardRepository, SessionRepository};
use crate::domain::{Card, ReviewSession, Tag, UserId};
use crate::utils::error::Result;

/// Cards in insertion order; saving an existing id replaces it in place.
#[derive(Debug, Default)]
pub struct InMemoryCardRepository {
    cards: RwLock<Vec<Card>>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut stored: Vec<Card> = Vec::new();
        for card in cards {
            match stored.iter_mut().find(|c| c.id() == card.id()) {
                Some(existing) => *existing = card,
                None => stored.push(card),
            }
        }
        Self {
            cards: RwLock::new(stored),
        }
    }

    pub async fn len(&self) -> usize {
        self.cards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cards.read().await.is_empty()
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn save(&self, card: &Card) -> Result<()> {
        let mut cards = self.cards.write().await;
        match cards.iter_mut().find(|c| c.id() == card.id()) {
            Some(existing) => *existing = card.clone(),
            None => cards.push(card.clone()),
        }
        tracing::debug!("Saved card {} (box {})", card.id(), card.category());
        Ok(())
    }

    async fn find_by_id(&self, card_id: &str) -> Result<Option<Card>> {
        let cards = self.cards.read().await;
        Ok(cards.iter().find(|c| c.id() == card_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Card>> {
        Ok(self.cards.read().await.clone())
    }

    async fn find_by_tag(&self, tag: &Tag) -> Result<Vec<Card>> {
        let cards = self.cards.read().await;
        Ok(cards.iter().filter(|c| c.has_tag(tag)).cloned().collect())
    }

    async fn find_due_cards(&self, as_of: DateTime<Utc>) -> Result<Vec<Card>> {
        let cards = self.cards.read().await;
        let due: Vec<Card> = cards.iter().filter(|c| c.is_due(as_of)).cloned().collect();
        tracing::debug!("{} of {} cards due at {}", due.len(), cards.len(), as_of);
        Ok(due)
    }

    async fn delete(&self, card_id: &str) -> Result<bool> {
        let mut cards = self.cards.write().await;
        let before = cards.len();
        cards.retain(|c| c.id() != card_id);
        Ok(cards.len() != before)
    }
}

/// Sessions keyed by user and UTC calendar day.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<(UserId, NaiveDate), ReviewSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &ReviewSession) -> Result<()> {
        let key = (session.user_id().clone(), session.day());
        self.sessions.write().await.insert(key, session.clone());
        tracing::debug!(
            "Saved session {} for {} on {}",
            session.id(),
            session.user_id(),
            session.day()
        );
        Ok(())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: DateTime<Utc>,
    ) -> Result<Option<ReviewSession>> {
        let key = (user_id.clone(), date.date_naive());
        Ok(self.sessions.read().await.get(&key).cloned())
    }
}
