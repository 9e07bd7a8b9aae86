//! Contracts the scheduling core consumes. Implementations live in
//! `crate::adapters`; the core never reads time or storage any other way.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Card, ReviewSession, Tag, UserId};
use crate::utils::error::Result;

#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn save(&self, card: &Card) -> Result<()>;
    async fn find_by_id(&self, card_id: &str) -> Result<Option<Card>>;
    async fn find_all(&self) -> Result<Vec<Card>>;
    async fn find_by_tag(&self, tag: &Tag) -> Result<Vec<Card>>;
    /// Must apply [`Card::is_due`] semantics.
    async fn find_due_cards(&self, as_of: DateTime<Utc>) -> Result<Vec<Card>>;
    /// Returns false when no card had that id.
    async fn delete(&self, card_id: &str) -> Result<bool>;
}

/// Session storage. Lookups match by calendar day, the same granularity as
/// [`ReviewSession::is_for_date`]; matching on the exact timestamp would let
/// a same-day restart create a second session.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &ReviewSession) -> Result<()>;
    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: DateTime<Utc>,
    ) -> Result<Option<ReviewSession>>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
