use serde::Serialize;
use std::sync::Arc;

use crate::domain::ports::{CardRepository, Clock};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetDueCardsResponse {
    pub card_ids: Vec<String>,
}

/// Lists the ids of every card due now. Read-only.
pub struct GetDueCards {
    cards: Arc<dyn CardRepository>,
    clock: Arc<dyn Clock>,
}

impl GetDueCards {
    pub fn new(cards: Arc<dyn CardRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { cards, clock }
    }

    pub async fn execute(&self) -> Result<GetDueCardsResponse> {
        let now = self.clock.now();
        let due = self.cards.find_due_cards(now).await?;
        tracing::debug!("Found {} due cards at {}", due.len(), now);

        Ok(GetDueCardsResponse {
            card_ids: due.iter().map(|c| c.id().to_string()).collect(),
        })
    }
}
