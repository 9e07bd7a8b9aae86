use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use super::load_card;
use crate::domain::ports::CardRepository;
use crate::domain::Tag;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddTagRequest {
    pub card_id: String,
    pub tag_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddTagResponse {
    pub card_id: String,
    pub tags: Vec<String>,
}

pub struct AddTag {
    cards: Arc<dyn CardRepository>,
}

impl AddTag {
    pub fn new(cards: Arc<dyn CardRepository>) -> Self {
        Self { cards }
    }

    pub async fn execute(&self, request: AddTagRequest) -> Result<AddTagResponse> {
        let mut card = load_card(self.cards.as_ref(), &request.card_id).await?;
        let tag = Tag::new(&request.tag_name)?;

        card.add_tag(tag);
        self.cards.save(&card).await?;

        Ok(AddTagResponse {
            card_id: card.id().to_string(),
            tags: card.tag_names(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListCardsByTagsRequest {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCardsByTagsResponse {
    pub card_ids: Vec<String>,
}

/// Cards carrying any of the requested tags, each listed once in first-seen order.
pub struct ListCardsByTags {
    cards: Arc<dyn CardRepository>,
}

impl ListCardsByTags {
    pub fn new(cards: Arc<dyn CardRepository>) -> Self {
        Self { cards }
    }

    pub async fn execute(&self, request: ListCardsByTagsRequest) -> Result<ListCardsByTagsResponse> {
        let tags = request
            .tags
            .iter()
            .map(|name| Tag::new(name))
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        let mut card_ids = Vec::new();
        for tag in &tags {
            for card in self.cards.find_by_tag(tag).await? {
                if seen.insert(card.id().to_string()) {
                    card_ids.push(card.id().to_string());
                }
            }
        }

        Ok(ListCardsByTagsResponse { card_ids })
    }
}
