use chrono::{DateTime, TimeZone, Utc};
use leitner_review::app::{
    AddTagRequest, AnswerCardRequest, CreateCardRequest, DeleteCardRequest,
    ForceValidateCardRequest, GetCardRequest, ListCardsByTagsRequest, ListCardsRequest,
    StartDailyQuizRequest,
};
use leitner_review::{ErrorKind, FixedClock, ReviewEngine, ReviewError};
use std::sync::Arc;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn engine_at(instant: DateTime<Utc>) -> (ReviewEngine, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(instant));
    (ReviewEngine::in_memory(vec![], clock.clone()), clock)
}

async fn create(engine: &ReviewEngine, id: &str, answer: &str, tags: &[&str]) -> anyhow::Result<()> {
    engine
        .create_card(CreateCardRequest {
            card_id: id.to_string(),
            question: format!("Question {}", id),
            answer: answer.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_start_daily_quiz_is_idempotent_within_a_day() -> anyhow::Result<()> {
    let (engine, clock) = engine_at(at(2024, 1, 10, 8));
    create(&engine, "c1", "A", &[]).await?;
    create(&engine, "c2", "B", &[]).await?;

    let request = StartDailyQuizRequest {
        user_id: "u1".to_string(),
    };
    let first = engine.start_daily_quiz(request.clone()).await?;

    // cards added later the same day do not join the session
    create(&engine, "c3", "C", &[]).await?;
    clock.set(at(2024, 1, 10, 21));
    let second = engine.start_daily_quiz(request).await?;

    assert_eq!(first.session_id, "u1-20240110");
    assert_eq!(first, second);
    assert_eq!(second.card_ids, vec!["c1", "c2"]);
    Ok(())
}

#[tokio::test]
async fn test_answer_comparison_is_normalized() -> anyhow::Result<()> {
    let (engine, _clock) = engine_at(at(2024, 1, 1, 12));
    create(&engine, "c1", "Paris", &[]).await?;

    let answered = engine
        .answer_card(AnswerCardRequest {
            card_id: "c1".to_string(),
            user_answer: "  PARIS ".to_string(),
        })
        .await?;

    assert!(answered.is_correct);
    assert_eq!(answered.new_category, 2);
    assert_eq!(answered.correct_answer, "Paris");
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_progression() -> anyhow::Result<()> {
    let (engine, clock) = engine_at(at(2024, 1, 1, 12));
    create(&engine, "c1", "4", &[]).await?;
    let answer = |text: &str| AnswerCardRequest {
        card_id: "c1".to_string(),
        user_answer: text.to_string(),
    };

    let first = engine.answer_card(answer("4")).await?;
    assert_eq!(first.new_category, 2);
    let card = engine
        .get_card(GetCardRequest {
            card_id: "c1".to_string(),
        })
        .await?;
    assert_eq!(card.last_review_date, Some(at(2024, 1, 1, 12)));
    assert_eq!(card.next_review_date, Some(at(2024, 1, 3, 12)));

    clock.set(at(2024, 1, 2, 12));
    assert!(engine.due_cards().await?.card_ids.is_empty());

    clock.set(at(2024, 1, 3, 12));
    assert_eq!(engine.due_cards().await?.card_ids, vec!["c1"]);
    let second = engine.answer_card(answer("4")).await?;
    assert_eq!(second.new_category, 3);

    clock.set(at(2024, 1, 20, 12));
    let third = engine.answer_card(answer("5")).await?;
    assert!(!third.is_correct);
    assert_eq!(third.new_category, 1);
    Ok(())
}

#[tokio::test]
async fn test_force_validate_promotes_without_answer() -> anyhow::Result<()> {
    let (engine, _clock) = engine_at(at(2024, 1, 1, 12));
    create(&engine, "c1", "4", &[]).await?;

    let forced = engine
        .force_validate_card(ForceValidateCardRequest {
            card_id: "c1".to_string(),
        })
        .await?;
    assert_eq!(forced.new_category, 2);
    assert_eq!(forced.correct_answer, "4");
    assert!(engine.due_cards().await?.card_ids.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unknown_card_is_not_found() {
    let (engine, _clock) = engine_at(at(2024, 1, 1, 12));

    let err = engine
        .answer_card(AnswerCardRequest {
            card_id: "missing".to_string(),
            user_answer: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Card not found: missing");

    let err = engine
        .force_validate_card(ForceValidateCardRequest {
            card_id: "missing".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::CardNotFound { .. }));
}

#[tokio::test]
async fn test_list_cards_by_tags_is_a_union() -> anyhow::Result<()> {
    let (engine, _clock) = engine_at(at(2024, 1, 1, 12));
    create(&engine, "c1", "A", &["math"]).await?;
    create(&engine, "c2", "A", &["history"]).await?;
    create(&engine, "c3", "A", &["math", "history"]).await?;
    create(&engine, "c4", "A", &["science"]).await?;

    let found = engine
        .list_cards_by_tags(ListCardsByTagsRequest {
            tags: vec!["math".to_string(), "history".to_string()],
        })
        .await?;
    assert_eq!(found.card_ids, vec!["c1", "c3", "c2"]);
    Ok(())
}

#[tokio::test]
async fn test_add_tag_deduplicates() -> anyhow::Result<()> {
    let (engine, _clock) = engine_at(at(2024, 1, 1, 12));
    create(&engine, "c1", "A", &["math"]).await?;

    let tagged = engine
        .add_tag(AddTagRequest {
            card_id: "c1".to_string(),
            tag_name: " math ".to_string(),
        })
        .await?;
    assert_eq!(tagged.tags, vec!["math"]);

    let tagged = engine
        .add_tag(AddTagRequest {
            card_id: "c1".to_string(),
            tag_name: "easy".to_string(),
        })
        .await?;
    assert_eq!(tagged.tags, vec!["math", "easy"]);

    let err = engine
        .add_tag(AddTagRequest {
            card_id: "c1".to_string(),
            tag_name: "  ".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    Ok(())
}

#[tokio::test]
async fn test_list_cards_filters_by_tag_and_category() -> anyhow::Result<()> {
    let (engine, _clock) = engine_at(at(2024, 1, 1, 12));
    create(&engine, "c1", "A", &["math"]).await?;
    create(&engine, "c2", "A", &["math"]).await?;
    create(&engine, "c3", "A", &["geo"]).await?;
    engine
        .force_validate_card(ForceValidateCardRequest {
            card_id: "c2".to_string(),
        })
        .await?;

    let all = engine.list_cards(ListCardsRequest::default()).await?;
    assert_eq!(all.total, 3);

    let math_box_one = engine
        .list_cards(ListCardsRequest {
            tag: Some("math".to_string()),
            category: Some(1),
        })
        .await?;
    let ids: Vec<&str> = math_box_one.cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1"]);

    let err = engine
        .list_cards(ListCardsRequest {
            tag: None,
            category: Some(9),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::CategoryOutOfRange { value: 9 }));
    Ok(())
}

#[tokio::test]
async fn test_create_and_delete_card() -> anyhow::Result<()> {
    let (engine, _clock) = engine_at(at(2024, 1, 1, 12));

    let created = engine
        .create_card(CreateCardRequest {
            card_id: " c1 ".to_string(),
            question: "Q".to_string(),
            answer: "A".to_string(),
            tags: vec![],
        })
        .await?;
    assert_eq!(created.card_id, "c1");
    assert_eq!(created.category, 1);

    let err = engine
        .create_card(CreateCardRequest {
            card_id: "c2".to_string(),
            question: " ".to_string(),
            answer: "A".to_string(),
            tags: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Question cannot be empty");

    engine
        .delete_card(DeleteCardRequest {
            card_id: "c1".to_string(),
        })
        .await?;
    let err = engine
        .delete_card(DeleteCardRequest {
            card_id: "c1".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}
