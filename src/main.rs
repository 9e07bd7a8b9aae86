use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::io;
use std::sync::Arc;

use leitner_review::app::{
    AnswerCardRequest, ForceValidateCardRequest, GetCardRequest, GetDailyQuizStatusRequest,
    ListCardsByTagsRequest, ListCardsRequest,
};
use leitner_review::domain::ports::Clock;
use leitner_review::utils::logger;
use leitner_review::{
    Category, CliConfig, Command, DeckConfig, ErrorKind, FixedClock, LogFormat, OutputFormat, ReviewEngine,
    ReviewError, SystemClock, UserId,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        let review_error = e.downcast_ref::<ReviewError>();
        let message = match review_error {
            Some(err) if e.chain().count() == 1 => err.user_friendly_message(),
            _ => format!("{:#}", e),
        };
        let exit_code = review_error.map(|err| exit_code(err.kind())).unwrap_or(1);

        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {}", message);
        std::process::exit(exit_code);
    }
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Validation => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Conflict => 4,
        ErrorKind::Infrastructure => 1,
    }
}

async fn run(config: CliConfig) -> anyhow::Result<()> {
    let deck = DeckConfig::from_file(&config.deck)
        .with_context(|| format!("failed to load deck {}", config.deck.display()))?;

    let clock: Arc<dyn Clock> = match &config.now {
        Some(instant) => {
            let instant = DateTime::parse_from_rfc3339(instant)
                .with_context(|| format!("invalid --now value {:?}", instant))?;
            Arc::new(FixedClock::new(instant.with_timezone(&Utc)))
        }
        None => Arc::new(SystemClock),
    };

    let user = config
        .user
        .clone()
        .or_else(|| deck.deck.default_user.clone())
        .unwrap_or_else(|| UserId::ANONYMOUS.to_string());

    tracing::info!("Loaded deck '{}' with {} cards", deck.deck.name, deck.cards.len());
    let cards = deck.into_cards(clock.now())?;
    let engine = ReviewEngine::in_memory(cards, clock);
    let format = config.format;

    match config.command {
        Command::Due => {
            let due = engine.due_cards().await?;
            emit(format, &due, || {
                if due.card_ids.is_empty() {
                    "No cards due.".to_string()
                } else {
                    due.card_ids.join("\n")
                }
            })?;
        }
        Command::Cards { tag, category } => {
            let listed = engine.list_cards(ListCardsRequest { tag, category }).await?;
            emit(format, &listed, || {
                let mut lines: Vec<String> = listed
                    .cards
                    .iter()
                    .map(|c| format!("{}\t[box {}]\t{}", c.id, c.category, c.question))
                    .collect();
                lines.push(format!("{} cards", listed.total));
                lines.join("\n")
            })?;
        }
        Command::Show { card_id } => {
            let card = engine.get_card(GetCardRequest { card_id }).await?;
            emit(format, &card, || {
                let next_review = match card.next_review_date {
                    Some(date) => date.to_rfc3339(),
                    None if card.category == Category::MAX => "graduated".to_string(),
                    None => "now".to_string(),
                };
                format!(
                    "{}\nQ: {}\nA: {}\nBox: {}\nTags: {}\nNext review: {}",
                    card.id,
                    card.question,
                    card.answer,
                    card.category,
                    card.tags.join(", "),
                    next_review
                )
            })?;
        }
        Command::Tags { tags } => {
            let found = engine
                .list_cards_by_tags(ListCardsByTagsRequest { tags })
                .await?;
            emit(format, &found, || found.card_ids.join("\n"))?;
        }
        Command::Status => {
            let status = engine
                .quiz_status(GetDailyQuizStatusRequest { user_id: user })
                .await?;
            emit(format, &status, || {
                let mut text = format!(
                    "Quiz available: {}\nCards due: {}",
                    if status.available { "yes" } else { "no" },
                    status.cards_count
                );
                if let Some(date) = status.last_quiz_date {
                    text.push_str(&format!("\nLast quiz: {}", date));
                }
                text
            })?;
        }
        Command::Quiz => {
            let stdin = io::stdin();
            match format {
                OutputFormat::Text => {
                    engine.run_quiz(&user, stdin.lock(), io::stdout()).await?;
                }
                OutputFormat::Json => {
                    let summary = engine.run_quiz(&user, stdin.lock(), io::stderr()).await?;
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
            }
        }
        Command::Answer { card_id, answer } => {
            let answered = engine
                .answer_card(AnswerCardRequest {
                    card_id,
                    user_answer: answer,
                })
                .await?;
            emit(format, &answered, || {
                if answered.is_correct {
                    format!("Correct! Box {}.", answered.new_category)
                } else {
                    format!(
                        "Incorrect, expected: {}. Back to box {}.",
                        answered.correct_answer, answered.new_category
                    )
                }
            })?;
        }
        Command::Force { card_id } => {
            let forced = engine
                .force_validate_card(ForceValidateCardRequest { card_id })
                .await?;
            emit(format, &forced, || {
                format!("Validated {}. Box {}.", forced.card_id, forced.new_category)
            })?;
        }
    }

    Ok(())
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
