pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command, LogFormat, OutputFormat};

pub use crate::adapters::{FixedClock, InMemoryCardRepository, InMemorySessionRepository, SystemClock};
pub use crate::config::DeckConfig;
pub use crate::core::ReviewEngine;
pub use crate::domain::{Card, Category, ReviewResult, ReviewSession, SessionState, SessionStats, Tag, UserId};
pub use crate::utils::error::{ErrorKind, ReviewError, Result};
