use crate::utils::error::{ReviewError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of one answer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewResult {
    Correct,
    Incorrect,
    /// "I already knew this": promotes the card without comparing answers.
    ForcedCorrect,
}

impl ReviewResult {
    pub fn correct() -> Self {
        ReviewResult::Correct
    }

    pub fn incorrect() -> Self {
        ReviewResult::Incorrect
    }

    pub fn forced_correct() -> Self {
        ReviewResult::ForcedCorrect
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, ReviewResult::Correct | ReviewResult::ForcedCorrect)
    }

    pub fn is_incorrect(&self) -> bool {
        matches!(self, ReviewResult::Incorrect)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewResult::Correct => "CORRECT",
            ReviewResult::Incorrect => "INCORRECT",
            ReviewResult::ForcedCorrect => "FORCED_CORRECT",
        }
    }
}

impl FromStr for ReviewResult {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "CORRECT" => Ok(ReviewResult::Correct),
            "INCORRECT" => Ok(ReviewResult::Incorrect),
            "FORCED_CORRECT" => Ok(ReviewResult::ForcedCorrect),
            _ => Err(ReviewError::InvalidReviewResult {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReviewResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_correct_counts_as_correct() {
        assert!(ReviewResult::correct().is_correct());
        assert!(ReviewResult::forced_correct().is_correct());
        assert!(!ReviewResult::incorrect().is_correct());
        assert!(ReviewResult::incorrect().is_incorrect());
        assert!(!ReviewResult::forced_correct().is_incorrect());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("correct".parse::<ReviewResult>().unwrap(), ReviewResult::Correct);
        assert_eq!("Incorrect".parse::<ReviewResult>().unwrap(), ReviewResult::Incorrect);
        assert_eq!(
            "forced_correct".parse::<ReviewResult>().unwrap(),
            ReviewResult::ForcedCorrect
        );
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = "maybe".parse::<ReviewResult>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid review result type: maybe");
    }
}
