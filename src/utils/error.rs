use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("Category must be between 1 and 7, got {value}")]
    CategoryOutOfRange { value: i64 },

    #[error("Category must be an integer, got {value}")]
    CategoryNotInteger { value: f64 },

    #[error("Invalid review result type: {input}")]
    InvalidReviewResult { input: String },

    #[error("Card not found: {card_id}")]
    CardNotFound { card_id: String },

    #[error("Session not found for user {user_id} on {date}")]
    SessionNotFound { user_id: String, date: String },

    #[error("Session {session_id} is already completed")]
    SessionCompleted { session_id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Response class an adapter maps an error onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Infrastructure,
}

impl ReviewError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReviewError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::ValidationError { .. }
            | ReviewError::CategoryOutOfRange { .. }
            | ReviewError::CategoryNotInteger { .. }
            | ReviewError::InvalidReviewResult { .. }
            | ReviewError::TomlError(_) => ErrorKind::Validation,
            ReviewError::CardNotFound { .. } | ReviewError::SessionNotFound { .. } => {
                ErrorKind::NotFound
            }
            ReviewError::SessionCompleted { .. } => ErrorKind::Conflict,
            ReviewError::IoError(_) => ErrorKind::Infrastructure,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation => format!("Invalid input: {}", self),
            ErrorKind::NotFound => format!("Not found: {}", self),
            ErrorKind::Conflict => format!("Not allowed: {}", self),
            ErrorKind::Infrastructure => format!("Internal failure: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_identifier() {
        let err = ReviewError::CardNotFound {
            card_id: "c-42".to_string(),
        };
        assert_eq!(err.to_string(), "Card not found: c-42");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ReviewError::CategoryOutOfRange { value: 9 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ReviewError::SessionCompleted {
                session_id: "u1-20240110".to_string()
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            ReviewError::from(std::io::Error::other("disk unavailable")).kind(),
            ErrorKind::Infrastructure
        );
    }

    #[test]
    fn test_user_friendly_message() {
        let err = ReviewError::validation("tag", "Tag name cannot be empty");
        assert_eq!(
            err.user_friendly_message(),
            "Invalid input: Tag name cannot be empty"
        );
    }
}
