use crate::utils::error::{ReviewError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Identity used when no authenticated user is known.
    pub const ANONYMOUS: &'static str = "anonymous";

    pub fn new(id: &str) -> Result<Self> {
        validate_non_empty_string("user_id", id, "UserId cannot be empty")?;
        Ok(UserId(id.to_string()))
    }

    pub fn anonymous() -> Self {
        UserId(Self::ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ReviewError;

    fn try_from(value: String) -> Result<Self> {
        UserId::new(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
