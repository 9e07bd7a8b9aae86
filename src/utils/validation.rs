use crate::utils::error::{ReviewError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Rejects empty or whitespace-only values, reporting `message` verbatim.
pub fn validate_non_empty_string(field_name: &str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReviewError::validation(field_name, message));
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(ReviewError::validation(
                field_name,
                format!("Duplicate {}: {}", field_name, value),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("question", "What?", "Question cannot be empty").is_ok());
        let err = validate_non_empty_string("question", "   ", "Question cannot be empty")
            .unwrap_err();
        assert_eq!(err.to_string(), "Question cannot be empty");
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("card id", ["c1", "c2"]).is_ok());
        let err = validate_unique("card id", ["c1", "c2", "c1"]).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate card id: c1");
    }
}
