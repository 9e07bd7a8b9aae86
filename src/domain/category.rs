//! Leitner box a card currently sits in.
//!
//! Boxes run from 1 to 7. Each box doubles the wait before the next review:
//!
//! | Box | Days between reviews |
//! |-----|----------------------|
//! | 1   | 1                    |
//! | 2   | 2                    |
//! | 3   | 4                    |
//! | 4   | 8                    |
//! | 5   | 16                   |
//! | 6   | 32                   |
//! | 7   | 64 (graduated)       |

use crate::utils::error::{ReviewError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Category(u8);

impl Category {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    const DAYS_BETWEEN_REVIEWS: [u32; 7] = [1, 2, 4, 8, 16, 32, 64];

    /// The box every new card starts in.
    pub fn first() -> Self {
        Category(Self::MIN)
    }

    pub fn new(value: i64) -> Result<Self> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ReviewError::CategoryOutOfRange { value });
        }
        Ok(Category(value as u8))
    }

    /// Builds a category from an untyped number, rejecting fractional values.
    pub fn from_number(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(ReviewError::CategoryNotInteger { value });
        }
        Self::new(value as i64)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Next box up, saturating at the graduated box.
    pub fn next(&self) -> Self {
        if self.0 >= Self::MAX {
            *self
        } else {
            Category(self.0 + 1)
        }
    }

    pub fn is_graduated(&self) -> bool {
        self.0 == Self::MAX
    }

    pub fn days_between_reviews(&self) -> u32 {
        Self::DAYS_BETWEEN_REVIEWS[usize::from(self.0 - 1)]
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::first()
    }
}

impl TryFrom<i64> for Category {
    type Error = ReviewError;

    fn try_from(value: i64) -> Result<Self> {
        Category::new(value)
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments_until_graduated() {
        for n in 1..=7 {
            let category = Category::new(n).unwrap();
            assert_eq!(i64::from(category.next().value()), (n + 1).min(7));
        }
    }

    #[test]
    fn next_is_fixed_point_at_max() {
        let top = Category::new(7).unwrap();
        assert_eq!(top.next(), top);
        assert_eq!(top.next().next(), top);
        assert!(top.is_graduated());
    }

    #[test]
    fn interval_table() {
        let days: Vec<u32> = (1..=7)
            .map(|n| Category::new(n).unwrap().days_between_reviews())
            .collect();
        assert_eq!(days, vec![1, 2, 4, 8, 16, 32, 64]);
    }

    #[test]
    fn rejects_out_of_range() {
        let err = Category::new(0).unwrap_err();
        assert!(err.to_string().contains("between 1 and 7"));
        assert!(Category::new(8).is_err());
        assert!(Category::new(-3).is_err());
    }

    #[test]
    fn rejects_fractional_numbers() {
        assert!(matches!(
            Category::from_number(2.5),
            Err(ReviewError::CategoryNotInteger { .. })
        ));
        assert!(matches!(
            Category::from_number(f64::NAN),
            Err(ReviewError::CategoryNotInteger { .. })
        ));
        assert_eq!(Category::from_number(3.0).unwrap().value(), 3);
        assert!(matches!(
            Category::from_number(9.0),
            Err(ReviewError::CategoryOutOfRange { value: 9 })
        ));
    }

    #[test]
    fn only_box_seven_is_graduated() {
        for n in 1..=6 {
            assert!(!Category::new(n).unwrap().is_graduated());
        }
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Category::new(4).unwrap()).unwrap();
        assert_eq!(json, "4");
        let parsed: Category = serde_json::from_str("5").unwrap();
        assert_eq!(parsed.value(), 5);
        assert!(serde_json::from_str::<Category>("12").is_err());
    }
}
