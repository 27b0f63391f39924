//! Row limit for list queries

use serde::Deserialize;

use super::ValidationError;

/// Maximum rows per list query
const MAX_LIMIT: u32 = 100;

/// Rows returned when the caller gives no limit
pub const DEFAULT_LIMIT: u32 = 10;

/// Validated `LIMIT` value, 0..=100. Zero is a legal empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u32")]
pub struct Limit(u32);

impl Limit {
    /// Create a limit, rejecting values above 100.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::models::Limit;
    ///
    /// assert_eq!(Limit::new(25).unwrap().get(), 25);
    /// assert!(Limit::new(500).is_err());
    /// ```
    pub fn new(limit: u32) -> Result<Self, ValidationError> {
        if limit > MAX_LIMIT {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                min: 0.0,
                max: f64::from(MAX_LIMIT),
            });
        }
        Ok(Self(limit))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Value to bind into `LIMIT $n` (Postgres expects BIGINT)
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl TryFrom<u32> for Limit {
    type Error = ValidationError;

    fn try_from(limit: u32) -> Result<Self, Self::Error> {
        Self::new(limit)
    }
}
