//! Strongly-typed expense identifier
//!
//! Expense ids are small sequential integers handed out by the store, so the
//! wrapper is over `u64` rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a persisted expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    /// The id given to the first expense of an empty collection
    pub const FIRST: ExpenseId = ExpenseId(1);

    /// Wrap a raw id value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying integer
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one, or `None` once `u64` is exhausted
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ExpenseId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(ExpenseId::FIRST.next(), Some(ExpenseId::new(2)));
        assert_eq!(ExpenseId::new(u64::MAX).next(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(" 7 ".parse::<ExpenseId>().unwrap(), ExpenseId::new(7));
        assert!("-1".parse::<ExpenseId>().is_err());
        assert!("abc".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&ExpenseId::new(12)).unwrap();
        assert_eq!(json, "12");
    }
}
