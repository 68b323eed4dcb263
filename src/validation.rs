//! Input validation
//!
//! Turns raw user-supplied text into typed values before an [`Expense`] is
//! built. These functions hold no state and can be called in any order.
//!
//! [`Expense`]: crate::models::Expense

use crate::models::{Category, ExpenseId, ExpenseValidationError, MAX_AMOUNT};

/// Parse an amount; zero is allowed, negatives and anything above
/// [`MAX_AMOUNT`] are not
pub fn validate_amount(raw: &str) -> Result<f64, ExpenseValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ExpenseValidationError::InvalidAmount(raw.to_string()))?;

    if !value.is_finite() {
        return Err(ExpenseValidationError::InvalidAmount(raw.to_string()));
    }
    if value < 0.0 {
        return Err(ExpenseValidationError::NegativeAmount(value));
    }
    if value > MAX_AMOUNT {
        return Err(ExpenseValidationError::AmountTooLarge(value));
    }

    Ok(value)
}

/// Trim a description and reject it if nothing is left
pub fn validate_description(raw: &str) -> Result<String, ExpenseValidationError> {
    let description = raw.trim();
    if description.is_empty() {
        return Err(ExpenseValidationError::BlankDescription);
    }
    Ok(description.to_string())
}

/// Parse a category id and check it names one of the defined categories
pub fn validate_category(raw: &str) -> Result<i64, ExpenseValidationError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ExpenseValidationError::InvalidCategory(raw.to_string()))?;

    match Category::from_id(id) {
        Some(category) => Ok(category.id()),
        None => Err(ExpenseValidationError::UnknownCategory(id)),
    }
}

/// Parse the id typed into a delete request
pub fn validate_id(raw: &str) -> Result<ExpenseId, ExpenseValidationError> {
    if raw.trim().is_empty() {
        return Err(ExpenseValidationError::MissingId);
    }
    raw.parse()
        .map_err(|_| ExpenseValidationError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("0").unwrap(), 0.0);
        assert_eq!(validate_amount("12.5").unwrap(), 12.5);
        assert_eq!(validate_amount(" 7 ").unwrap(), 7.0);

        assert!(matches!(
            validate_amount("abc"),
            Err(ExpenseValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(""),
            Err(ExpenseValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount("inf"),
            Err(ExpenseValidationError::InvalidAmount(_))
        ));
        assert_eq!(
            validate_amount("-5").unwrap_err(),
            ExpenseValidationError::NegativeAmount(-5.0)
        );
    }

    #[test]
    fn test_validate_amount_upper_bound() {
        assert_eq!(validate_amount("10000000000000").unwrap(), MAX_AMOUNT);
        assert_eq!(
            validate_amount("1e307").unwrap_err(),
            ExpenseValidationError::AmountTooLarge(1e307)
        );
        assert!(validate_amount("9e16")
            .unwrap_err()
            .to_string()
            .contains("out of range"));
    }

    #[test]
    fn test_amount_messages_are_distinct() {
        let not_number = validate_amount("abc").unwrap_err().to_string();
        let negative = validate_amount("-5").unwrap_err().to_string();
        assert!(not_number.contains("not a number"));
        assert!(negative.contains("negative not allowed"));
    }

    #[test]
    fn test_validate_description() {
        assert_eq!(validate_description("  Coffee  ").unwrap(), "Coffee");
        assert_eq!(
            validate_description("").unwrap_err(),
            ExpenseValidationError::BlankDescription
        );
        assert_eq!(
            validate_description("   ").unwrap_err(),
            ExpenseValidationError::BlankDescription
        );
    }

    #[test]
    fn test_validate_category() {
        assert_eq!(validate_category("3").unwrap(), 3);
        assert_eq!(validate_category(" 1").unwrap(), 1);

        let err = validate_category("9").unwrap_err();
        assert_eq!(err, ExpenseValidationError::UnknownCategory(9));
        assert!(err.to_string().contains("1, 2, 3, 4, 5"));

        assert!(matches!(
            validate_category("abc"),
            Err(ExpenseValidationError::InvalidCategory(_))
        ));
        assert!(matches!(
            validate_category("2.5"),
            Err(ExpenseValidationError::InvalidCategory(_))
        ));
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id("4").unwrap(), ExpenseId::new(4));
        assert_eq!(
            validate_id("  ").unwrap_err(),
            ExpenseValidationError::MissingId
        );
        assert!(matches!(
            validate_id("x1"),
            Err(ExpenseValidationError::InvalidId(_))
        ));
    }

    #[test]
    fn test_validators_are_repeatable() {
        for _ in 0..3 {
            assert_eq!(validate_amount("1.25").unwrap(), 1.25);
            assert_eq!(validate_category("5").unwrap(), 5);
        }
    }
}
