//! Expense model
//!
//! An expense is a single recorded spending event. Construction enforces the
//! structural invariants (finite non-negative amount, non-blank description);
//! whether the category id actually exists is checked by the input validators,
//! not here.
//!
//! The persisted form is a flat JSON object with Portuguese keys:
//!
//! ```json
//! { "id": 1, "valor": 12.5, "descricao": "Coffee", "categoria": 1, "data": "2025-01-10T08:30:00" }
//! ```

use chrono::{Local, NaiveDateTime, Timelike};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

use super::ids::ExpenseId;

/// Format used to persist timestamps (local time, no timezone)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const KEY_ID: &str = "id";
pub const KEY_AMOUNT: &str = "valor";
pub const KEY_DESCRIPTION: &str = "descricao";
pub const KEY_CATEGORY: &str = "categoria";
pub const KEY_TIMESTAMP: &str = "data";

const REQUIRED_KEYS: [&str; 3] = [KEY_AMOUNT, KEY_DESCRIPTION, KEY_CATEGORY];

/// Largest accepted amount
///
/// Its value in cents stays exact in an `f64` and fits an `i64`, so rounding
/// to cents and persisting never produce `inf` or `null`.
pub const MAX_AMOUNT: f64 = 1e13;

/// Round a monetary value to two decimal places
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A single recorded expense
#[derive(Debug, Clone)]
pub struct Expense {
    id: Option<ExpenseId>,
    amount: f64,
    description: String,
    category: i64,
    timestamp: NaiveDateTime,
}

impl Expense {
    /// Create a new expense timestamped with the current local time
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        category: i64,
    ) -> Result<Self, ExpenseValidationError> {
        Self::with_timestamp(amount, description, category, Local::now().naive_local())
    }

    /// Create a new expense at a specific point in time
    ///
    /// The timestamp is truncated to whole seconds, which is the precision
    /// it is persisted with.
    pub fn with_timestamp(
        amount: f64,
        description: impl Into<String>,
        category: i64,
        timestamp: NaiveDateTime,
    ) -> Result<Self, ExpenseValidationError> {
        if !amount.is_finite() {
            return Err(ExpenseValidationError::InvalidAmount(amount.to_string()));
        }
        if amount < 0.0 {
            return Err(ExpenseValidationError::NegativeAmount(amount));
        }
        if amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(amount));
        }

        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(ExpenseValidationError::BlankDescription);
        }

        Ok(Self {
            id: None,
            amount,
            description,
            category,
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
        })
    }

    /// Attach an id to this expense
    pub fn with_id(mut self, id: ExpenseId) -> Self {
        self.id = Some(id);
        self
    }

    /// Parse a persisted timestamp string
    pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ExpenseValidationError> {
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
            .map_err(|_| ExpenseValidationError::InvalidTimestamp(raw.to_string()))
    }

    pub fn id(&self) -> Option<ExpenseId> {
        self.id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> i64 {
        self.category
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Encode into the flat persisted record
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(
            KEY_ID.to_string(),
            self.id.map_or(Value::Null, |id| json!(id.value())),
        );
        record.insert(KEY_AMOUNT.to_string(), json!(round_to_cents(self.amount)));
        record.insert(KEY_DESCRIPTION.to_string(), json!(self.description));
        record.insert(KEY_CATEGORY.to_string(), json!(self.category));
        record.insert(
            KEY_TIMESTAMP.to_string(),
            json!(self.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        );
        record
    }

    /// Decode a persisted record
    ///
    /// `valor`, `descricao` and `categoria` are required; `id` and `data` are
    /// optional (`null` counts as absent) and default to no id and the
    /// current time. Numeric fields are coerced from strings the same way
    /// user input is.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, ExpenseValidationError> {
        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !record.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ExpenseValidationError::MissingFields(missing));
        }

        let amount = decode_amount(&record[KEY_AMOUNT])?;
        let description = match &record[KEY_DESCRIPTION] {
            Value::String(s) => s.clone(),
            other => return Err(ExpenseValidationError::DescriptionNotText(other.to_string())),
        };
        let category = decode_category(&record[KEY_CATEGORY])?;

        let timestamp = match record.get(KEY_TIMESTAMP) {
            None | Some(Value::Null) => Local::now().naive_local(),
            Some(Value::String(s)) => Self::parse_timestamp(s)?,
            Some(other) => {
                return Err(ExpenseValidationError::InvalidTimestamp(other.to_string()))
            }
        };

        let expense = Self::with_timestamp(amount, description, category, timestamp)?;

        match record.get(KEY_ID) {
            None | Some(Value::Null) => Ok(expense),
            Some(value) => value
                .as_u64()
                .map(|id| expense.with_id(ExpenseId::new(id)))
                .ok_or_else(|| ExpenseValidationError::InvalidId(value.to_string())),
        }
    }

    /// Decode an arbitrary JSON value, which must be an object
    pub fn from_json(value: &Value) -> Result<Self, ExpenseValidationError> {
        match value {
            Value::Object(record) => Self::from_record(record),
            other => Err(ExpenseValidationError::NotARecord(other.to_string())),
        }
    }

    /// Amount in whole cents, the precision amounts are compared and stored at
    pub fn cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }
}

/// Sum of the amounts in cents
///
/// Widened to `i128` so no realistic number of bounded amounts can overflow.
pub fn sum_cents(expenses: &[Expense]) -> i128 {
    expenses.iter().map(|e| i128::from(e.cents())).sum()
}

fn decode_amount(value: &Value) -> Result<f64, ExpenseValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ExpenseValidationError::InvalidAmount(value.to_string()))
}

fn decode_category(value: &Value) -> Result<i64, ExpenseValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ExpenseValidationError::InvalidCategory(value.to_string()))
}

// Amounts compare at cent precision, matching what survives a save/load.
impl PartialEq for Expense {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.cents() == other.cents()
            && self.description == other.description
            && self.category == other.category
            && self.timestamp == other.timestamp
    }
}

impl Serialize for Expense {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expense {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_record(&record).map_err(de::Error::custom)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    InvalidAmount(String),
    NegativeAmount(f64),
    AmountTooLarge(f64),
    BlankDescription,
    DescriptionNotText(String),
    InvalidCategory(String),
    UnknownCategory(i64),
    InvalidTimestamp(String),
    InvalidId(String),
    MissingId,
    MissingFields(Vec<&'static str>),
    NotARecord(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(raw) => {
                write!(f, "Invalid amount '{}': not a number", raw)
            }
            Self::NegativeAmount(value) => {
                write!(f, "Invalid amount {}: negative not allowed", value)
            }
            Self::AmountTooLarge(value) => write!(
                f,
                "Invalid amount {}: out of range (maximum {})",
                value, MAX_AMOUNT
            ),
            Self::BlankDescription => write!(f, "Description cannot be empty"),
            Self::DescriptionNotText(raw) => {
                write!(f, "Invalid description {}: must be text", raw)
            }
            Self::InvalidCategory(raw) => {
                write!(f, "Invalid category '{}': must be an integer", raw)
            }
            Self::UnknownCategory(id) => {
                let valid: Vec<String> = super::Category::valid_ids()
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
                write!(
                    f,
                    "Unknown category {}: valid ids are {}",
                    id,
                    valid.join(", ")
                )
            }
            Self::InvalidTimestamp(raw) => write!(
                f,
                "Invalid timestamp '{}': expected format YYYY-MM-DDTHH:MM:SS",
                raw
            ),
            Self::InvalidId(raw) => {
                write!(f, "Invalid id '{}': must be a non-negative integer", raw)
            }
            Self::MissingId => write!(f, "An id is required"),
            Self::MissingFields(fields) => {
                write!(f, "Missing fields for expense: {}", fields.join(", "))
            }
            Self::NotARecord(raw) => write!(f, "Expected an expense object, got {}", raw),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
