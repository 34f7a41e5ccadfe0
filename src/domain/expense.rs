use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cents, MAX_AMOUNT_CENTS, ParseCentsError, WeekKey, format_cents, parse_cents};

/// The only date format accepted on input and written to storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid amount '{input}': {reason}, expected a decimal number like 12.50")]
    InvalidAmount {
        input: String,
        reason: ParseCentsError,
    },

    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(String),

    #[error(
        "Amount {0} exceeds the per-expense limit of {limit}",
        limit = format_cents(MAX_AMOUNT_CENTS)
    )]
    AmountTooLarge(String),
}

/// A single spending event.
///
/// Expenses are never edited in place; the ledger only ever appends them.
/// Duplicates (same date, amount and category) are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub date: NaiveDate,
    /// Amount in cents (never negative)
    pub amount_cents: Cents,
    /// Free-form label, compared case-sensitively
    pub category: String,
}

/// The flat (date, amount, category) triple an expense is stored as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub date: String,
    pub amount: String,
    pub category: String,
}

impl Expense {
    /// Create an expense from already-typed values.
    pub fn new(
        date: NaiveDate,
        amount_cents: Cents,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if amount_cents < 0 {
            return Err(ValidationError::NegativeAmount(format_cents(amount_cents)));
        }
        if amount_cents > MAX_AMOUNT_CENTS {
            return Err(ValidationError::AmountTooLarge(format_cents(amount_cents)));
        }
        Ok(Self {
            date,
            amount_cents,
            category: category.into(),
        })
    }

    /// Create an expense from raw user or file input.
    pub fn parse(date: &str, amount: &str, category: &str) -> Result<Self, ValidationError> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
        let amount_cents = parse_cents(amount).map_err(|reason| match reason {
            // Too many digits for i64 is still just too large
            ParseCentsError::Overflow => ValidationError::AmountTooLarge(amount.trim().to_string()),
            reason => ValidationError::InvalidAmount {
                input: amount.to_string(),
                reason,
            },
        })?;
        if amount_cents < 0 {
            return Err(ValidationError::NegativeAmount(amount.trim().to_string()));
        }
        if amount_cents > MAX_AMOUNT_CENTS {
            return Err(ValidationError::AmountTooLarge(amount.trim().to_string()));
        }
        Self::new(date, amount_cents, category)
    }

    pub fn from_row(row: &ExpenseRow) -> Result<Self, ValidationError> {
        Self::parse(&row.date, &row.amount, &row.category)
    }

    /// Canonical serialization used for storage.
    pub fn to_row(&self) -> ExpenseRow {
        ExpenseRow {
            date: self.date.format(DATE_FORMAT).to_string(),
            amount: format_cents(self.amount_cents),
            category: self.category.clone(),
        }
    }

    pub fn week(&self) -> WeekKey {
        WeekKey::of(self.date)
    }
}
