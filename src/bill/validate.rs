//! Raw text input validation.
//!
//! Checks run in a fixed order and stop at the first failure, so a caller
//! only ever sees one error per submission.

use thiserror::Error;

use super::locale::Locale;
use super::types::Readings;

/// User-input validation failure.
///
/// `Display` renders the English message; use [`ValidationError::message`]
/// for other locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A meter reading is not a finite number.
    #[error("Please enter valid numbers for the meter readings.")]
    InvalidNumber,
    /// A meter reading is negative.
    #[error("Meter readings cannot be negative.")]
    NegativeReading,
    /// The current reading is lower than the previous one.
    #[error("The current reading cannot be lower than the previous reading.")]
    ReadingOrder,
    /// The billing period is not a positive finite number.
    #[error("The billing period (in months) must be a positive number.")]
    InvalidPeriod,
}

impl ValidationError {
    /// Stable machine-readable identifier.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidNumber => "invalid_number",
            ValidationError::NegativeReading => "negative_reading",
            ValidationError::ReadingOrder => "reading_order",
            ValidationError::InvalidPeriod => "invalid_period",
        }
    }

    /// Human-readable message in the given locale.
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::Ar => match self {
                ValidationError::InvalidNumber => "يرجى إدخال أرقام صحيحة لقراءات العداد.",
                ValidationError::NegativeReading => "لا يمكن أن تكون القراءات سالبة.",
                ValidationError::ReadingOrder => "لا يجوز أن تكون القراءة الحالية أقل من السابقة.",
                ValidationError::InvalidPeriod => "مدة الفاتورة (بالأشهر) يجب أن تكون رقماً موجباً.",
            }
            .to_string(),
        }
    }
}

/// Parses user text as a finite real number.
///
/// Surrounding whitespace is ignored. Blank text, `inf`, and `NaN` yield `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a meter reading. A blank field counts as a zero reading.
fn parse_reading(text: &str) -> Option<f64> {
    if text.trim().is_empty() {
        Some(0.0)
    } else {
        parse_number(text)
    }
}

/// Parses an exchange rate. Anything other than a finite number `> 0`
/// means conversion was not requested.
pub fn parse_exchange_rate(text: &str) -> Option<f64> {
    parse_number(text).filter(|&rate| rate > 0.0)
}

/// Validates raw readings and billing period.
///
/// Blank readings count as zero. An empty `months` field takes
/// `default_months`; whitespace-only months is an invalid period.
///
/// # Errors
///
/// Returns the first violated rule, checked in this order:
/// [`InvalidNumber`](ValidationError::InvalidNumber),
/// [`NegativeReading`](ValidationError::NegativeReading),
/// [`ReadingOrder`](ValidationError::ReadingOrder),
/// [`InvalidPeriod`](ValidationError::InvalidPeriod).
pub fn validate(
    previous: &str,
    current: &str,
    months: &str,
    default_months: f64,
) -> Result<Readings, ValidationError> {
    let (Some(previous), Some(current)) = (parse_reading(previous), parse_reading(current)) else {
        return Err(ValidationError::InvalidNumber);
    };
    if previous < 0.0 || current < 0.0 {
        return Err(ValidationError::NegativeReading);
    }
    if current < previous {
        return Err(ValidationError::ReadingOrder);
    }

    let months = if months.is_empty() {
        Some(default_months)
    } else {
        parse_number(months)
    };
    match months {
        Some(m) if m.is_finite() && m > 0.0 => Ok(Readings {
            previous,
            current,
            months: m,
        }),
        _ => Err(ValidationError::InvalidPeriod),
    }
}
