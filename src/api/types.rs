//! API request and response types.
//!
//! Numeric field names follow the CSV export columns.

use serde::{Deserialize, Serialize};

use crate::bill::locale::Locale;
use crate::bill::types::{BillCategory, BillResult, RawInput};
use crate::bill::validate::ValidationError;

/// Form fields for `POST /bill`, as text exactly like the form sends them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BillRequest {
    pub previous: String,
    pub current: String,
    /// Blank or absent means the tariff default.
    pub months: String,
    pub institution: bool,
    pub category: String,
    pub exchange_rate: String,
    /// Locale code for messages and labels (`en` when absent or unknown).
    pub lang: Option<String>,
}

impl BillRequest {
    pub fn locale(&self) -> Locale {
        self.lang
            .as_deref()
            .and_then(|code| code.parse().ok())
            .unwrap_or_default()
    }
}

impl From<&BillRequest> for RawInput {
    fn from(req: &BillRequest) -> Self {
        Self {
            previous: req.previous.clone(),
            current: req.current.clone(),
            months: req.months.clone(),
            institution_mode: req.institution,
            category: req.category.clone(),
            exchange_rate: req.exchange_rate.clone(),
        }
    }
}

/// Bill body returned by `POST /bill`.
#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub consumption_kwh: f64,
    pub months: f64,
    pub avg_kwh_per_month: f64,
    pub tier1_kwh: f64,
    pub tier2_kwh: f64,
    pub total_local: f64,
    /// `null` when no usable exchange rate was given.
    pub total_foreign: Option<f64>,
    pub category: BillCategory,
    /// `category` rendered in the requested locale.
    pub category_label: String,
}

impl BillResponse {
    pub fn new(bill: BillResult, locale: Locale) -> Self {
        let category_label = bill.category_label(locale);
        Self {
            consumption_kwh: bill.consumption_kwh,
            months: bill.months,
            avg_kwh_per_month: bill.avg_kwh_per_month,
            tier1_kwh: bill.tier1_kwh,
            tier2_kwh: bill.tier2_kwh,
            total_local: bill.total_local,
            total_foreign: bill.total_foreign,
            category: bill.category,
            category_label,
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error kind.
    pub kind: String,
}

impl ErrorResponse {
    pub fn validation(e: ValidationError, locale: Locale) -> Self {
        Self {
            error: e.message(locale),
            kind: e.kind().to_string(),
        }
    }
}
