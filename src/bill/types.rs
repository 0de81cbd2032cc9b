//! Core bill types: raw form input, validated readings, and the bill result.

use std::fmt;

use serde::Serialize;

use super::locale::{Locale, group_thousands};
use super::scheme::InstitutionCategory;

/// Raw form fields exactly as the user typed them.
///
/// # Examples
///
/// ```
/// use bill_calc::bill::types::RawInput;
///
/// let input = RawInput::default();
/// assert_eq!(input.months, "2");
/// assert_eq!(input.category, "standard");
/// assert!(!input.institution_mode);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    /// Previous meter reading.
    pub previous: String,
    /// Current meter reading.
    pub current: String,
    /// Billing period in months; blank means the tariff default.
    pub months: String,
    /// Bill at the flat institutional rate instead of household tiers.
    pub institution_mode: bool,
    /// Institution category selection (`standard` or `premium`).
    pub category: String,
    /// Local-currency units per foreign-currency unit; blank skips conversion.
    pub exchange_rate: String,
}

impl RawInput {
    /// Empty input with the months field pre-filled.
    pub fn with_default_months(default_months: f64) -> Self {
        Self {
            previous: String::new(),
            current: String::new(),
            months: default_months.to_string(),
            institution_mode: false,
            category: InstitutionCategory::Standard.as_str().to_string(),
            exchange_rate: String::new(),
        }
    }
}

impl Default for RawInput {
    fn default() -> Self {
        Self::with_default_months(2.0)
    }
}

/// Readings and billing period that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    /// Previous meter reading (kWh, >= 0).
    pub previous: f64,
    /// Current meter reading (kWh, >= previous).
    pub current: f64,
    /// Billing period in months (> 0).
    pub months: f64,
}

impl Readings {
    /// Energy consumed between the two readings (kWh).
    pub fn consumption_kwh(&self) -> f64 {
        self.current - self.previous
    }
}

/// Which tariff bracket a bill was priced under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum BillCategory {
    /// Household pricing; `above_threshold` is set when any kWh fell into tier 2.
    Household {
        threshold_kwh: f64,
        above_threshold: bool,
    },
    /// Flat institutional pricing.
    Institution {
        category: InstitutionCategory,
        rate: f64,
    },
}

impl BillCategory {
    /// Display label in the given locale.
    pub fn label(&self, locale: Locale) -> String {
        match (self, locale) {
            (
                BillCategory::Household {
                    threshold_kwh,
                    above_threshold,
                },
                Locale::En,
            ) => {
                let bracket = if *above_threshold { "above" } else { "up to" };
                format!("Household - {bracket} {} kWh", group_thousands(*threshold_kwh))
            }
            (
                BillCategory::Household {
                    threshold_kwh,
                    above_threshold,
                },
                Locale::Ar,
            ) => {
                let bracket = if *above_threshold { "فوق" } else { "حتى" };
                format!("منزلي – {bracket} {} ك.و.س", group_thousands(*threshold_kwh))
            }
            (BillCategory::Institution { category, rate }, Locale::En) => {
                let name = match category {
                    InstitutionCategory::Standard => "Standard",
                    InstitutionCategory::Premium => "Premium",
                };
                format!("Institution - {name} ({} per kWh)", group_thousands(*rate))
            }
            (BillCategory::Institution { category, rate }, Locale::Ar) => {
                let name = match category {
                    InstitutionCategory::Standard => "قياسي",
                    InstitutionCategory::Premium => "مميز",
                };
                format!(
                    "مؤسسة/منشأة – {name} ({} ل.س/ك.و.س)",
                    group_thousands(*rate)
                )
            }
        }
    }
}

/// Outcome of one bill calculation.
///
/// A fresh value is produced by every call; nothing is carried across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillResult {
    /// Energy consumed (kWh).
    pub consumption_kwh: f64,
    /// Billing period in months.
    pub months: f64,
    /// Average consumption per month (kWh).
    pub avg_kwh_per_month: f64,
    /// kWh billed at the tier 1 (or flat) rate.
    pub tier1_kwh: f64,
    /// kWh billed at the tier 2 rate; always zero for institutions.
    pub tier2_kwh: f64,
    /// Total in local currency.
    pub total_local: f64,
    /// Total in foreign currency; `None` when no usable exchange rate was given.
    pub total_foreign: Option<f64>,
    /// Tariff bracket the bill was priced under.
    pub category: BillCategory,
}

impl BillResult {
    pub fn category_label(&self, locale: Locale) -> String {
        self.category.label(locale)
    }
}

impl fmt::Display for BillResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Bill ---")?;
        writeln!(f, "Category:        {}", self.category_label(Locale::En))?;
        writeln!(
            f,
            "Consumption:     {} kWh over {} months ({:.1} kWh/month)",
            self.consumption_kwh, self.months, self.avg_kwh_per_month
        )?;
        writeln!(
            f,
            "Tier split:      {} kWh tier 1, {} kWh tier 2",
            self.tier1_kwh, self.tier2_kwh
        )?;
        writeln!(f, "Total:           {}", group_thousands(self.total_local))?;
        match self.total_foreign {
            Some(v) => write!(f, "Converted total: {v:.2}"),
            None => write!(f, "Converted total: (enter an exchange rate to convert)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household_result(total_foreign: Option<f64>) -> BillResult {
        BillResult {
            consumption_kwh: 700.0,
            months: 2.0,
            avg_kwh_per_month: 350.0,
            tier1_kwh: 300.0,
            tier2_kwh: 400.0,
            total_local: 740000.0,
            total_foreign,
            category: BillCategory::Household {
                threshold_kwh: 300.0,
                above_threshold: true,
            },
        }
    }

    #[test]
    fn default_input_matches_reset_state() {
        let input = RawInput::default();
        assert!(input.previous.is_empty());
        assert!(input.current.is_empty());
        assert!(input.exchange_rate.is_empty());
        assert_eq!(input.months, "2");
    }

    #[test]
    fn fractional_default_months_kept() {
        assert_eq!(RawInput::with_default_months(1.5).months, "1.5");
    }

    #[test]
    fn household_labels() {
        let up_to = BillCategory::Household {
            threshold_kwh: 300.0,
            above_threshold: false,
        };
        assert_eq!(up_to.label(Locale::En), "Household - up to 300 kWh");
        assert!(up_to.label(Locale::Ar).contains("حتى 300"));

        let above = BillCategory::Household {
            threshold_kwh: 300.0,
            above_threshold: true,
        };
        assert_eq!(above.label(Locale::En), "Household - above 300 kWh");
        assert!(above.label(Locale::Ar).contains("فوق 300"));
    }

    #[test]
    fn institution_labels_name_rate() {
        let premium = BillCategory::Institution {
            category: InstitutionCategory::Premium,
            rate: 1800.0,
        };
        assert_eq!(
            premium.label(Locale::En),
            "Institution - Premium (1,800 per kWh)"
        );
        assert!(premium.label(Locale::Ar).contains("1,800"));
    }

    #[test]
    fn display_rounds_total_and_shows_conversion() {
        let s = format!("{}", household_result(Some(51.034482758)));
        assert!(s.contains("740,000"));
        assert!(s.contains("51.03"));
        assert!(s.contains("350.0 kWh/month"));
    }

    #[test]
    fn display_without_rate_hints_at_conversion() {
        let s = format!("{}", household_result(None));
        assert!(s.contains("enter an exchange rate"));
    }
}
