use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Institutional pricing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionCategory {
    #[default]
    Standard,
    Premium,
}

impl InstitutionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            InstitutionCategory::Standard => "standard",
            InstitutionCategory::Premium => "premium",
        }
    }

    /// Parses a category selection, falling back to `Standard` for empty or
    /// unrecognized values. Matching is exact: `"Premium"` is unrecognized.
    ///
    /// A non-empty unrecognized value is logged at warn level.
    pub fn parse_or_standard(s: &str) -> Self {
        if s.is_empty() {
            return InstitutionCategory::Standard;
        }
        s.parse().unwrap_or_else(|e: String| {
            log::warn!("{e}; billing at the standard rate");
            InstitutionCategory::Standard
        })
    }
}

impl FromStr for InstitutionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(InstitutionCategory::Standard),
            "premium" => Ok(InstitutionCategory::Premium),
            other => Err(format!("unknown institution category \"{other}\"")),
        }
    }
}

impl fmt::Display for InstitutionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing scheme applied to a bill.
///
/// Rates and the household threshold live in
/// [`TariffConfig`](crate::config::TariffConfig); the scheme only selects
/// which part of the tariff applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TariffScheme {
    /// Two-tier pricing split at the household threshold.
    Household,
    /// Flat per-kWh pricing for the given category.
    Institution(InstitutionCategory),
}

impl TariffScheme {
    /// Selects the scheme from the institution-mode flag and the raw category
    /// selection. The category is ignored in household mode.
    pub fn select(institution_mode: bool, category: &str) -> Self {
        if institution_mode {
            TariffScheme::Institution(InstitutionCategory::parse_or_standard(category))
        } else {
            TariffScheme::Household
        }
    }
}
