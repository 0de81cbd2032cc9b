//! TOML-based tariff configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bill::scheme::InstitutionCategory;

/// Versioned tariff configuration injected into the calculator.
///
/// All fields have defaults matching the baseline tariff. Load from
/// TOML with [`TariffConfig::from_toml_file`] or use
/// [`TariffConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TariffConfig {
    /// Tariff version tag, reported alongside every bill.
    #[serde(default = "default_version")]
    pub version: String,
    /// Tiered household pricing.
    #[serde(default)]
    pub household: HouseholdTariff,
    /// Flat institutional pricing.
    #[serde(default)]
    pub institution: InstitutionTariff,
}

fn default_version() -> String {
    "baseline".to_string()
}

/// Tiered household pricing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdTariff {
    /// Upper bound of tier 1 (kWh, inclusive).
    pub threshold_kwh: f64,
    /// Price per kWh inside tier 1.
    pub tier1_rate: f64,
    /// Price per kWh above the threshold.
    pub tier2_rate: f64,
    /// Billing period used when the months field is left blank.
    pub default_months: f64,
}

impl Default for HouseholdTariff {
    fn default() -> Self {
        Self {
            threshold_kwh: 300.0,
            tier1_rate: 600.0,
            tier2_rate: 1400.0,
            default_months: 2.0,
        }
    }
}

/// Flat institutional pricing per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstitutionTariff {
    /// Price per kWh for the standard category.
    pub standard_rate: f64,
    /// Price per kWh for the premium category.
    pub premium_rate: f64,
}

impl Default for InstitutionTariff {
    fn default() -> Self {
        Self {
            standard_rate: 1700.0,
            premium_rate: 1800.0,
        }
    }
}

impl InstitutionTariff {
    /// Flat rate for the given category.
    ///
    /// # Arguments
    ///
    /// * `category` - Institution category to price
    pub fn rate(&self, category: InstitutionCategory) -> f64 {
        match category {
            InstitutionCategory::Standard => self.standard_rate,
            InstitutionCategory::Premium => self.premium_rate,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"household.tier1_rate"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

impl TariffConfig {
    /// Returns the built-in tariff.
    pub fn baseline() -> Self {
        Self {
            version: default_version(),
            household: HouseholdTariff::default(),
            institution: InstitutionTariff::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline"];

    /// Loads a tariff from a named preset.
    ///
    /// # Arguments
    ///
    /// * `name` - One of [`TariffConfig::PRESETS`]
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a tariff from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML tariff file
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "tariff".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let cfg = Self::from_toml_str(&content)?;
        log::info!("loaded tariff \"{}\" from {}", cfg.version, path.display());
        Ok(cfg)
    }

    /// Parses a tariff from a TOML string.
    ///
    /// # Arguments
    ///
    /// * `s` - TOML document; omitted fields take baseline values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.version.trim().is_empty() {
            errors.push(ConfigError {
                field: "version".into(),
                message: "must not be empty".into(),
            });
        }

        let h = &self.household;
        if !(h.threshold_kwh.is_finite() && h.threshold_kwh > 0.0) {
            errors.push(ConfigError {
                field: "household.threshold_kwh".into(),
                message: "must be a finite number > 0".into(),
            });
        }
        if !(h.default_months.is_finite() && h.default_months > 0.0) {
            errors.push(ConfigError {
                field: "household.default_months".into(),
                message: "must be a finite number > 0".into(),
            });
        }

        let rates = [
            ("household.tier1_rate", h.tier1_rate),
            ("household.tier2_rate", h.tier2_rate),
            ("institution.standard_rate", self.institution.standard_rate),
            ("institution.premium_rate", self.institution.premium_rate),
        ];
        for (field, rate) in rates {
            if !(rate.is_finite() && rate >= 0.0) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be a finite number >= 0".into(),
                });
            }
        }

        errors
    }
}
