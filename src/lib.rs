//! Electricity bill calculator for tiered household and flat institutional tariffs.

/// Validation, tariff application, and currency conversion.
pub mod bill;
pub mod config;
pub mod io;

#[cfg(feature = "api")]
pub mod api;
