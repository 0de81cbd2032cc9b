//! Bill calculation: input validation, tariff application, and currency conversion.

/// Pure validate-then-compute entry point.
pub mod calculator;
/// Form session holding the raw input snapshot and the last outcome.
pub mod form;
pub mod locale;
/// Tariff scheme and institution category selection.
pub mod scheme;
pub mod types;
pub mod validate;
