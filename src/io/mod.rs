//! CSV batch input and bill export.

pub mod batch;
pub mod export;
