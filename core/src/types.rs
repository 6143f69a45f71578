//! Shared primitive types used across every stage.

/// Primary key of a row in `plans`.
pub type PlanId = i64;

/// Primary key of a row in `customers`. Generated ids are 1-based.
pub type CustomerId = i64;

/// Primary key of a row in `call_records`. Generated ids are 1-based.
pub type CallId = i64;

/// Sentinel written to files and the database for an unlimited allowance.
pub const UNLIMITED_SENTINEL: f64 = -1.0;

/// Round to whole cents (two decimal places).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
