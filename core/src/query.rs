//! The three read-only operations behind the query tool.
//!
//! Each call opens its own short-lived read-only connection and closes it
//! before returning; nothing is shared between calls.

use crate::{
    error::{CarrierError, CarrierResult},
    store::{CarrierStore, JsonRow},
    types::CustomerId,
};

pub const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct QueryService {
    db_path: String,
}

impl QueryService {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self { db_path: db_path.into() }
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Run a statement that lexically starts with `SELECT`.
    ///
    /// The prefix check is textual only. The connection is opened read-only,
    /// so a SELECT that reaches a writing function still fails in SQLite.
    pub fn run_query(&self, sql: &str, limit: usize) -> CarrierResult<Vec<JsonRow>> {
        ensure_select(sql)?;
        let rows = self.open()?.select_rows(sql, limit)?;
        log::debug!("run_query returned {} rows", rows.len());
        Ok(rows)
    }

    /// Most recent calls first, at most `limit`.
    pub fn get_customer_calls(
        &self,
        customer_id: CustomerId,
        limit: usize,
    ) -> CarrierResult<Vec<JsonRow>> {
        self.open()?.customer_calls(customer_id, limit)
    }

    pub fn get_plan_summary(&self) -> CarrierResult<Vec<JsonRow>> {
        self.open()?.plan_summary()
    }

    fn open(&self) -> CarrierResult<CarrierStore> {
        CarrierStore::open_read_only(&self.db_path)
    }
}

/// Accept only statements whose trimmed, upper-cased text begins with SELECT.
pub fn ensure_select(sql: &str) -> CarrierResult<()> {
    if sql.trim().to_uppercase().starts_with("SELECT") {
        Ok(())
    } else {
        log::warn!("rejected non-SELECT query: {}", sql.trim());
        Err(CarrierError::QueryRejected(
            "Only SELECT queries are allowed for safety.".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_prefix_is_case_and_space_insensitive() {
        assert!(ensure_select("  select * from plans").is_ok());
        assert!(ensure_select("\nSELECT 1").is_ok());
    }

    #[test]
    fn other_statements_are_rejected() {
        for sql in ["DROP TABLE customers", "delete from plans", "WITH x AS (SELECT 1) SELECT * FROM x", ""] {
            assert!(
                matches!(ensure_select(sql), Err(CarrierError::QueryRejected(_))),
                "{sql:?} should be rejected"
            );
        }
    }
}
