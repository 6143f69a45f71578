//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The loader and query service call store methods; they never execute SQL
//! directly.

use crate::{
    error::CarrierResult,
    types::{CallId, CustomerId, PlanId},
};
use rusqlite::{Connection, OpenFlags, Transaction};

mod call_record;
mod customer;
mod plan;
mod query;

pub use query::JsonRow;

pub struct CarrierStore {
    conn: Connection,
}

impl CarrierStore {
    /// Open (or create) a database for writing.
    pub fn open(path: &str) -> CarrierResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an existing database that may only be read.
    /// Statements that try to write fail inside SQLite.
    pub fn open_read_only(path: &str) -> CarrierResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> CarrierResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Drop and recreate every table. Destroys existing data.
    pub fn migrate(&self) -> CarrierResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_schema.sql"))?;
        Ok(())
    }

    /// Start a transaction. Store methods called while it is open run inside it;
    /// dropping it without `commit()` rolls everything back.
    pub fn begin(&self) -> CarrierResult<Transaction<'_>> {
        Ok(self.conn.unchecked_transaction()?)
    }

    /// Number of rows violating a foreign key (0 for a consistent database).
    pub fn foreign_key_violations(&self) -> CarrierResult<i64> {
        let mut stmt = self.conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        let mut count = 0;
        while rows.next()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    fn count(&self, table: &str) -> CarrierResult<i64> {
        Ok(self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    }
}

// ── Row types ──────────────────────────────────────────────────

/// A `plans` row. Unlimited allowances are stored as -1.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRow {
    pub plan_id: PlanId,
    pub plan_name: String,
    pub plan_type: String,
    pub monthly_price_usd: f64,
    pub data_limit_gb: f64,
    pub talk_minutes: f64,
    pub text_messages: f64,
    pub hotspot_gb: f64,
    pub overage_rate_usd_per_gb: f64,
    pub contract_months: i64,
}

/// A `customers` row: the customer file with the plan resolved to its id.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub customer_id: CustomerId,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub plan_id: PlanId,
    pub data_used_gb: f64,
    pub minutes_used: i64,
    pub text_messages: i64,
    pub is_over_data: bool,
}

/// A `call_records` row. The caller's phone lives on the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRow {
    pub call_id: CallId,
    pub customer_id: CustomerId,
    pub other_party_phone: String,
    pub call_type: String,
    pub start_time: String,
    pub duration_seconds: i64,
    pub is_missed: bool,
    pub is_roaming: bool,
    pub cell_tower_city: String,
    pub cell_tower_country: String,
    pub cost_usd: f64,
}
