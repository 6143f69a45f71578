use super::{CallRow, CarrierStore};
use crate::{error::CarrierResult, types::CustomerId};
use rusqlite::params;

impl CarrierStore {
    // ── Call records ───────────────────────────────────────────

    pub fn insert_call_record(&self, r: &CallRow) -> CarrierResult<()> {
        self.conn.execute(
            "INSERT INTO call_records (
                call_id, customer_id, other_party_phone, call_type, start_time,
                duration_seconds, is_missed, is_roaming, cell_tower_city,
                cell_tower_country, cost_usd
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                r.call_id,
                r.customer_id,
                &r.other_party_phone,
                &r.call_type,
                &r.start_time,
                r.duration_seconds,
                if r.is_missed { 1 } else { 0 },
                if r.is_roaming { 1 } else { 0 },
                &r.cell_tower_city,
                &r.cell_tower_country,
                r.cost_usd,
            ],
        )?;
        Ok(())
    }

    pub fn call_record_count(&self) -> CarrierResult<i64> {
        self.count("call_records")
    }

    pub fn call_count_for_customer(&self, customer_id: CustomerId) -> CarrierResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM call_records WHERE customer_id = ?1",
            params![customer_id],
            |r| r.get(0),
        )?)
    }
}
