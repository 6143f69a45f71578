//! Read paths returning loosely typed rows for the query tool.

use super::CarrierStore;
use crate::{error::CarrierResult, types::CustomerId};
use rusqlite::{params, types::ValueRef, Params, Row};
use serde_json::{Map, Number, Value};

/// One result row: column name to scalar, in select-list order.
pub type JsonRow = Map<String, Value>;

impl CarrierStore {
    /// Run `sql` and return at most `limit` rows. No validation happens here.
    pub fn select_rows(&self, sql: &str, limit: usize) -> CarrierResult<Vec<JsonRow>> {
        self.collect_rows(sql, [], limit)
    }

    /// Recent calls for one customer, joined with the customer's identity.
    pub fn customer_calls(
        &self,
        customer_id: CustomerId,
        limit: usize,
    ) -> CarrierResult<Vec<JsonRow>> {
        self.collect_rows(
            "SELECT
                cr.call_id,
                cr.customer_id,
                c.full_name,
                c.phone_number AS customer_phone,
                cr.other_party_phone,
                cr.call_type,
                cr.start_time,
                cr.duration_seconds,
                cr.is_missed,
                cr.is_roaming,
                cr.cell_tower_city,
                cr.cell_tower_country,
                cr.cost_usd
             FROM call_records cr
             JOIN customers c ON c.customer_id = cr.customer_id
             WHERE cr.customer_id = ?1
             ORDER BY cr.start_time DESC, cr.call_id DESC
             LIMIT ?2",
            params![customer_id, limit as i64],
            limit,
        )
    }

    /// Customer count and mean data usage per plan. Plans with no customers
    /// report a count of 0 and a null average.
    pub fn plan_summary(&self) -> CarrierResult<Vec<JsonRow>> {
        self.collect_rows(
            "SELECT
                p.plan_id,
                p.plan_name,
                p.plan_type,
                p.monthly_price_usd,
                COUNT(c.customer_id) AS customer_count,
                AVG(c.data_used_gb) AS avg_data_used_gb
             FROM plans p
             LEFT JOIN customers c ON c.plan_id = p.plan_id
             GROUP BY p.plan_id, p.plan_name, p.plan_type, p.monthly_price_usd
             ORDER BY p.monthly_price_usd, p.plan_id",
            [],
            usize::MAX,
        )
    }

    fn collect_rows<P: Params>(
        &self,
        sql: &str,
        params: P,
        limit: usize,
    ) -> CarrierResult<Vec<JsonRow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = stmt.query(params)?;
        let mut out = Vec::new();
        while out.len() < limit {
            let Some(row) = rows.next()? else { break };
            out.push(to_json_row(&columns, row)?);
        }
        Ok(out)
    }
}

fn to_json_row(columns: &[String], row: &Row<'_>) -> rusqlite::Result<JsonRow> {
    let mut map = Map::with_capacity(columns.len());
    for (i, name) in columns.iter().enumerate() {
        let value = match row.get_ref(i)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(n) => Value::from(n),
            ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::String(b.iter().map(|byte| format!("{byte:02x}")).collect()),
        };
        map.insert(name.clone(), value);
    }
    Ok(map)
}
