use super::{CarrierStore, PlanRow};
use crate::{error::CarrierResult, types::PlanId};
use rusqlite::{params, OptionalExtension};

impl CarrierStore {
    // ── Plan ───────────────────────────────────────────────────

    pub fn insert_plan(&self, p: &PlanRow) -> CarrierResult<()> {
        self.conn.execute(
            "INSERT INTO plans (
                plan_id, plan_name, plan_type, monthly_price_usd, data_limit_gb,
                talk_minutes, text_messages, hotspot_gb, overage_rate_usd_per_gb,
                contract_months
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                p.plan_id,
                &p.plan_name,
                &p.plan_type,
                p.monthly_price_usd,
                p.data_limit_gb,
                p.talk_minutes,
                p.text_messages,
                p.hotspot_gb,
                p.overage_rate_usd_per_gb,
                p.contract_months,
            ],
        )?;
        Ok(())
    }

    /// Exact, case-sensitive name lookup.
    pub fn plan_id_by_name(&self, plan_name: &str) -> CarrierResult<Option<PlanId>> {
        Ok(self
            .conn
            .query_row(
                "SELECT plan_id FROM plans WHERE plan_name = ?1",
                params![plan_name],
                |r| r.get(0),
            )
            .optional()?)
    }

    pub fn all_plans(&self) -> CarrierResult<Vec<PlanRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT plan_id, plan_name, plan_type, monthly_price_usd, data_limit_gb,
                    talk_minutes, text_messages, hotspot_gb, overage_rate_usd_per_gb,
                    contract_months
             FROM plans ORDER BY plan_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PlanRow {
                plan_id: row.get(0)?,
                plan_name: row.get(1)?,
                plan_type: row.get(2)?,
                monthly_price_usd: row.get(3)?,
                data_limit_gb: row.get(4)?,
                talk_minutes: row.get(5)?,
                text_messages: row.get(6)?,
                hotspot_gb: row.get(7)?,
                overage_rate_usd_per_gb: row.get(8)?,
                contract_months: row.get(9)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn plan_count(&self) -> CarrierResult<i64> {
        self.count("plans")
    }
}
