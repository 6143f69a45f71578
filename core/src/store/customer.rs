use super::{CarrierStore, CustomerRow};
use crate::{error::CarrierResult, types::CustomerId};
use rusqlite::{params, OptionalExtension};

impl CarrierStore {
    // ── Customer ───────────────────────────────────────────────

    pub fn insert_customer(&self, c: &CustomerRow) -> CarrierResult<()> {
        self.conn.execute(
            "INSERT INTO customers (
                customer_id, full_name, email, phone_number, address, plan_id,
                data_used_gb, minutes_used, text_messages, is_over_data
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                c.customer_id,
                &c.full_name,
                &c.email,
                &c.phone_number,
                &c.address,
                c.plan_id,
                c.data_used_gb,
                c.minutes_used,
                c.text_messages,
                if c.is_over_data { 1 } else { 0 },
            ],
        )?;
        Ok(())
    }

    pub fn get_customer(&self, customer_id: CustomerId) -> CarrierResult<Option<CustomerRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT customer_id, full_name, email, phone_number, address, plan_id,
                        data_used_gb, minutes_used, text_messages, is_over_data
                 FROM customers WHERE customer_id = ?1",
                params![customer_id],
                |row| {
                    Ok(CustomerRow {
                        customer_id: row.get(0)?,
                        full_name: row.get(1)?,
                        email: row.get(2)?,
                        phone_number: row.get(3)?,
                        address: row.get(4)?,
                        plan_id: row.get(5)?,
                        data_used_gb: row.get(6)?,
                        minutes_used: row.get(7)?,
                        text_messages: row.get(8)?,
                        is_over_data: row.get::<_, i32>(9)? != 0,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn customer_count(&self) -> CarrierResult<i64> {
        self.count("customers")
    }
}
