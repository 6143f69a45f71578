//! Flat files → SQLite.
//!
//! Every run recreates the schema and loads plans, customers and calls inside
//! one transaction. Any conversion error, unknown plan name or dangling
//! customer reference aborts the run and nothing is committed.

use crate::{
    config::LoaderConfig,
    error::{CarrierError, CarrierResult},
    store::{CallRow, CarrierStore, CustomerRow, PlanRow},
    tabular::{RawRow, RawTable},
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub plans: usize,
    pub customers: usize,
    pub call_records: usize,
}

/// Read the three input tables named in `config` and load them into
/// `config.db_path`.
pub fn load_files(config: &LoaderConfig) -> CarrierResult<LoadSummary> {
    let plans = RawTable::read(&config.plans_path)?;
    let customers = RawTable::from_csv(&config.customers_csv)?;
    let calls = RawTable::from_csv(&config.call_records_csv)?;

    let store = CarrierStore::open(&config.db_path)?;
    let summary = load_tables(&store, &plans, &customers, &calls)?;
    log::info!(
        "Loaded {} plans, {} customers, {} call records into {}",
        summary.plans,
        summary.customers,
        summary.call_records,
        config.db_path
    );
    Ok(summary)
}

/// Recreate the schema in `store` and load already-read tables.
pub fn load_tables(
    store: &CarrierStore,
    plans: &RawTable,
    customers: &RawTable,
    calls: &RawTable,
) -> CarrierResult<LoadSummary> {
    for table in [plans, customers, calls] {
        log::debug!("{}: {} rows", table.source(), table.len());
    }

    // Convert everything before touching the database.
    let plan_rows = plans.rows().map(|r| plan_row(&r)).collect::<CarrierResult<Vec<_>>>()?;
    let plan_ids: HashMap<&str, i64> = plan_rows
        .iter()
        .map(|p| (p.plan_name.as_str(), p.plan_id))
        .collect();
    let customer_rows = customers
        .rows()
        .map(|r| customer_row(&r, &plan_ids))
        .collect::<CarrierResult<Vec<_>>>()?;
    let call_rows = calls.rows().map(|r| call_row(&r)).collect::<CarrierResult<Vec<_>>>()?;

    let tx = store.begin()?;
    store.migrate()?;
    for p in &plan_rows {
        store.insert_plan(p)?;
    }
    for c in &customer_rows {
        store.insert_customer(c)?;
    }
    for r in &call_rows {
        store.insert_call_record(r)?;
    }
    tx.commit()?;

    Ok(LoadSummary {
        plans: plan_rows.len(),
        customers: customer_rows.len(),
        call_records: call_rows.len(),
    })
}

fn plan_row(r: &RawRow<'_>) -> CarrierResult<PlanRow> {
    Ok(PlanRow {
        plan_id: r.key("plan_id")?,
        plan_name: r.verbatim("plan_name")?,
        plan_type: r.text("plan_type").unwrap_or_default(),
        monthly_price_usd: r.real("monthly_price_usd")?,
        data_limit_gb: r.real("data_limit_gb")?,
        talk_minutes: r.real("talk_minutes")?,
        text_messages: r.real("text_messages")?,
        hotspot_gb: r.real("hotspot_gb")?,
        overage_rate_usd_per_gb: r.real("overage_rate_usd_per_gb")?,
        contract_months: r.int("contract_months")?,
    })
}

fn customer_row(
    r: &RawRow<'_>,
    plan_ids: &HashMap<&str, i64>,
) -> CarrierResult<CustomerRow> {
    let customer_id = r.key("customer_id")?;
    let plan_name = r.verbatim("plan_name")?;
    let plan_id = *plan_ids
        .get(plan_name.as_str())
        .ok_or(CarrierError::UnknownPlan { customer_id, plan_name: plan_name.clone() })?;
    Ok(CustomerRow {
        customer_id,
        full_name: r.text("full_name")?,
        email: r.text("email").unwrap_or_default(),
        phone_number: r.text("phone_number").unwrap_or_default(),
        address: r.text("address").unwrap_or_default(),
        plan_id,
        data_used_gb: r.real("data_used_gb")?,
        minutes_used: r.int("minutes_used")?,
        text_messages: r.int("text_messages")?,
        is_over_data: r.flag("is_over_data")?,
    })
}

fn call_row(r: &RawRow<'_>) -> CarrierResult<CallRow> {
    Ok(CallRow {
        call_id: r.key("call_id")?,
        customer_id: r.key("customer_id")?,
        other_party_phone: r.text("other_party_phone").unwrap_or_default(),
        call_type: r.text("call_type")?,
        start_time: r.text("start_time")?,
        duration_seconds: r.int("duration_seconds")?,
        is_missed: r.flag("is_missed")?,
        is_roaming: r.flag("is_roaming")?,
        cell_tower_city: r.text("cell_tower_city").unwrap_or_default(),
        cell_tower_country: r.text("cell_tower_country").unwrap_or_default(),
        cost_usd: r.real("cost_usd")?,
    })
}
