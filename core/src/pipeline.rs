//! Stage entry points used by the runner: each reads its inputs from disk,
//! does its work and writes its output file.

use crate::{
    call_record::CallRecordGenerator,
    config::GeneratorConfig,
    customer::CustomerGenerator,
    error::CarrierResult,
    rng::{RngBank, StreamSlot},
    tabular::{self, SaveOutcome},
};
use chrono::NaiveDateTime;

/// Write the configured plan catalog as a plan table.
pub fn export_plans(config: &GeneratorConfig) -> CarrierResult<SaveOutcome> {
    tabular::write_plans(&config.plans_csv, &config.plans)
}

/// Generate customers and write them to `config.customers_csv`.
pub fn generate_customers(config: &GeneratorConfig) -> CarrierResult<SaveOutcome> {
    let mut rng = RngBank::new(config.seed).for_stream(StreamSlot::Customer);
    let customers = CustomerGenerator::new(config).generate(&mut rng);
    tabular::write_customers(&config.customers_csv, &customers)
}

/// Read `config.customers_csv`, generate calls ending at `now`, and write
/// them to `config.call_records_csv`.
pub fn generate_call_records(
    config: &GeneratorConfig,
    now: NaiveDateTime,
) -> CarrierResult<SaveOutcome> {
    let customers = tabular::read_customers(&config.customers_csv)?;
    let mut rng = RngBank::new(config.seed).for_stream(StreamSlot::CallRecord);
    let records = CallRecordGenerator::new(&config.calls, now).generate(&customers, &mut rng);
    tabular::write_call_records(&config.call_records_csv, &records)
}
