//! Shared fixtures: a 2-plan / 3-customer / 5-call dataset on disk.
#![allow(dead_code)]

use carrier_core::config::LoaderConfig;
use std::path::Path;
use tempfile::TempDir;

pub const PLANS_CSV: &str = "\
plan_id,plan_name,plan_type,monthly_price_usd,data_limit_gb,talk_minutes,text_messages,hotspot_gb,overage_rate_usd_per_gb,contract_months
1,R-Basic,postpaid,29.99,5,500,1000,0,15,0
2,R-Unlimited,postpaid,99.99,-1,-1,-1,50,0,24
";

pub const CUSTOMERS_CSV: &str = "\
customer_id,full_name,email,phone_number,address,plan_name,monthly_cost,data_limit_gb,data_used_gb,minutes_used,text_messages,is_over_data
1,Ivy Chen,ivy@example.com,212-555-0100,\"1 Oak Street, Austin, TX 73301\",R-Basic,29.99,5,6.5,120,300,True
2,Omar Reyes,omar@example.com,303-555-0101,\"2 Elm Road, Denver, CO 80014\",R-Basic,29.99,5,2.25,800,1200,False
3,Zoe Sato,zoe@example.com,415-555-0102,\"3 Pine Lane, Reno, NV 89501\",R-Basic,29.99,5,1,50,100,false
";

pub const CALLS_CSV: &str = "\
call_id,customer_id,customer_phone,other_party_phone,call_type,start_time,duration_seconds,is_missed,is_roaming,cell_tower_city,cell_tower_country,cost_usd
1,1,212-555-0100,646-555-0199,outgoing,2025-03-01 09:00:00,120,False,False,Austin,United States,1.2
2,1,212-555-0100,647-555-0142,incoming,2025-03-03 18:30:00,60,False,True,Toronto,Canada,1.8
3,1,212-555-0100,720-555-0110,missed,2025-03-02 07:15:00,0,True,False,Austin,United States,0.0
4,2,303-555-0101,212-555-0100,outgoing,2025-02-27 12:00:00,300,False,False,Denver,United States,3.0
5,3,415-555-0102,303-555-0101,incoming,2025-03-04 20:45:00,45,False,False,Reno,United States,0.45
";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path.to_string_lossy().into_owned()
}

/// Write the given tables into a fresh temp dir and point a loader config at them.
pub fn loader_config_with(plans: &str, customers: &str, calls: &str) -> (TempDir, LoaderConfig) {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let config = LoaderConfig {
        plans_path: write(dir.path(), "plans.csv", plans),
        customers_csv: write(dir.path(), "customers.csv", customers),
        call_records_csv: write(dir.path(), "calls.csv", calls),
        db_path: dir.path().join("r_mobile.db").to_string_lossy().into_owned(),
    };
    (dir, config)
}

/// Path to a file under `core/tests/fixtures`.
pub fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

pub fn loader_config() -> (TempDir, LoaderConfig) {
    loader_config_with(PLANS_CSV, CUSTOMERS_CSV, CALLS_CSV)
}
