//! Flat file → SQLite load tests.

mod common;

use carrier_core::{error::CarrierError, loader, store::CarrierStore};
use common::{fixture, loader_config, loader_config_with, write, CALLS_CSV, CUSTOMERS_CSV, PLANS_CSV};

#[test]
fn known_files_load_exact_row_counts() {
    let (_dir, config) = loader_config();
    let summary = loader::load_files(&config).unwrap();
    assert_eq!((summary.plans, summary.customers, summary.call_records), (2, 3, 5));

    let store = CarrierStore::open(&config.db_path).unwrap();
    assert_eq!(store.plan_count().unwrap(), 2);
    assert_eq!(store.customer_count().unwrap(), 3);
    assert_eq!(store.call_record_count().unwrap(), 5);
    assert_eq!(store.foreign_key_violations().unwrap(), 0);
}

#[test]
fn customers_resolve_plan_by_name() {
    let (_dir, config) = loader_config();
    loader::load_files(&config).unwrap();

    let store = CarrierStore::open(&config.db_path).unwrap();
    let basic = store.plan_id_by_name("R-Basic").unwrap();
    assert_eq!(basic, Some(1));
    assert_eq!(store.plan_id_by_name("r-basic").unwrap(), None, "lookup is case-sensitive");

    let ivy = store.get_customer(1).unwrap().expect("customer 1");
    assert_eq!(ivy.plan_id, 1);
    assert!(ivy.is_over_data);
    assert_eq!(store.call_count_for_customer(1).unwrap(), 3);
}

#[test]
fn unlimited_sentinel_survives_load() {
    let (_dir, config) = loader_config();
    loader::load_files(&config).unwrap();

    let store = CarrierStore::open(&config.db_path).unwrap();
    let plans = store.all_plans().unwrap();
    assert_eq!(plans[1].plan_name, "R-Unlimited");
    assert_eq!(plans[1].data_limit_gb, -1.0);
    assert_eq!(plans[1].contract_months, 24);
}

#[test]
fn reloading_replaces_instead_of_appending() {
    let (_dir, config) = loader_config();
    loader::load_files(&config).unwrap();
    loader::load_files(&config).unwrap();

    let store = CarrierStore::open(&config.db_path).unwrap();
    assert_eq!(store.customer_count().unwrap(), 3);
    assert_eq!(store.call_record_count().unwrap(), 5);
}

#[test]
fn blank_numeric_fields_become_zero() {
    let customers = "\
customer_id,full_name,email,phone_number,address,plan_name,data_used_gb,minutes_used,text_messages,is_over_data
1,Ivy Chen,ivy@example.com,212-555-0100,Somewhere,R-Basic,,,,
";
    let calls = "\
call_id,customer_id,call_type,start_time,duration_seconds,is_missed,is_roaming,cost_usd
1,1,missed,2025-03-01 09:00:00,,True,,
";
    let (_dir, config) = loader_config_with(PLANS_CSV, customers, calls);
    loader::load_files(&config).unwrap();

    let store = CarrierStore::open(&config.db_path).unwrap();
    let c = store.get_customer(1).unwrap().unwrap();
    assert_eq!(c.data_used_gb, 0.0);
    assert_eq!(c.minutes_used, 0);
    assert_eq!(c.text_messages, 0);
    assert!(!c.is_over_data);
    assert_eq!(store.call_record_count().unwrap(), 1);
}

#[test]
fn malformed_number_aborts_and_keeps_previous_load() {
    let (dir, mut config) = loader_config();
    loader::load_files(&config).unwrap();

    let bad_calls = CALLS_CSV.replace("2025-03-04 20:45:00,45,", "2025-03-04 20:45:00,forty-five,");
    config.call_records_csv = write(dir.path(), "bad_calls.csv", &bad_calls);

    match loader::load_files(&config) {
        Err(CarrierError::Conversion { row, column, value, .. }) => {
            assert_eq!(row, 6);
            assert_eq!(column, "duration_seconds");
            assert_eq!(value, "forty-five");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }

    let store = CarrierStore::open(&config.db_path).unwrap();
    assert_eq!(store.call_record_count().unwrap(), 5);
}

#[test]
fn unknown_plan_aborts_load() {
    let customers = CUSTOMERS_CSV.replace("Zoe Sato,zoe@example.com,415-555-0102,\"3 Pine Lane, Reno, NV 89501\",R-Basic",
                                          "Zoe Sato,zoe@example.com,415-555-0102,\"3 Pine Lane, Reno, NV 89501\",R-Gold");
    let (_dir, config) = loader_config_with(PLANS_CSV, &customers, CALLS_CSV);

    match loader::load_files(&config) {
        Err(CarrierError::UnknownPlan { customer_id, plan_name }) => {
            assert_eq!(customer_id, 3);
            assert_eq!(plan_name, "R-Gold");
        }
        other => panic!("expected unknown plan, got {other:?}"),
    }
}

#[test]
fn dangling_customer_reference_rolls_back() {
    let (dir, mut config) = loader_config();
    loader::load_files(&config).unwrap();

    let calls = format!(
        "{CALLS_CSV}6,99,000-000-0000,212-555-0100,outgoing,2025-03-05 10:00:00,10,False,False,Austin,United States,0.1\n"
    );
    config.call_records_csv = write(dir.path(), "dangling.csv", &calls);

    let err = loader::load_files(&config).unwrap_err();
    assert!(matches!(err, CarrierError::Database(_)), "got {err:?}");

    let store = CarrierStore::open(&config.db_path).unwrap();
    assert_eq!(store.call_record_count().unwrap(), 5);
    assert_eq!(store.foreign_key_violations().unwrap(), 0);
}

#[test]
fn missing_key_column_is_reported() {
    let plans = PLANS_CSV.replacen("plan_name", "name", 1);
    let (_dir, config) = loader_config_with(&plans, CUSTOMERS_CSV, CALLS_CSV);
    let err = loader::load_files(&config).unwrap_err();
    assert!(
        matches!(&err, CarrierError::MissingColumn { column, .. } if column == "plan_name"),
        "got {err:?}"
    );
}

#[test]
fn padded_plan_name_does_not_match() {
    let customers = CUSTOMERS_CSV.replace("\"3 Pine Lane, Reno, NV 89501\",R-Basic", "\"3 Pine Lane, Reno, NV 89501\", R-Basic");
    let (_dir, config) = loader_config_with(PLANS_CSV, &customers, CALLS_CSV);

    match loader::load_files(&config) {
        Err(CarrierError::UnknownPlan { customer_id, plan_name }) => {
            assert_eq!(customer_id, 3);
            assert_eq!(plan_name, " R-Basic");
        }
        other => panic!("expected unknown plan, got {other:?}"),
    }
}

// ── Spreadsheet plan tables ────────────────────────────────────

#[test]
fn plans_load_from_spreadsheet() {
    let (_dir, mut config) = loader_config();
    config.plans_path = fixture("plans.xlsx");

    let summary = loader::load_files(&config).unwrap();
    assert_eq!((summary.plans, summary.customers, summary.call_records), (2, 3, 5));

    let store = CarrierStore::open(&config.db_path).unwrap();
    assert_eq!(store.foreign_key_violations().unwrap(), 0);
    let plans = store.all_plans().unwrap();
    assert_eq!(plans[0].plan_id, 1);
    assert_eq!(plans[0].plan_name, "R-Basic");
    assert_eq!(plans[0].monthly_price_usd, 29.99);
    assert_eq!(plans[0].data_limit_gb, 5.0);
    assert_eq!(plans[1].plan_id, 2);
    assert_eq!(plans[1].data_limit_gb, -1.0);
    assert_eq!(plans[1].talk_minutes, -1.0);
    assert_eq!(plans[1].contract_months, 24);
}

#[test]
fn spreadsheet_errors_point_at_the_sheet_row() {
    // Sheet row 3 is blank; the bad price sits on row 4.
    let (_dir, mut config) = loader_config();
    config.plans_path = fixture("plans_gap.xlsx");

    match loader::load_files(&config) {
        Err(CarrierError::Conversion { row, column, value, .. }) => {
            assert_eq!(row, 4);
            assert_eq!(column, "monthly_price_usd");
            assert_eq!(value, "abc");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}
