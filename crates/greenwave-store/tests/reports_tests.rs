// Integration tests for the read-only sales aggregate

use chrono::{FixedOffset, TimeZone, Utc};
use greenwave_core::model::{Payment, PAYMENT_METHOD_CARD};
use greenwave_store::{Store, StoreConfig};
use tempfile::TempDir;

fn payment(id: &str, amount: f64, day: u32, hour: u32) -> Payment {
    Payment::at(
        id.to_string(),
        format!("T{}", id),
        amount,
        PAYMENT_METHOD_CARD.to_string(),
        Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap(),
    )
}

#[test]
fn test_daily_sales_groups_by_date() {
    // GIVEN payments on two days
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(&StoreConfig::new(dir.path()).without_seed()).unwrap();
    store.add_payment(payment("P1", 50.0, 10, 8)).unwrap();
    store.add_payment(payment("P2", 150.0, 10, 23)).unwrap();
    store.add_payment(payment("P3", 100.0, 11, 0)).unwrap();

    // WHEN sales are aggregated by UTC date
    let sales = store.daily_sales_in(&Utc);

    // THEN totals are keyed by ISO date in ascending order
    let rows: Vec<(&str, f64)> = sales.iter().map(|(d, t)| (d.as_str(), *t)).collect();
    assert_eq!(rows, vec![("2026-06-10", 200.0), ("2026-06-11", 100.0)]);
}

#[test]
fn test_daily_sales_follow_the_reporting_time_zone() {
    // GIVEN a late-evening UTC payment
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(&StoreConfig::new(dir.path()).without_seed()).unwrap();
    store.add_payment(payment("P1", 50.0, 10, 8)).unwrap();
    store.add_payment(payment("P2", 150.0, 10, 23)).unwrap();

    // WHEN aggregated two hours east of UTC
    let east = FixedOffset::east_opt(2 * 3600).unwrap();
    let sales = store.daily_sales_in(&east);

    // THEN the late payment lands on the next calendar day
    assert_eq!(sales.get("2026-06-10"), Some(&50.0));
    assert_eq!(sales.get("2026-06-11"), Some(&150.0));
}

#[test]
fn test_daily_sales_uses_local_date_keys() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(&StoreConfig::new(dir.path()).without_seed()).unwrap();
    let p = payment("P1", 50.0, 10, 12);
    store.add_payment(p.clone()).unwrap();

    let sales = store.daily_sales();

    assert_eq!(sales.len(), 1);
    assert_eq!(sales.get(&p.date_key()), Some(&50.0));
}

#[test]
fn test_daily_sales_empty_without_payments() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(&StoreConfig::new(dir.path()).without_seed()).unwrap();

    assert!(store.daily_sales().is_empty());
}
