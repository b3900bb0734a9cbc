//! Schema constraint behavior at the storage boundary.

use chrono::NaiveDate;
use stockdata::db::connection::{create_pool_sized, run_migrations, DbPool};
use stockdata::db::model::{NewAssetRow, NewEventRow, NewStockRow};
use stockdata::store::{
    SqliteAssetStore, SqliteBarStore, SqliteEventStore, SqliteHolidayStore, SqliteMarketDayStore,
};

fn setup_test_db() -> DbPool {
    let pool = create_pool_sized(":memory:", 1).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    pool
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bar(symbol: &str, d: NaiveDate) -> NewStockRow {
    NewStockRow {
        symbol: symbol.to_string(),
        open: 100.0,
        high: 101.0,
        low: 99.0,
        close: 100.5,
        volume: 1_000_000.0,
        date: d,
        trade_count: 9_000.0,
        dividend: false,
    }
}

#[test]
fn second_bar_with_same_symbol_and_date_fails() {
    let bars = SqliteBarStore::new(setup_test_db());

    bars.insert(&bar("AAPL", date(2024, 3, 4))).unwrap();
    let err = bars.insert(&bar("AAPL", date(2024, 3, 4))).unwrap_err();

    assert!(err.is_unique_violation(), "expected unique violation: {err}");
}

#[test]
fn second_asset_with_same_symbol_fails() {
    let assets = SqliteAssetStore::new(setup_test_db());

    assets
        .insert(&NewAssetRow::tracked("AAPL", date(2020, 1, 2)))
        .unwrap();
    let err = assets
        .insert(&NewAssetRow::tracked("AAPL", date(2022, 1, 3)))
        .unwrap_err();

    assert!(err.is_unique_violation(), "expected unique violation: {err}");
}

#[test]
fn second_holiday_with_same_date_fails() {
    let holidays = SqliteHolidayStore::new(setup_test_db());

    holidays.insert(date(2024, 1, 1)).unwrap();
    let err = holidays.insert(date(2024, 1, 1)).unwrap_err();

    assert!(err.is_unique_violation(), "expected unique violation: {err}");
}

#[test]
fn second_market_day_with_same_date_fails() {
    let days = SqliteMarketDayStore::new(setup_test_db());

    days.insert(date(2024, 1, 2)).unwrap();
    let err = days.insert(date(2024, 1, 2)).unwrap_err();

    assert!(err.is_unique_violation(), "expected unique violation: {err}");
}

#[test]
fn event_with_dangling_asset_id_fails() {
    let events = SqliteEventStore::new(setup_test_db());

    let err = events
        .insert(&NewEventRow {
            asset_id: 42,
            symbol: "AAPL".to_string(),
            start_date: date(2024, 3, 4),
            end_date: date(2024, 3, 8),
            num_days: 5,
        })
        .unwrap_err();

    assert!(
        err.is_foreign_key_violation(),
        "expected foreign-key violation: {err}"
    );
}

#[test]
fn event_insert_succeeds_once_asset_exists() {
    let pool = setup_test_db();
    let assets = SqliteAssetStore::new(pool.clone());
    let events = SqliteEventStore::new(pool);

    let asset = assets
        .insert(&NewAssetRow::tracked("AAPL", date(2020, 1, 2)))
        .unwrap();
    let event = events
        .insert(&NewEventRow {
            asset_id: asset.id,
            symbol: "AAPL".to_string(),
            start_date: date(2024, 3, 4),
            end_date: date(2024, 3, 8),
            num_days: 5,
        })
        .unwrap();

    assert_eq!(event.asset_id, asset.id);
}

#[test]
fn bar_upsert_does_not_duplicate() {
    let bars = SqliteBarStore::new(setup_test_db());

    let mut row = bar("AAPL", date(2024, 3, 4));
    bars.upsert(&row).unwrap();
    row.close = 105.0;
    bars.upsert(&row).unwrap();

    let stored = bars.for_symbol("AAPL").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].close, 105.0);
}
