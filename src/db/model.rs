//! Database row types for Diesel ORM.
//!
//! Pure data definitions: `*Row` structs read rows back, `New*Row` structs
//! insert them. Constraints live in the schema, not here.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use super::schema::{
    assets, correlations, dividends, events, holidays, market_days, risk_reward, stocks,
};

/// One daily OHLCV price bar for a symbol.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = stocks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockRow {
    pub id: i32,
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub date: NaiveDate,
    pub trade_count: f64,
    pub dividend: bool,
}

/// Insertable price bar. `(symbol, date)` is unique across the table.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = stocks)]
pub struct NewStockRow {
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub date: NaiveDate,
    pub trade_count: f64,
    pub dividend: bool,
}

/// A tracked tradable symbol and its ingestion state.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetRow {
    pub id: i32,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub min_num_events: i32,
    pub percentage_downloaded: f64,
    pub dividend: bool,
    pub dividend_checked: bool,
}

/// Insertable asset.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = assets)]
pub struct NewAssetRow {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub min_num_events: i32,
    pub percentage_downloaded: f64,
    pub dividend: bool,
    pub dividend_checked: bool,
}

impl NewAssetRow {
    /// A fresh asset with no ingestion progress.
    #[must_use]
    pub fn tracked(symbol: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start_date,
            min_num_events: 0,
            percentage_downloaded: 0.0,
            dividend: false,
            dividend_checked: false,
        }
    }
}

/// One declared dividend for an asset.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = dividends)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DividendRow {
    pub id: i32,
    pub symbol: String,
    pub ex_dividend_date: NaiveDate,
    pub pay_date: NaiveDate,
    pub record_date: NaiveDate,
    pub declared_date: NaiveDate,
    pub cash_amount: f64,
    pub currency: String,
    pub frequency: String,
    pub dividend_type: String,
}

/// Insertable dividend. `symbol` must reference a tracked asset.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = dividends)]
pub struct NewDividendRow {
    pub symbol: String,
    pub ex_dividend_date: NaiveDate,
    pub pay_date: NaiveDate,
    pub record_date: NaiveDate,
    pub declared_date: NaiveDate,
    pub cash_amount: f64,
    pub currency: String,
    pub frequency: String,
    pub dividend_type: String,
}

/// Pairwise correlation coefficient between two symbols.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = correlations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CorrelationRow {
    pub id: i32,
    pub left: String,
    pub right: String,
    pub correlation: f64,
}

/// Insertable correlation pair.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = correlations)]
pub struct NewCorrelationRow {
    pub left: String,
    pub right: String,
    pub correlation: f64,
}

/// A detected occurrence window over one asset's bars.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventRow {
    pub id: i32,
    pub asset_id: i32,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_days: i32,
}

/// Insertable event window. `asset_id` must reference an existing asset.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = events)]
pub struct NewEventRow {
    pub asset_id: i32,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_days: i32,
}

/// One calendar day the market was open.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = market_days)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketDayRow {
    pub id: i32,
    pub date: NaiveDate,
}

/// One non-trading calendar day.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = holidays)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HolidayRow {
    pub id: i32,
    pub date: NaiveDate,
}

/// Derived win/loss statistics for a symbol.
///
/// The statistical columns stay `None` until first computed; `last_update`
/// is always present.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = risk_reward)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RiskRewardRow {
    pub id: i32,
    pub symbol: String,
    pub win_rate: Option<f64>,
    pub loss_rate: Option<f64>,
    pub avg_gain: Option<f64>,
    pub avg_loss: Option<f64>,
    pub percentage_downloaded: f64,
    pub avg_dividend: Option<f64>,
    pub last_update: NaiveDateTime,
    pub div_multiplier: Option<f64>,
    pub stop_loss_percentage: Option<f64>,
    pub portion_to_risk: Option<f64>,
}

/// Insertable risk/reward snapshot.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = risk_reward)]
pub struct NewRiskRewardRow {
    pub symbol: String,
    pub win_rate: Option<f64>,
    pub loss_rate: Option<f64>,
    pub avg_gain: Option<f64>,
    pub avg_loss: Option<f64>,
    pub percentage_downloaded: f64,
    pub avg_dividend: Option<f64>,
    pub last_update: NaiveDateTime,
    pub div_multiplier: Option<f64>,
    pub stop_loss_percentage: Option<f64>,
    pub portion_to_risk: Option<f64>,
}

impl NewRiskRewardRow {
    /// A snapshot carrying only the required fields; statistics unset.
    #[must_use]
    pub fn pending(symbol: impl Into<String>, last_update: NaiveDateTime) -> Self {
        Self {
            symbol: symbol.into(),
            win_rate: None,
            loss_rate: None,
            avg_gain: None,
            avg_loss: None,
            percentage_downloaded: 0.0,
            avg_dividend: None,
            last_update,
            div_multiplier: None,
            stop_loss_percentage: None,
            portion_to_risk: None,
        }
    }
}
