//! SQLite market-day and holiday stores.
//!
//! Both tables carry one globally unique date per row; a day exists once
//! regardless of how many assets reference it.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::db::connection::{DbConn, DbPool};
use crate::db::model::{HolidayRow, MarketDayRow};
use crate::db::schema::{holidays, market_days};
use crate::error::{Error, Result};

/// SQLite-backed store for days the market was open.
pub struct SqliteMarketDayStore {
    pool: DbPool,
}

impl SqliteMarketDayStore {
    /// Create a new market-day store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    /// Insert a market day. Fails with a unique violation when the date is
    /// already recorded.
    pub fn insert(&self, date: NaiveDate) -> Result<MarketDayRow> {
        let mut conn = self.conn()?;
        diesel::insert_into(market_days::table)
            .values(market_days::date.eq(date))
            .execute(&mut conn)?;
        let row = market_days::table
            .filter(market_days::date.eq(date))
            .first(&mut conn)?;
        Ok(row)
    }

    /// All recorded market days, ascending.
    pub fn all_dates(&self) -> Result<Vec<NaiveDate>> {
        let mut conn = self.conn()?;
        let dates = market_days::table
            .order(market_days::date.asc())
            .select(market_days::date)
            .load(&mut conn)?;
        Ok(dates)
    }
}

/// SQLite-backed store for non-trading holidays.
pub struct SqliteHolidayStore {
    pool: DbPool,
}

impl SqliteHolidayStore {
    /// Create a new holiday store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    /// Insert a holiday. Fails with a unique violation when the date is
    /// already recorded.
    pub fn insert(&self, date: NaiveDate) -> Result<HolidayRow> {
        let mut conn = self.conn()?;
        diesel::insert_into(holidays::table)
            .values(holidays::date.eq(date))
            .execute(&mut conn)?;
        let row = holidays::table
            .filter(holidays::date.eq(date))
            .first(&mut conn)?;
        Ok(row)
    }

    /// All recorded holidays, ascending.
    pub fn all_dates(&self) -> Result<Vec<NaiveDate>> {
        let mut conn = self.conn()?;
        let dates = holidays::table
            .order(holidays::date.asc())
            .select(holidays::date)
            .load(&mut conn)?;
        Ok(dates)
    }
}
