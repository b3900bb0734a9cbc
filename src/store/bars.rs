//! SQLite price bar store.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::db::connection::{DbConn, DbPool};
use crate::db::model::{NewStockRow, StockRow};
use crate::db::schema::stocks;
use crate::error::{Error, Result};

/// SQLite-backed store for daily OHLCV bars.
pub struct SqliteBarStore {
    pool: DbPool,
}

impl SqliteBarStore {
    /// Create a new bar store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    /// Insert a bar. Fails with a unique violation when a bar for the same
    /// (symbol, date) already exists.
    pub fn insert(&self, bar: &NewStockRow) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(stocks::table)
            .values(bar)
            .execute(&mut conn)?;
        Ok(())
    }

    /// Insert a bar, replacing the existing row for the same (symbol, date)
    /// instead of duplicating it.
    pub fn upsert(&self, bar: &NewStockRow) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(stocks::table)
            .values(bar)
            .on_conflict((stocks::symbol, stocks::date))
            .do_update()
            .set(bar)
            .execute(&mut conn)?;
        Ok(())
    }

    /// The bar for one symbol on one date.
    pub fn find(&self, symbol: &str, date: NaiveDate) -> Result<Option<StockRow>> {
        let mut conn = self.conn()?;
        let row = stocks::table
            .filter(stocks::symbol.eq(symbol))
            .filter(stocks::date.eq(date))
            .first(&mut conn)
            .optional()?;
        Ok(row)
    }

    /// All bars for a symbol, ascending by date.
    pub fn for_symbol(&self, symbol: &str) -> Result<Vec<StockRow>> {
        let mut conn = self.conn()?;
        let rows = stocks::table
            .filter(stocks::symbol.eq(symbol))
            .order(stocks::date.asc())
            .load(&mut conn)?;
        Ok(rows)
    }

    /// Bars for a symbol within `[start, end]`, ascending by date.
    pub fn for_symbol_in_range(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StockRow>> {
        let mut conn = self.conn()?;
        let rows = stocks::table
            .filter(stocks::symbol.eq(symbol))
            .filter(stocks::date.ge(start))
            .filter(stocks::date.le(end))
            .order(stocks::date.asc())
            .load(&mut conn)?;
        Ok(rows)
    }
}
