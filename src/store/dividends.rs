//! SQLite dividend store.

use diesel::prelude::*;

use crate::db::connection::{DbConn, DbPool};
use crate::db::model::{DividendRow, NewDividendRow};
use crate::db::schema::dividends;
use crate::error::{Error, Result};

/// SQLite-backed store for declared dividends.
pub struct SqliteDividendStore {
    pool: DbPool,
}

impl SqliteDividendStore {
    /// Create a new dividend store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    /// Insert a dividend. Fails with a foreign-key violation when the symbol
    /// is not a tracked asset.
    pub fn insert(&self, dividend: &NewDividendRow) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(dividends::table)
            .values(dividend)
            .execute(&mut conn)?;
        Ok(())
    }

    /// All dividends for a symbol, ascending by ex-dividend date.
    pub fn for_symbol(&self, symbol: &str) -> Result<Vec<DividendRow>> {
        let mut conn = self.conn()?;
        let rows = dividends::table
            .filter(dividends::symbol.eq(symbol))
            .order(dividends::ex_dividend_date.asc())
            .load(&mut conn)?;
        Ok(rows)
    }
}
