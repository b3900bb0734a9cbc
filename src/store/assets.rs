//! SQLite asset store.
//!
//! Assets are the only rows mutated in place: ingestion updates
//! `percentage_downloaded` and the dividend flags as it progresses.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::db::connection::{DbConn, DbPool};
use crate::db::model::{AssetRow, NewAssetRow};
use crate::db::schema::{assets, assets_market_days, market_days};
use crate::error::{Error, Result};

/// SQLite-backed store for tracked assets.
pub struct SqliteAssetStore {
    pool: DbPool,
}

impl SqliteAssetStore {
    /// Create a new asset store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    /// Insert a new asset. Fails with a unique violation when the symbol is
    /// already tracked.
    pub fn insert(&self, asset: &NewAssetRow) -> Result<AssetRow> {
        let mut conn = self.conn()?;
        diesel::insert_into(assets::table)
            .values(asset)
            .execute(&mut conn)?;
        let row = assets::table
            .filter(assets::symbol.eq(&asset.symbol))
            .first(&mut conn)?;
        Ok(row)
    }

    /// Look an asset up by its unique symbol.
    pub fn find_by_symbol(&self, symbol: &str) -> Result<Option<AssetRow>> {
        let mut conn = self.conn()?;
        let row = assets::table
            .filter(assets::symbol.eq(symbol))
            .first(&mut conn)
            .optional()?;
        Ok(row)
    }

    /// All tracked assets ordered by symbol.
    pub fn all(&self) -> Result<Vec<AssetRow>> {
        let mut conn = self.conn()?;
        let rows = assets::table.order(assets::symbol.asc()).load(&mut conn)?;
        Ok(rows)
    }

    /// Record ingestion progress for a symbol.
    pub fn set_download_progress(&self, symbol: &str, percentage: f64) -> Result<()> {
        let mut conn = self.conn()?;
        let updated = diesel::update(assets::table.filter(assets::symbol.eq(symbol)))
            .set(assets::percentage_downloaded.eq(percentage))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(Error::Database(diesel::result::Error::NotFound));
        }
        Ok(())
    }

    /// Record the outcome of a dividend check for a symbol.
    pub fn mark_dividend_checked(&self, symbol: &str, pays_dividend: bool) -> Result<()> {
        let mut conn = self.conn()?;
        let updated = diesel::update(assets::table.filter(assets::symbol.eq(symbol)))
            .set((
                assets::dividend.eq(pays_dividend),
                assets::dividend_checked.eq(true),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(Error::Database(diesel::result::Error::NotFound));
        }
        Ok(())
    }

    /// Link an asset to a market day it traded on.
    pub fn link_market_day(&self, asset_id: i32, market_day_id: i32) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(assets_market_days::table)
            .values((
                assets_market_days::asset_id.eq(asset_id),
                assets_market_days::market_day_id.eq(market_day_id),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    /// Dates of the market days linked to an asset, ascending.
    pub fn market_days_for(&self, asset_id: i32) -> Result<Vec<NaiveDate>> {
        let mut conn = self.conn()?;
        let day_ids = assets_market_days::table
            .filter(assets_market_days::asset_id.eq(asset_id))
            .select(assets_market_days::market_day_id);
        let dates = market_days::table
            .filter(market_days::id.eq_any(day_ids))
            .order(market_days::date.asc())
            .select(market_days::date)
            .load(&mut conn)?;
        Ok(dates)
    }
}
