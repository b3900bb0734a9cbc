//! SQLite event store.
//!
//! Events are detected occurrence windows over one asset's bars. Bars are
//! linked through the `event_stocks` association table. Whether a linked
//! bar actually falls inside the event window is an application-level
//! invariant the schema does not enforce; out-of-window links are accepted
//! but logged.

use diesel::prelude::*;
use tracing::warn;

use crate::db::connection::{DbConn, DbPool};
use crate::db::model::{EventRow, NewEventRow, StockRow};
use crate::db::schema::{event_stocks, events, stocks};
use crate::error::{Error, Result};

/// SQLite-backed store for detected events.
pub struct SqliteEventStore {
    pool: DbPool,
}

impl SqliteEventStore {
    /// Create a new event store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    /// Insert an event window. Fails with a foreign-key violation when
    /// `asset_id` does not reference an existing asset.
    pub fn insert(&self, event: &NewEventRow) -> Result<EventRow> {
        let mut conn = self.conn()?;
        diesel::insert_into(events::table)
            .values(event)
            .execute(&mut conn)?;
        let row = events::table.order(events::id.desc()).first(&mut conn)?;
        Ok(row)
    }

    /// Events for one asset, ascending by start date.
    pub fn for_asset(&self, asset_id: i32) -> Result<Vec<EventRow>> {
        let mut conn = self.conn()?;
        let rows = events::table
            .filter(events::asset_id.eq(asset_id))
            .order(events::start_date.asc())
            .load(&mut conn)?;
        Ok(rows)
    }

    /// Link a bar to an event.
    ///
    /// Fails with a foreign-key violation when either id is dangling and
    /// with a unique violation when the link already exists.
    pub fn attach_bar(&self, event: &EventRow, bar: &StockRow) -> Result<()> {
        if bar.date < event.start_date || bar.date > event.end_date {
            warn!(
                event_id = event.id,
                bar_id = bar.id,
                bar_date = %bar.date,
                window_start = %event.start_date,
                window_end = %event.end_date,
                "attaching bar outside event window"
            );
        }
        let mut conn = self.conn()?;
        diesel::insert_into(event_stocks::table)
            .values((
                event_stocks::event_id.eq(event.id),
                event_stocks::stock_id.eq(bar.id),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    /// Link several bars to an event.
    pub fn attach_bars(&self, event: &EventRow, bars: &[StockRow]) -> Result<()> {
        for bar in bars {
            self.attach_bar(event, bar)?;
        }
        Ok(())
    }

    /// Bars linked to an event, ascending by date.
    pub fn bars_for_event(&self, event_id: i32) -> Result<Vec<StockRow>> {
        let mut conn = self.conn()?;
        let bar_ids = event_stocks::table
            .filter(event_stocks::event_id.eq(event_id))
            .select(event_stocks::stock_id);
        let rows = stocks::table
            .filter(stocks::id.eq_any(bar_ids))
            .order(stocks::date.asc())
            .load(&mut conn)?;
        Ok(rows)
    }

    /// Events a bar participates in, ascending by start date.
    pub fn events_for_bar(&self, stock_id: i32) -> Result<Vec<EventRow>> {
        let mut conn = self.conn()?;
        let event_ids = event_stocks::table
            .filter(event_stocks::stock_id.eq(stock_id))
            .select(event_stocks::event_id);
        let rows = events::table
            .filter(events::id.eq_any(event_ids))
            .order(events::start_date.asc())
            .load(&mut conn)?;
        Ok(rows)
    }
}
