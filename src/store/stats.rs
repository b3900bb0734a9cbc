//! SQLite store for derived statistics: risk/reward snapshots and
//! pairwise correlations.

use diesel::prelude::*;

use crate::db::connection::{DbConn, DbPool};
use crate::db::model::{CorrelationRow, NewCorrelationRow, NewRiskRewardRow, RiskRewardRow};
use crate::db::schema::{correlations, risk_reward};
use crate::error::{Error, Result};

/// SQLite-backed store for derived statistics.
pub struct SqliteStatsStore {
    pool: DbPool,
}

impl SqliteStatsStore {
    /// Create a new stats store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    /// Insert a risk/reward snapshot.
    pub fn insert_risk_reward(&self, row: &NewRiskRewardRow) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(risk_reward::table)
            .values(row)
            .execute(&mut conn)?;
        Ok(())
    }

    /// The most recent risk/reward snapshot for a symbol, by `last_update`.
    pub fn latest_for_symbol(&self, symbol: &str) -> Result<Option<RiskRewardRow>> {
        let mut conn = self.conn()?;
        let row = risk_reward::table
            .filter(risk_reward::symbol.eq(symbol))
            .order(risk_reward::last_update.desc())
            .first(&mut conn)
            .optional()?;
        Ok(row)
    }

    /// Insert a correlation pair.
    pub fn insert_correlation(&self, row: &NewCorrelationRow) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(correlations::table)
            .values(row)
            .execute(&mut conn)?;
        Ok(())
    }

    /// The correlation recorded between two symbols, in either order.
    pub fn correlation_between(&self, a: &str, b: &str) -> Result<Option<CorrelationRow>> {
        let mut conn = self.conn()?;
        let row = correlations::table
            .filter(
                correlations::left
                    .eq(a)
                    .and(correlations::right.eq(b))
                    .or(correlations::left.eq(b).and(correlations::right.eq(a))),
            )
            .first(&mut conn)
            .optional()?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_util::setup_test_db;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn pending_snapshot_roundtrips_with_null_statistics() {
        let store = SqliteStatsStore::new(setup_test_db());
        store
            .insert_risk_reward(&NewRiskRewardRow::pending("AAPL", ts(2024, 6, 3, 12)))
            .unwrap();

        let row = store.latest_for_symbol("AAPL").unwrap().unwrap();
        assert_eq!(row.symbol, "AAPL");
        assert_eq!(row.last_update, ts(2024, 6, 3, 12));
        assert!(row.win_rate.is_none());
        assert!(row.avg_dividend.is_none());
        assert!(row.portion_to_risk.is_none());
    }

    #[test]
    fn latest_follows_last_update() {
        let store = SqliteStatsStore::new(setup_test_db());

        let mut early = NewRiskRewardRow::pending("AAPL", ts(2024, 6, 3, 9));
        early.win_rate = Some(0.52);
        let mut late = NewRiskRewardRow::pending("AAPL", ts(2024, 6, 3, 17));
        late.win_rate = Some(0.61);

        // Insertion order must not matter.
        store.insert_risk_reward(&late).unwrap();
        store.insert_risk_reward(&early).unwrap();

        let row = store.latest_for_symbol("AAPL").unwrap().unwrap();
        assert_eq!(row.win_rate, Some(0.61));
        assert!(store.latest_for_symbol("MSFT").unwrap().is_none());
    }

    #[test]
    fn correlation_lookup_is_symmetric() {
        let store = SqliteStatsStore::new(setup_test_db());
        store
            .insert_correlation(&NewCorrelationRow {
                left: "AAPL".to_string(),
                right: "MSFT".to_string(),
                correlation: 0.83,
            })
            .unwrap();

        let forward = store.correlation_between("AAPL", "MSFT").unwrap().unwrap();
        let backward = store.correlation_between("MSFT", "AAPL").unwrap().unwrap();
        assert_eq!(forward.id, backward.id);
        assert_eq!(forward.correlation, 0.83);
        assert!(store.correlation_between("AAPL", "NVDA").unwrap().is_none());
    }
}
