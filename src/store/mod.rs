//! Typed store accessors over the market-data schema.
//!
//! One store per entity family, each holding a connection pool. Stores
//! surface constraint violations from the storage engine; they never
//! re-implement the schema's constraints, retry, or swallow errors.

pub mod assets;
pub mod bars;
pub mod dividends;
pub mod events;
pub mod market_days;
pub mod stats;

pub use assets::SqliteAssetStore;
pub use bars::SqliteBarStore;
pub use dividends::SqliteDividendStore;
pub use events::SqliteEventStore;
pub use market_days::{SqliteHolidayStore, SqliteMarketDayStore};
pub use stats::SqliteStatsStore;
