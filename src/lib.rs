//! Stockdata - relational schema and trading calendar for equities
//! market data.
//!
//! This crate declares the persistent schema for daily price bars,
//! dividends, tracked assets, detected events, market calendars, and
//! derived statistics, and provides typed store accessors plus a cached
//! trading calendar built from the holiday table.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files with a
//!   `DATABASE_URL` environment override
//! - [`db`] - Connection pooling, embedded migrations, schema, and row
//!   types
//! - [`store`] - Typed accessors, one per entity family; constraint
//!   violations surface from the storage engine
//! - [`calendar`] - [`calendar::TradingCalendar`] and the process-wide
//!   cached factory [`calendar::trading_calendar`]
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use stockdata::calendar::trading_calendar;
//! use stockdata::config::Config;
//! use stockdata::db::connection::{create_pool, run_migrations};
//!
//! fn main() -> stockdata::error::Result<()> {
//!     let config = Config::load("stockdata.toml")?;
//!     config.init_logging();
//!
//!     let pool = create_pool(&config.database.url)?;
//!     run_migrations(&pool)?;
//!
//!     let calendar = trading_calendar(&pool)?;
//!     let today = chrono::NaiveDate::from_ymd_opt(2024, 7, 3).unwrap();
//!     if calendar.is_trading_day(today) {
//!         println!("next session: {:?}", calendar.next_trading_day(today));
//!     }
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod config;
pub mod db;
pub mod error;
pub mod store;
