//! Trading calendar built from the holiday table.
//!
//! [`TradingCalendar`] answers which dates the market trades on: a date is
//! a trading day when it falls on a workday (Monday through Friday by
//! default) and is not a holiday. [`trading_calendar`] caches one instance
//! for the lifetime of the process; holidays inserted after the first call
//! are not reflected until restart.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use diesel::prelude::*;
use parking_lot::Mutex;
use tracing::debug;

use crate::db::connection::DbPool;
use crate::db::schema::holidays;
use crate::error::{Error, Result};

/// A set of workdays plus a set of excluded holiday dates.
#[derive(Debug, Clone)]
pub struct TradingCalendar {
    // Indexed by Weekday::num_days_from_monday.
    workdays: [bool; 7],
    holidays: BTreeSet<NaiveDate>,
}

impl TradingCalendar {
    /// A Monday-through-Friday calendar excluding the given holidays.
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::with_workdays(
            &[
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            holidays,
        )
    }

    /// A calendar with an explicit workday set.
    pub fn with_workdays(
        workdays: &[Weekday],
        holidays: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        let mut days = [false; 7];
        for day in workdays {
            days[day.num_days_from_monday() as usize] = true;
        }
        Self {
            workdays: days,
            holidays: holidays.into_iter().collect(),
        }
    }

    /// True when the date falls on a workday and is not a holiday.
    #[must_use]
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        self.workdays[date.weekday().num_days_from_monday() as usize]
            && !self.holidays.contains(&date)
    }

    /// The first trading day strictly after `date`.
    ///
    /// `None` when the workday set is empty or the calendar range of
    /// `NaiveDate` is exhausted.
    #[must_use]
    pub fn next_trading_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        if !self.workdays.contains(&true) {
            return None;
        }
        let mut day = date.checked_add_days(Days::new(1))?;
        loop {
            if self.is_trading_day(day) {
                return Some(day);
            }
            day = day.checked_add_days(Days::new(1))?;
        }
    }

    /// The last trading day strictly before `date`.
    ///
    /// `None` when the workday set is empty or the calendar range of
    /// `NaiveDate` is exhausted.
    #[must_use]
    pub fn prev_trading_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        if !self.workdays.contains(&true) {
            return None;
        }
        let mut day = date.checked_sub_days(Days::new(1))?;
        loop {
            if self.is_trading_day(day) {
                return Some(day);
            }
            day = day.checked_sub_days(Days::new(1))?;
        }
    }

    /// Number of trading days in `[start, end]`, inclusive on both ends.
    ///
    /// Zero when `start > end`.
    #[must_use]
    pub fn trading_days_between(&self, start: NaiveDate, end: NaiveDate) -> usize {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_trading_day(*d))
            .count()
    }

    /// The excluded holiday dates.
    #[must_use]
    pub fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }
}

static CALENDAR: OnceLock<TradingCalendar> = OnceLock::new();
static CALENDAR_INIT: Mutex<()> = Mutex::new(());

/// Build a calendar from the holiday table, bypassing the process cache.
///
/// # Errors
/// Returns an error if a connection cannot be acquired or the holiday
/// query fails.
pub fn load_trading_calendar(pool: &DbPool) -> Result<TradingCalendar> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    let dates: Vec<NaiveDate> = holidays::table.select(holidays::date).load(&mut conn)?;
    debug!(holidays = dates.len(), "building trading calendar");
    Ok(TradingCalendar::new(dates))
}

/// The process-wide trading calendar.
///
/// The first call queries all holiday dates and builds the calendar; every
/// later call returns the same instance without touching storage,
/// whichever pool it is handed. Initialization is guarded so concurrent
/// first calls construct exactly once. A storage failure propagates and
/// leaves the cache empty, so a later call may retry.
///
/// # Errors
/// Returns an error if the first-time holiday query fails.
pub fn trading_calendar(pool: &DbPool) -> Result<&'static TradingCalendar> {
    if let Some(calendar) = CALENDAR.get() {
        return Ok(calendar);
    }
    let _guard = CALENDAR_INIT.lock();
    if let Some(calendar) = CALENDAR.get() {
        return Ok(calendar);
    }
    let calendar = load_trading_calendar(pool)?;
    Ok(CALENDAR.get_or_init(|| calendar))
}
