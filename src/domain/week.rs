use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Week identifier used by the weekly view.
///
/// `week` follows strftime's `%U`: weeks start on Sunday and the days before
/// the first Sunday of the year are week 0. The calendar year is kept next
/// to it so the same week number in two different years never collapses
/// into one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let days_from_sunday = date.weekday().num_days_from_sunday();
        Self {
            year: date.year(),
            week: (date.ordinal0() + 7 - days_from_sunday) / 7,
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}
