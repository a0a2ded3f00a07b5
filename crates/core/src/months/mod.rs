use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A calendar month, identified by its (year, 1-12 month) pair.
///
/// Field order matters: the derived `Ord` compares year first, then month,
/// which is chronological order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    /// Builds a month reference, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::validation(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(MonthRef { year, month })
    }

    /// The wall-clock month at the time of the call.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        MonthRef {
            year: today.year(),
            month: today.month(),
        }
    }

    /// The preceding calendar month; January rolls to December of year-1.
    pub fn previous(&self) -> MonthRef {
        if self.month == 1 {
            MonthRef {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthRef {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The following calendar month; December rolls to January of year+1.
    pub fn next(&self) -> MonthRef {
        if self.month == 12 {
            MonthRef {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthRef {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn is_current(&self) -> bool {
        *self == MonthRef::current()
    }

    /// The next month for navigation purposes. Navigating past the current
    /// month is not allowed, so this is `None` once the current month is
    /// reached.
    pub fn next_navigable(&self) -> Option<MonthRef> {
        if *self >= MonthRef::current() {
            None
        } else {
            Some(self.next())
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // month is validated at construction, 1..=12 always yields a date
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated month out of range")
    }

    /// Last day of the month, correct across month lengths and leap years.
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// `YYYY-MM` key, matching the lexicographic ordering of ISO dates.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for MonthRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
