use chrono::{Days, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_RANGE_DAYS: u32 = 7;

/// Inclusive calendar range, `start <= end` by construction.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(try_from = "RangeBounds")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RangeBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RangeBounds> for DateRange {
    type Error = LedgerError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        DateRange::new(bounds.start, bounds.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if end < start {
            return Err(LedgerError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// The `days` days ending with `today`, both ends included.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let back = u64::from(days.max(1) - 1);
        let start = today.checked_sub_days(Days::new(back)).unwrap_or(today);
        DateRange { start, end: today }
    }

    /// Builds a range from optional `YYYY-MM-DD` bounds.
    ///
    /// A missing or unparsable bound falls back to the default window of
    /// [`DEFAULT_RANGE_DAYS`] days ending with `today`.
    pub fn resolve(
        today: NaiveDate,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, LedgerError> {
        let default = DateRange::last_days(today, DEFAULT_RANGE_DAYS);
        let start = parse_bound("start", start).unwrap_or(default.start);
        let end = parse_bound("end", end).unwrap_or(default.end);
        DateRange::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }
}

fn parse_bound(name: &str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value?;
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("Ignoring {} date {:?}: {}", name, value, err);
            None
        }
    }
}
