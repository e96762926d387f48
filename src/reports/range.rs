//! Inclusive date-range filtering.

use crate::types::{Order, Timestamp, Transaction};
use chrono::{Duration, NaiveDate};

/// Records carrying the timestamp reports filter on.
pub trait Dated {
    fn date(&self) -> Timestamp;
}

impl Dated for Order {
    fn date(&self) -> Timestamp {
        self.created_at
    }
}

impl Dated for Transaction {
    fn date(&self) -> Timestamp {
        self.date
    }
}

/// Inclusive bounds. A missing bound is open in that direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn between(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Calendar dates in UTC, each taken at midnight.
    ///
    /// The end bound is the first instant of `end`, so records later that
    /// day fall outside. See [`DateRange::whole_days`] to include them.
    pub fn days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(start_of_day),
            end: end.map(start_of_day),
        }
    }

    /// Like [`DateRange::days`], but running to the last millisecond of `end`.
    pub fn whole_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(start_of_day),
            end: end.map(|d| {
                let last = start_of_day(d).0 + Duration::days(1) - Duration::milliseconds(1);
                Timestamp(last)
            }),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start.map_or(true, |s| ts >= s) && self.end.map_or(true, |e| ts <= e)
    }

    /// Items inside the range, order preserved.
    pub fn filter<T: Dated + Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.contains(item.date()))
            .cloned()
            .collect()
    }
}

fn start_of_day(date: NaiveDate) -> Timestamp {
    Timestamp(date.and_time(chrono::NaiveTime::MIN).and_utc())
}
