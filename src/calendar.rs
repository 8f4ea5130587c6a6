//! Month-by-month walk over a date range

use std::iter::FusedIterator;

use chrono::{Datelike, Months, NaiveDate};

/// Yields the first day of every month that overlaps `[start, end]`, in order.
///
/// The walk always steps from the first of one month to the first of the next,
/// so month lengths never cause a month to be skipped or repeated. Once
/// exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct MonthWalker {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl MonthWalker {
    /// Creates a walker over every month touched by `start..=end`.
    /// Yields nothing if `start` is after `end`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let cursor = (start <= end).then(|| first_of_month(start));
        Self { cursor, end }
    }
}

impl Iterator for MonthWalker {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        if current > self.end {
            return None;
        }
        self.cursor = current.checked_add_months(Months::new(1));
        Some(current)
    }
}

impl FusedIterator for MonthWalker {}

/// Returns the first day of the month containing `date`
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
