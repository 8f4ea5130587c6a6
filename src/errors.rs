use chrono::NaiveDate;

/// Error type that can be returned by fallible operations in this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error writing CSV output; could wrap IO or serialization errors
    #[error("Error writing CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Error opening or flushing the output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A recurring entry is configured for a day that the month doesn't have.
    /// The day is never clamped to the end of the month.
    #[error("Day {day} does not exist in {year}-{month:02}")]
    InvalidDay {
        /// Calendar year of the offending month
        year: i32,
        /// Calendar month (1-12)
        month: u32,
        /// The configured day of month
        day: u32,
    },
    /// The configured start date is after the end date
    #[error("Start date {start} is after end date {end}")]
    InvalidRange {
        /// First day of the generated range
        start: NaiveDate,
        /// Last day of the generated range
        end: NaiveDate,
    },
    /// The requested year can't be represented as a calendar date
    #[error("Year {0} is outside the supported date range")]
    InvalidYear(i32),
    /// A catalog entry has a non-positive minimum, a minimum above its maximum,
    /// or bounds finer than whole cents
    #[error("Catalog entry {0:?} has an invalid amount range")]
    InvalidCatalogEntry(String),
    /// Purchases were requested but there is nothing to draw them from
    #[error("Merchant catalog is empty")]
    EmptyCatalog,
    /// The purchase count range is empty
    #[error("Purchase count range {0}..={1} is empty")]
    InvalidPurchaseCount(u32, u32),
    /// Purchase days must be drawn from a range valid in every month
    #[error("Purchase day cap {0} must be within 1..=28")]
    InvalidDayCap(u32),
    /// Malformed environment override
    #[error("Invalid environment configuration: {0}")]
    Config(#[from] envy::Error),
}
