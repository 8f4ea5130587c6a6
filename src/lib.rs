#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
/// Walking a date range one calendar month at a time
pub mod calendar;
/// Environment overrides for the command-line tool
pub mod config;
/// Error handling and custom [`Error`](std::error::Error) types
pub mod errors;
/// Formatting transactions and writing the CSV export
pub mod io;
/// Recurring and purchase generation
mod ops;
/// Data types and the generator configuration
pub mod types;
