//! Common datatypes supporting functions throughout the transaction generator

use std::{fmt::Display, ops::RangeInclusive};

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{errors::Error, ops};

/// The number of decimals kept for all amounts
pub const DECIMAL_SCALE: u32 = 2;

/// Currency stamped on every generated transaction
pub const CURRENCY: &str = "EUR";

/// Placeholder IBAN used by the recurring transfers
pub const FAKE_IBAN: &str = "SK0000000000000000000000";

/// Account the salary comes from
pub const ACCOUNT_IN: &str = "ACC-100001";

/// Account the rent goes to
pub const ACCOUNT_OUT: &str = "ACC-200001";

/// Highest day of month that exists in every month
pub const MAX_SAFE_DAY: u32 = 28;

/// Direction of a transaction, from the account holder's point of view
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Money coming in
    Credit,
    /// Money going out
    Debit,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Credit => f.write_str("Credit"),
            TransactionType::Debit => f.write_str("Debit"),
        }
    }
}

/// A single synthesized bank transaction.
///
/// Value date always equals the posting date, so only one date is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    pub(crate) currency: String,
    pub(crate) transaction_type: TransactionType,
    pub(crate) account: Option<String>,
    pub(crate) iban: Option<String>,
    pub(crate) payer_reference: String,
    pub(crate) beneficiary_info: String,
    pub(crate) category: String,
}

impl Transaction {
    /// Returns the posting date
    #[must_use]
    #[inline]
    pub fn posting_date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the value date, which is always the posting date
    #[must_use]
    #[inline]
    pub fn value_date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the (always positive) amount
    #[must_use]
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency code
    #[must_use]
    #[inline]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns whether this is a credit or a debit
    #[must_use]
    #[inline]
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// Returns the counterparty account number, if any
    #[must_use]
    #[inline]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Returns the counterparty IBAN, if any
    #[must_use]
    #[inline]
    pub fn iban(&self) -> Option<&str> {
        self.iban.as_deref()
    }

    /// Returns the payer's reference; the merchant name for purchases
    #[must_use]
    #[inline]
    pub fn payer_reference(&self) -> &str {
        &self.payer_reference
    }

    /// Returns the information for beneficiary
    #[must_use]
    #[inline]
    pub fn beneficiary_info(&self) -> &str {
        &self.beneficiary_info
    }

    /// Returns the category label, written to the "Description" column
    #[must_use]
    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// A merchant that purchases can be drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display name, used as the payer's reference
    pub name: String,
    /// Smallest amount a purchase can have
    pub min: Decimal,
    /// Largest amount a purchase can have
    pub max: Decimal,
    /// Category label
    pub category: String,
}

impl CatalogEntry {
    /// Creates an entry with the range given in cents
    #[must_use]
    pub fn new(name: &str, min_cents: i64, max_cents: i64, category: &str) -> Self {
        Self {
            name: name.to_owned(),
            min: Decimal::new(min_cents, DECIMAL_SCALE),
            max: Decimal::new(max_cents, DECIMAL_SCALE),
            category: category.to_owned(),
        }
    }
}

/// A transaction that happens every month on a fixed day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringEntry {
    /// Day of month; must exist in every generated month
    pub day: u32,
    /// Exact amount, the same every month
    pub amount: Decimal,
    /// Credit or debit
    pub transaction_type: TransactionType,
    /// Counterparty account number
    pub account: Option<String>,
    /// Counterparty IBAN
    pub iban: Option<String>,
    /// Payer's reference column
    pub payer_reference: String,
    /// Information for beneficiary column
    pub beneficiary_info: String,
    /// Category label
    pub category: String,
}

/// Everything the generator needs to know, fixed before generation starts.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// First day that may carry a transaction
    pub start: NaiveDate,
    /// Last day that may carry a transaction
    pub end: NaiveDate,
    /// Currency code stamped on every transaction
    pub currency: String,
    /// Emitted in this order at the start of every month
    pub recurring: Vec<RecurringEntry>,
    /// Merchants purchases are drawn from, with replacement
    pub catalog: Vec<CatalogEntry>,
    /// Inclusive range the monthly purchase count is drawn from
    pub purchases_per_month: RangeInclusive<u32>,
    /// Purchases land on days `1..=purchase_day_cap`. Capped at 28 so that
    /// every drawn day exists, which leaves the tail of longer months empty.
    pub purchase_day_cap: u32,
}

impl GeneratorConfig {
    /// Default configuration covering January 1 through December 31 of `year`
    /// # Errors
    /// [`Error::InvalidYear`] if either end of the year is outside chrono's date range
    pub fn for_year(year: i32) -> Result<Self, Error> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(Error::InvalidYear(year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(Error::InvalidYear(year))?;
        Ok(Self::with_range(start, end))
    }

    /// Default recurring entries and catalog over `[start, end]`
    #[must_use]
    pub fn with_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            currency: CURRENCY.to_owned(),
            recurring: default_recurring(),
            catalog: default_catalog(),
            purchases_per_month: 60..=90,
            purchase_day_cap: MAX_SAFE_DAY,
        }
    }

    /// Generates every transaction in `[start, end]`, month by month, drawing
    /// all randomness from `rng`. The same seed gives the same transactions.
    /// # Errors
    /// Any validation error from [`GeneratorConfig::validate`], or
    /// [`Error::InvalidDay`] if a recurring entry's day is missing from a month
    pub fn generate<R>(&self, rng: &mut R) -> Result<Vec<Transaction>, Error>
    where
        R: Rng + ?Sized,
    {
        ops::generate(self, rng)
    }

    /// Checks the configuration before anything is generated.
    /// # Errors
    /// [`Error::InvalidRange`], [`Error::InvalidCatalogEntry`], [`Error::EmptyCatalog`],
    /// [`Error::InvalidPurchaseCount`] or [`Error::InvalidDayCap`]
    pub fn validate(&self) -> Result<(), Error> {
        if self.start > self.end {
            return Err(Error::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        let (lo, hi) = (
            *self.purchases_per_month.start(),
            *self.purchases_per_month.end(),
        );
        if lo > hi {
            return Err(Error::InvalidPurchaseCount(lo, hi));
        }
        if !(1..=MAX_SAFE_DAY).contains(&self.purchase_day_cap) {
            return Err(Error::InvalidDayCap(self.purchase_day_cap));
        }
        if hi > 0 && self.catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        let whole_cents = |amount: Decimal| amount.normalize().scale() <= DECIMAL_SCALE;
        for entry in &self.catalog {
            if entry.min <= Decimal::ZERO
                || entry.min > entry.max
                || !whole_cents(entry.min)
                || !whole_cents(entry.max)
            {
                return Err(Error::InvalidCatalogEntry(entry.name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    /// The current local year
    fn default() -> Self {
        let today = Local::now().date_naive();
        let start = today.with_ordinal(1).unwrap_or(today);
        let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
        Self::with_range(start, end)
    }
}

/// Salary, rent and the streaming subscription
fn default_recurring() -> Vec<RecurringEntry> {
    vec![
        RecurringEntry {
            day: 5,
            amount: Decimal::new(1450_00, DECIMAL_SCALE),
            transaction_type: TransactionType::Credit,
            account: Some(ACCOUNT_IN.to_owned()),
            iban: Some(FAKE_IBAN.to_owned()),
            payer_reference: "Salary".to_owned(),
            beneficiary_info: "Employer s.r.o.".to_owned(),
            category: "Salary".to_owned(),
        },
        RecurringEntry {
            day: 6,
            amount: Decimal::new(420_00, DECIMAL_SCALE),
            transaction_type: TransactionType::Debit,
            account: Some(ACCOUNT_OUT.to_owned()),
            iban: Some(FAKE_IBAN.to_owned()),
            payer_reference: "Monthly rent".to_owned(),
            beneficiary_info: "Rental Services".to_owned(),
            category: "Rent".to_owned(),
        },
        RecurringEntry {
            day: 20,
            amount: Decimal::new(14_99, DECIMAL_SCALE),
            transaction_type: TransactionType::Debit,
            account: None,
            iban: None,
            payer_reference: "Spotify subscription".to_owned(),
            beneficiary_info: String::new(),
            category: "Subscription".to_owned(),
        },
    ]
}

fn default_catalog() -> Vec<CatalogEntry> {
    const MERCHANTS: &[(&str, i64, i64, &str)] = &[
        ("Lidl Bratislava", 5_00, 35_00, "Groceries"),
        ("Tesco Bratislava", 6_00, 45_00, "Groceries"),
        ("Kaufland", 8_00, 55_00, "Groceries"),
        ("Billa", 5_00, 35_00, "Groceries"),
        ("Yeme (delikatesy)", 10_00, 60_00, "Groceries"),
        ("Bistro/Obed menu", 5_00, 14_00, "Dining"),
        ("Restaurant Bratislava", 12_00, 55_00, "Dining"),
        ("McDonald's", 6_00, 18_00, "Dining"),
        ("Kaviareň", 3_00, 10_00, "Coffee"),
        ("OMV", 35_00, 85_00, "Fuel"),
        ("Shell", 35_00, 90_00, "Fuel"),
        ("Slovnaft", 30_00, 80_00, "Fuel"),
        ("MHD lístok", 90, 1_20, "Transport"),
        ("Bolt / Uber", 4_00, 18_00, "Transport"),
        ("Železničný lístok", 3_00, 25_00, "Transport"),
        ("Cinema", 7_00, 18_00, "Entertainment"),
        ("Concert ticket", 15_00, 60_00, "Entertainment"),
        ("Steam games", 5_00, 60_00, "Entertainment"),
        // Occasional extra subscription on top of the fixed one
        ("Netflix", 7_00, 14_00, "Subscription"),
        ("Lekáreň", 3_00, 25_00, "Health"),
        ("Drogéria (DM)", 4_00, 30_00, "Health"),
        ("Clothing store", 20_00, 120_00, "Clothing"),
        ("Sports store", 15_00, 120_00, "Shopping"),
        ("Electronics store", 30_00, 250_00, "Electronics"),
        ("Alza", 20_00, 220_00, "Electronics"),
        ("IKEA", 10_00, 180_00, "Home"),
        ("Hobby market", 5_00, 120_00, "Home"),
        ("Haircut / Barber", 8_00, 25_00, "Services"),
        ("Gym entry", 5_00, 20_00, "Fitness"),
    ];
    MERCHANTS
        .iter()
        .map(|&(name, min, max, category)| CatalogEntry::new(name, min, max, category))
        .collect()
}
