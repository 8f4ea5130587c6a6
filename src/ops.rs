use chrono::{Datelike, NaiveDate};
use rand::{seq::IndexedRandom, Rng};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use tracing::{debug, info};

use crate::{
    calendar::MonthWalker,
    errors::Error,
    types::{
        CatalogEntry, GeneratorConfig, RecurringEntry, Transaction, TransactionType,
        DECIMAL_SCALE,
    },
};

impl Transaction {
    fn recurring(config: &GeneratorConfig, entry: &RecurringEntry, date: NaiveDate) -> Self {
        let mut amount = entry.amount;
        amount.rescale(DECIMAL_SCALE);
        Self {
            date,
            amount,
            currency: config.currency.clone(),
            transaction_type: entry.transaction_type,
            account: entry.account.clone(),
            iban: entry.iban.clone(),
            payer_reference: entry.payer_reference.clone(),
            beneficiary_info: entry.beneficiary_info.clone(),
            category: entry.category.clone(),
        }
    }

    fn purchase(
        config: &GeneratorConfig,
        entry: &CatalogEntry,
        date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            date,
            amount,
            currency: config.currency.clone(),
            transaction_type: TransactionType::Debit,
            account: None,
            iban: None,
            payer_reference: entry.name.clone(),
            beneficiary_info: String::new(),
            category: entry.category.clone(),
        }
    }
}

/// Resolves `day` within the month starting at `month`.
/// # Errors
/// [`Error::InvalidDay`] if the month is too short; the day is never clamped
fn day_in_month(month: NaiveDate, day: u32) -> Result<NaiveDate, Error> {
    month.with_day(day).ok_or(Error::InvalidDay {
        year: month.year(),
        month: month.month(),
        day,
    })
}

/// Emits one record per configured recurring entry for the month starting at `month`,
/// in configuration order.
pub(crate) fn recurring_entries(
    config: &GeneratorConfig,
    month: NaiveDate,
) -> Result<Vec<Transaction>, Error> {
    config
        .recurring
        .iter()
        .map(|entry| {
            let date = day_in_month(month, entry.day)?;
            Ok(Transaction::recurring(config, entry, date))
        })
        .collect()
}

/// Draws an amount uniformly from the entry's range, rounded to cents.
///
/// Both bounds are whole cents (checked by [`GeneratorConfig::validate`]), so
/// rounding never leaves the range.
fn draw_amount<R>(entry: &CatalogEntry, rng: &mut R) -> Decimal
where
    R: Rng + ?Sized,
{
    let lo = entry.min.to_f64().unwrap_or_default();
    let hi = entry.max.to_f64().unwrap_or(lo).max(lo);
    let drawn = rng.random_range(lo..=hi);
    let mut amount = Decimal::from_f64_retain(drawn)
        .unwrap_or(entry.min)
        .round_dp(DECIMAL_SCALE);
    amount.rescale(DECIMAL_SCALE);
    amount
}

/// Draws the purchase count for the month, then that many independent purchases.
///
/// Merchants are picked with replacement; days come from `1..=purchase_day_cap`.
/// Purchases are left in draw order, not sorted by date.
pub(crate) fn purchase_entries<R>(
    config: &GeneratorConfig,
    month: NaiveDate,
    rng: &mut R,
) -> Result<Vec<Transaction>, Error>
where
    R: Rng + ?Sized,
{
    let count = rng.random_range(config.purchases_per_month.clone());
    let mut purchases = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let entry = config.catalog.choose(rng).ok_or(Error::EmptyCatalog)?;
        let amount = draw_amount(entry, rng);
        let day = rng.random_range(1..=config.purchase_day_cap);
        let date = day_in_month(month, day)?;
        purchases.push(Transaction::purchase(config, entry, date, amount));
    }
    Ok(purchases)
}

/// Walks every month of the configured range and collects its records:
/// recurring entries first, then that month's purchases.
///
/// Records that fall outside `[start, end]` (only possible when the range
/// starts or ends mid-month) are dropped.
pub(crate) fn generate<R>(config: &GeneratorConfig, rng: &mut R) -> Result<Vec<Transaction>, Error>
where
    R: Rng + ?Sized,
{
    config.validate()?;
    let in_range = |txn: &Transaction| (config.start..=config.end).contains(&txn.date);

    let mut transactions = Vec::new();
    let mut months = 0;
    for month in MonthWalker::new(config.start, config.end) {
        let recurring = recurring_entries(config, month)?;
        let purchases = purchase_entries(config, month, rng)?;
        debug!(
            month = %month.format("%Y-%m"),
            recurring = recurring.len(),
            purchases = purchases.len(),
            "generated month"
        );
        transactions.extend(recurring.into_iter().filter(in_range));
        transactions.extend(purchases.into_iter().filter(in_range));
        months += 1;
    }
    info!(
        months,
        records = transactions.len(),
        start = %config.start,
        end = %config.end,
        "generated transactions"
    );
    Ok(transactions)
}
