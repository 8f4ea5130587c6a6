//! Helpers for formatting transactions and writing them out as a bank export

use std::{fs::File, io::Write, path::Path};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::{
    errors::Error,
    types::{Transaction, TransactionType, DECIMAL_SCALE},
};

/// Column names of the export, in output order
pub const HEADER: [&str; 15] = [
    "Posting date",
    "Value date",
    "Amount",
    "Currency",
    "Type",
    "Preffix",
    "Account Number",
    "Bank Code",
    "IBAN",
    "Variable symbol",
    "Specific symbol",
    "Constant symbol",
    "Payer's reference",
    "Information for beneficiary",
    "Description",
];

/// Renders a date as zero-padded `dd.mm.yyyy`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Renders an amount with two decimals and a comma separator, e.g. `1450,00`
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.*}", DECIMAL_SCALE as usize, amount).replace('.', ",")
}

/// One output row. Field order is column order; columns the generator never
/// fills are kept as empty strings so every row has all 15 fields.
#[derive(Serialize, Debug)]
struct TransactionRow<'a> {
    posting_date: String,
    value_date: String,
    amount: String,
    currency: &'a str,
    transaction_type: TransactionType,
    prefix: &'a str,
    account_number: &'a str,
    bank_code: &'a str,
    iban: &'a str,
    variable_symbol: &'a str,
    specific_symbol: &'a str,
    constant_symbol: &'a str,
    payer_reference: &'a str,
    beneficiary_info: &'a str,
    description: &'a str,
}

impl<'a> From<&'a Transaction> for TransactionRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            posting_date: format_date(txn.posting_date()),
            value_date: format_date(txn.value_date()),
            amount: format_amount(txn.amount()),
            currency: txn.currency(),
            transaction_type: txn.transaction_type(),
            prefix: "",
            account_number: txn.account().unwrap_or_default(),
            bank_code: "",
            iban: txn.iban().unwrap_or_default(),
            variable_symbol: "",
            specific_symbol: "",
            constant_symbol: "",
            payer_reference: txn.payer_reference(),
            beneficiary_info: txn.beneficiary_info(),
            description: txn.category(),
        }
    }
}

/// Writes the header and then every transaction, in the order given.
///
/// Output looks like:
/// ```csv
/// Posting date,Value date,Amount,Currency,Type,Preffix,Account Number,...
/// 05.01.2024,05.01.2024,"1450,00",EUR,Credit,,ACC-100001,,SK00...,,,,Salary,Employer s.r.o.,Salary
/// ```
pub fn write_transactions_to_csv<'a, W, I>(writer: &mut W, transactions: I) -> Result<usize, Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    let mut rows = 0;
    for transaction in transactions {
        csv_writer.serialize(TransactionRow::from(transaction))?;
        rows += 1;
    }
    csv_writer.flush()?;
    Ok(rows)
}

/// Creates (or truncates) the file at `path` and writes the export into it.
///
/// The file is closed when this returns, whether or not writing succeeded.
/// Nothing already written is cleaned up on failure.
pub fn write_transactions_to_path<'a, I>(path: &Path, transactions: I) -> Result<usize, Error>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut file = File::create(path)?;
    let rows = write_transactions_to_csv(&mut file, transactions)?;
    info!(path = %path.display(), rows, "wrote transactions");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use csv::StringRecord;
    use rand::{rngs::StdRng, SeedableRng};
    use rust_decimal_macros::dec;

    use crate::types::GeneratorConfig;

    use super::*;

    fn read_records(output: &[u8]) -> Vec<StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(output))
            .records()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05.03.2024");
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_date(date), "31.12.2024");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1450)), "1450,00");
        assert_eq!(format_amount(dec!(420.00)), "420,00");
        assert_eq!(format_amount(dec!(14.99)), "14,99");
        assert_eq!(format_amount(dec!(0.9)), "0,90");
        assert_eq!(format_amount(dec!(12345.67)), "12345,67");
    }

    #[test]
    fn test_every_row_has_fifteen_fields() {
        let config = GeneratorConfig::for_year(2024).unwrap();
        let transactions = config.generate(&mut StdRng::seed_from_u64(1)).unwrap();
        let mut output = vec![];
        let rows = write_transactions_to_csv(&mut output, &transactions).unwrap();
        assert_eq!(rows, transactions.len());

        let records = read_records(&output);
        assert_eq!(records.len(), transactions.len() + 1);
        assert_eq!(records[0], StringRecord::from(HEADER.to_vec()));
        for record in &records {
            assert_eq!(record.len(), 15);
        }
    }

    #[test]
    fn test_recurring_rows() {
        let config = GeneratorConfig::for_year(2024).unwrap();
        let transactions = config.generate(&mut StdRng::seed_from_u64(8)).unwrap();
        let mut output = vec![];
        write_transactions_to_csv(&mut output, &transactions[..3]).unwrap();
        let records = read_records(&output);

        assert_eq!(
            records[1],
            StringRecord::from(vec![
                "05.01.2024",
                "05.01.2024",
                "1450,00",
                "EUR",
                "Credit",
                "",
                "ACC-100001",
                "",
                "SK0000000000000000000000",
                "",
                "",
                "",
                "Salary",
                "Employer s.r.o.",
                "Salary",
            ])
        );
        assert_eq!(&records[2][2], "420,00");
        assert_eq!(&records[2][4], "Debit");
        assert_eq!(&records[2][14], "Rent");
        assert_eq!(&records[3][0], "20.01.2024");
        assert_eq!(&records[3][2], "14,99");
        assert_eq!(&records[3][4], "Debit");
        assert_eq!(&records[3][6], "");
        assert_eq!(&records[3][8], "");
        assert_eq!(&records[3][12], "Spotify subscription");
        assert_eq!(&records[3][14], "Subscription");
    }

    #[test]
    fn test_amount_with_comma_is_quoted() {
        let config = GeneratorConfig::for_year(2024).unwrap();
        let transactions = config.generate(&mut StdRng::seed_from_u64(8)).unwrap();
        let mut output = vec![];
        write_transactions_to_csv(&mut output, &transactions[..1]).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains(",\"1450,00\",EUR,Credit,"));
    }

    #[test]
    fn test_header_only_when_empty() {
        let mut output = vec![];
        let rows = write_transactions_to_csv(&mut output, std::iter::empty()).unwrap();
        assert_eq!(rows, 0);
        let records = read_records(&output);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 15);
    }

    #[test]
    fn test_rewrite_replaces_file() {
        let path = std::env::temp_dir().join(format!(
            "txgen-rewrite-{}.csv",
            std::process::id()
        ));
        let config = GeneratorConfig::for_year(2024).unwrap();
        let long = config.generate(&mut StdRng::seed_from_u64(1)).unwrap();
        write_transactions_to_path(&path, &long).unwrap();

        let short = &long[..3];
        write_transactions_to_path(&path, short).unwrap();
        let output = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let records = read_records(&output);
        assert_eq!(records.len(), 4);
        assert_eq!(&records[3][14], "Subscription");
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let path = std::env::temp_dir()
            .join("txgen-missing-dir")
            .join("nested")
            .join("transactions.csv");
        assert!(matches!(
            write_transactions_to_path(&path, std::iter::empty()),
            Err(Error::Io(_))
        ));
    }
}
