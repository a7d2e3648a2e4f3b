//! CSV loader for bid batches
//!
//! Expected header (column order is free, extra columns are ignored):
//! bid_id,farmer_group,gross_kes,quantity_kg,truck_size[,date][,produce]

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use mavuno_domain::model::BidRecord;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BidCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid date format in row {row}: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("Invalid number format in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<BidCsvError> for mavuno_types::Error {
    fn from(err: BidCsvError) -> Self {
        match err {
            BidCsvError::IoError(e) => mavuno_types::Error::Io(e),
            other => mavuno_types::Error::BidCsv(other.to_string()),
        }
    }
}

const REQUIRED_COLUMNS: [&str; 5] = ["bid_id", "farmer_group", "gross_kes", "quantity_kg", "truck_size"];

/// Load bid records from a UTF-8 CSV file
pub fn load_bids_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<BidRecord>, BidCsvError> {
    let content = std::fs::read_to_string(path)?;
    parse_bids(&content)
}

/// Parse bid records from CSV text
pub fn parse_bids(content: &str) -> Result<Vec<BidRecord>, BidCsvError> {
    let content = content.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = index_headers(&headers)?;

    let mut bids = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let row_num = row_idx + 2; // header is row 1
        bids.push(parse_record(&record, &columns, row_num)?);
    }

    Ok(bids)
}

fn index_headers(headers: &csv::StringRecord) -> Result<HashMap<String, usize>, BidCsvError> {
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| (h.to_lowercase(), idx))
        .collect();

    for col in REQUIRED_COLUMNS {
        if !columns.contains_key(col) {
            return Err(BidCsvError::MissingColumn(col.to_string()));
        }
    }

    Ok(columns)
}

fn field<'a>(record: &'a csv::StringRecord, columns: &HashMap<String, usize>, name: &str) -> &'a str {
    columns
        .get(name)
        .and_then(|idx| record.get(*idx))
        .unwrap_or("")
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &HashMap<String, usize>,
    row_num: usize,
) -> Result<BidRecord, BidCsvError> {
    let date = match field(record, columns, "date") {
        "" => None,
        s => Some(parse_date(s, row_num)?),
    };
    let produce = Some(field(record, columns, "produce"))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(BidRecord {
        bid_id: field(record, columns, "bid_id").to_string(),
        farmer_group: field(record, columns, "farmer_group").to_string(),
        gross_amount: parse_decimal(field(record, columns, "gross_kes"), row_num, "gross_kes")?,
        quantity_kg: parse_decimal(field(record, columns, "quantity_kg"), row_num, "quantity_kg")?,
        truck_size: field(record, columns, "truck_size").to_string(),
        date,
        produce,
    })
}

fn parse_date(s: &str, row: usize) -> Result<NaiveDate, BidCsvError> {
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(BidCsvError::InvalidDate {
        row,
        value: s.to_string(),
    })
}

fn parse_decimal(s: &str, row: usize, column: &str) -> Result<Decimal, BidCsvError> {
    let cleaned = s.trim().replace([',', '_'], "");

    Decimal::from_str(&cleaned).map_err(|_| BidCsvError::InvalidNumber {
        row,
        column: column.to_string(),
        value: s.to_string(),
    })
}
