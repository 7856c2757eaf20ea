use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Unknown {field} value: {value:?}")]
    UnknownValue { field: &'static str, value: String },
}
