use thiserror::Error;

/// Core error type shared across the CPR crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not a `DDMMYYNNNN` or `DDMMYY-NNNN` string.
    #[error("invalid cpr format: {0}")]
    InvalidFormat(String),
    /// Day, month and year do not form a calendar date.
    #[error("invalid date: {day:02}-{month:02}-{year:04}")]
    InvalidDate { day: u8, month: u8, year: u16 },
    /// Running numbers are four digits.
    #[error("invalid running number: {0} (must be 0-9999)")]
    InvalidRunningNumber(u16),
    /// A leading running-number digit outside 0-9 reached the century table.
    #[error("the digit {0} is not between 0 and 9")]
    UnclassifiableDigit(u8),
}

/// Convenience alias for results returned by the CPR crates.
pub type Result<T> = std::result::Result<T, Error>;
