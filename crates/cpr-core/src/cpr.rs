use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::calendar::date_from_parts;
use crate::century::{century_year, leading_digit};
use crate::checksum::is_valid_checksum;
use crate::error::{Error, Result};
use crate::gender::Gender;

/// Highest four-digit running number.
pub const MAX_RUNNING_NUMBER: u16 = 9999;

/// A complete `DDMMYY-NNNN` identity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpr {
    date: NaiveDate,
    running_number: u16,
}

impl Cpr {
    /// Creates a code after checking that the date exists and the running
    /// number has at most four digits.
    pub fn new(day: u8, month: u8, year: u16, running_number: u16) -> Result<Self> {
        if running_number > MAX_RUNNING_NUMBER {
            return Err(Error::InvalidRunningNumber(running_number));
        }
        let date = date_from_parts(year, month, day)
            .ok_or(Error::InvalidDate { day, month, year })?;
        Ok(Self {
            date,
            running_number,
        })
    }

    pub fn day(&self) -> u8 {
        self.date.day() as u8
    }

    pub fn month(&self) -> u8 {
        self.date.month() as u8
    }

    pub fn year(&self) -> u16 {
        self.date.year() as u16
    }

    pub fn running_number(&self) -> u16 {
        self.running_number
    }

    pub fn gender(&self) -> Gender {
        Gender::from_running_number(self.running_number)
    }

    /// Birth date encoded by the code.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Leading running-number digit, also known as the century indicator.
    pub fn century_digit(&self) -> u8 {
        leading_digit(self.running_number)
    }

    /// `DDMMYY` part of the code.
    pub fn date_part(&self) -> String {
        format!(
            "{:02}{:02}{:02}",
            self.day(),
            self.month(),
            self.year() % 100
        )
    }

    pub fn no_dash(&self) -> String {
        format!("{}{:04}", self.date_part(), self.running_number)
    }

    pub fn dash(&self) -> String {
        format!("{}-{:04}", self.date_part(), self.running_number)
    }

    /// Whether the code passes the weighted mod-11 test.
    pub fn has_valid_checksum(&self) -> bool {
        is_valid_checksum(&self.no_dash())
    }
}

impl fmt::Display for Cpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dash())
    }
}

impl FromStr for Cpr {
    type Err = Error;

    /// Parses `DDMMYYNNNN` or `DDMMYY-NNNN`. The four-digit year is resolved
    /// from the seventh digit.
    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        let digits: Vec<u8> = match value.len() {
            10 => value.bytes().collect(),
            11 if value.as_bytes()[6] == b'-' => value
                .bytes()
                .enumerate()
                .filter_map(|(index, byte)| (index != 6).then_some(byte))
                .collect(),
            _ => {
                return Err(Error::InvalidFormat(format!(
                    "expected DDMMYYNNNN or DDMMYY-NNNN, got '{value}'"
                )));
            }
        };
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(Error::InvalidFormat(format!(
                "'{value}' contains non-digit characters"
            )));
        }

        let digits: Vec<u8> = digits.into_iter().map(|byte| byte - b'0').collect();
        let two = |index: usize| digits[index] * 10 + digits[index + 1];

        let day = two(0);
        let month = two(2);
        let year = century_year(digits[6], two(4))?;
        let running_number = u16::from(two(6)) * 100 + u16::from(two(8));

        Cpr::new(day, month, year, running_number)
    }
}

impl Serialize for Cpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Cpr", 7)?;
        state.serialize_field("code", &self.dash())?;
        state.serialize_field("day", &self.day())?;
        state.serialize_field("month", &self.month())?;
        state.serialize_field("year", &self.year())?;
        state.serialize_field("running_number", &self.running_number)?;
        state.serialize_field("gender", &self.gender())?;
        state.serialize_field("valid_checksum", &self.has_valid_checksum())?;
        state.end()
    }
}
