use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cpr_core::{Cpr, Gender, MAX_YEAR, MIN_YEAR};

use crate::errors::GenerationError;

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Candidate birth years.
    pub years: Vec<u16>,
    /// Candidate birth months (1-12).
    pub months: Vec<u8>,
    /// Candidate days of month. `None` allows every calendar day, an empty
    /// list allows none.
    pub days: Option<Vec<u8>>,
    /// Genders to generate.
    pub genders: Vec<Gender>,
    /// Earliest birth date, inclusive.
    pub min_date: Option<NaiveDate>,
    /// Latest birth date, inclusive.
    pub max_date: Option<NaiveDate>,
    /// Seed for the random order. Drawn at random when absent.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            years: (MIN_YEAR..=MAX_YEAR).collect(),
            months: (1..=12).collect(),
            days: None,
            genders: Gender::ALL.to_vec(),
            min_date: None,
            max_date: None,
            seed: None,
        }
    }
}

impl GenerateOptions {
    /// Checks value ranges and the date window.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if let Some(month) = self.months.iter().find(|month| !(1..=12).contains(*month)) {
            return Err(GenerationError::InvalidOptions(format!(
                "month {month} is not between 1 and 12"
            )));
        }
        if let Some(day) = self
            .days
            .iter()
            .flatten()
            .find(|day| !(1..=31).contains(*day))
        {
            return Err(GenerationError::InvalidOptions(format!(
                "day {day} is not between 1 and 31"
            )));
        }
        if let (Some(min_date), Some(max_date)) = (self.min_date, self.max_date)
            && min_date > max_date
        {
            return Err(GenerationError::InvalidOptions(format!(
                "min_date {min_date} is after max_date {max_date}"
            )));
        }
        Ok(())
    }
}

/// Partially enriched code travelling up the stage tree.
///
/// The innermost stage sets the running number; every outer stage stamps its
/// own field on the way up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candidate {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub running_number: Option<u16>,
}

impl Candidate {
    pub fn with_running_number(running_number: u16) -> Self {
        Self {
            running_number: Some(running_number),
            ..Self::default()
        }
    }

    /// Converts a fully enriched candidate into a code.
    pub fn complete(self) -> Result<Cpr, GenerationError> {
        let day = self.day.ok_or(GenerationError::IncompleteCandidate("day"))?;
        let month = self.month.ok_or(GenerationError::IncompleteCandidate("month"))?;
        let year = self.year.ok_or(GenerationError::IncompleteCandidate("year"))?;
        let running_number = self
            .running_number
            .ok_or(GenerationError::IncompleteCandidate("running number"))?;
        Ok(Cpr::new(day, month, year, running_number)?)
    }
}

/// Counters for a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub seed: u64,
    pub emitted: u64,
    pub excluded_by_checksum: u64,
}
