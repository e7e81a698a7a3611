use chrono::{Datelike, Local, NaiveDate};

use cpr_core::Gender;

use crate::engine::CprGenerator;
use crate::errors::GenerationError;
use crate::model::GenerateOptions;

/// Fluent construction of [`GenerateOptions`].
///
/// The first call to a `with_year*`, `with_month*` or `with_day*` method
/// replaces the default list; later calls extend it.
#[derive(Debug, Clone, Default)]
pub struct CprBuilder {
    options: GenerateOptions,
    custom_years: bool,
    custom_months: bool,
    custom_days: bool,
    error: Option<GenerationError>,
}

impl CprBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years(mut self, years: impl IntoIterator<Item = u16>) -> Self {
        if !self.custom_years {
            self.options.years.clear();
            self.custom_years = true;
        }
        self.options.years.extend(years);
        self
    }

    pub fn with_year_range(self, start: u16, end: u16) -> Self {
        self.with_years(start..=end)
    }

    pub fn with_year(self, year: u16) -> Self {
        self.with_years([year])
    }

    pub fn with_months(mut self, months: impl IntoIterator<Item = u8>) -> Self {
        if !self.custom_months {
            self.options.months.clear();
            self.custom_months = true;
        }
        self.options.months.extend(months);
        self
    }

    pub fn with_month_range(self, start: u8, end: u8) -> Self {
        self.with_months(start..=end)
    }

    pub fn with_month(self, month: u8) -> Self {
        self.with_months([month])
    }

    pub fn with_days(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        if !self.custom_days {
            self.options.days = Some(Vec::new());
            self.custom_days = true;
        }
        self.options.days.get_or_insert_with(Vec::new).extend(days);
        self
    }

    pub fn with_day_range(self, start: u8, end: u8) -> Self {
        self.with_days(start..=end)
    }

    pub fn with_day(self, day: u8) -> Self {
        self.with_days([day])
    }

    pub fn with_genders(mut self, genders: impl IntoIterator<Item = Gender>) -> Self {
        self.options.genders = genders.into_iter().collect();
        self
    }

    pub fn with_min_date(mut self, min_date: NaiveDate) -> Self {
        self.options.min_date = Some(min_date);
        self
    }

    pub fn with_max_date(mut self, max_date: NaiveDate) -> Self {
        self.options.max_date = Some(max_date);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    /// Restricts birth dates to people who are `age` years old today.
    pub fn with_age(self, age: u16) -> Self {
        self.with_age_on(age, Local::now().date_naive())
    }

    /// Restricts birth dates to people who are `age` years old on `today`.
    pub fn with_age_on(mut self, age: u16, today: NaiveDate) -> Self {
        match age_window(age, today) {
            Ok((min_date, max_date)) => {
                self.options.min_date = Some(min_date);
                self.options.max_date = Some(max_date);
            }
            Err(err) if self.error.is_none() => self.error = Some(err),
            Err(_) => {}
        }
        self
    }

    /// Current options, before validation.
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn build(self) -> Result<GenerateOptions, GenerationError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.options.validate()?;
        Ok(self.options)
    }

    pub fn generate(self) -> Result<CprGenerator, GenerationError> {
        CprGenerator::new(self.build()?)
    }
}

/// Inclusive `(min_date, max_date)` birth window for someone who is `age`
/// years old on `today`.
///
/// The window ends on today's date `age` years back and starts the day after
/// the same date one year earlier. When that day does not exist the window
/// starts on the first of the following month, or on January 1st of the
/// birth year when the following month is past December. A Feb 29 `today`
/// maps to Feb 28 in a non-leap birth year.
pub fn age_window(age: u16, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), GenerationError> {
    let birth_year = today.year() - i32::from(age);
    let (month, day) = (today.month(), today.day());

    let max_date = NaiveDate::from_ymd_opt(birth_year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(birth_year, month, day - 1))
        .ok_or_else(|| out_of_range(age, today))?;

    let min_date = NaiveDate::from_ymd_opt(birth_year - 1, month, day + 1)
        .or_else(|| NaiveDate::from_ymd_opt(birth_year - 1, month + 1, 1))
        .or_else(|| NaiveDate::from_ymd_opt(birth_year, 1, 1))
        .ok_or_else(|| out_of_range(age, today))?;

    Ok((min_date, max_date))
}

fn out_of_range(age: u16, today: NaiveDate) -> GenerationError {
    GenerationError::InvalidOptions(format!("age {age} on {today} is out of the calendar range"))
}
