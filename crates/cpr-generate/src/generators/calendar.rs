use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use cpr_core::{Gender, MAX_YEAR, MIN_YEAR, days_in_month};

use crate::errors::GenerationError;
use crate::generators::interleave::{Dimension, Interleave};
use crate::generators::running_number::RunningNumbers;
use crate::model::{Candidate, GenerateOptions};

pub type GenderStage = Interleave<GenderDimension>;
pub type DayStage = Interleave<DayDimension>;
pub type MonthStage = Interleave<MonthDimension>;
pub type YearStage = Interleave<YearDimension>;

/// Interleaves the running numbers of each requested gender.
#[derive(Debug, Clone)]
pub struct GenderDimension {
    year: u16,
    genders: Vec<Gender>,
}

impl GenderDimension {
    pub fn new(year: u16, genders: &[Gender]) -> Self {
        let genders: BTreeSet<Gender> = genders.iter().copied().collect();
        Self {
            year,
            genders: genders.into_iter().collect(),
        }
    }
}

impl Dimension for GenderDimension {
    type Choice = Gender;
    type Child = RunningNumbers;

    fn id(&self) -> &'static str {
        "gender"
    }

    fn choices(&self) -> Vec<Gender> {
        self.genders.clone()
    }

    fn child(&self, gender: Gender) -> Result<RunningNumbers, GenerationError> {
        RunningNumbers::new(self.year, gender)
    }

    // Parity of the running number already carries the gender.
    fn stamp(&self, _candidate: &mut Candidate, _gender: Gender) {}
}

/// Interleaves a fixed list of days within one month.
#[derive(Debug, Clone)]
pub struct DayDimension {
    days: Vec<u8>,
    year: u16,
    genders: Vec<Gender>,
}

impl DayDimension {
    pub fn new(days: &[u8], year: u16, genders: &[Gender]) -> Self {
        let days: BTreeSet<u8> = days.iter().copied().collect();
        Self {
            days: days.into_iter().collect(),
            year,
            genders: genders.to_vec(),
        }
    }
}

impl Dimension for DayDimension {
    type Choice = u8;
    type Child = GenderStage;

    fn id(&self) -> &'static str {
        "day"
    }

    fn choices(&self) -> Vec<u8> {
        self.days.clone()
    }

    fn child(&self, _day: u8) -> Result<GenderStage, GenerationError> {
        Ok(gender_stage(self.year, &self.genders))
    }

    fn stamp(&self, candidate: &mut Candidate, day: u8) {
        candidate.day = Some(day);
    }
}

/// Interleaves the legal months of one year.
#[derive(Debug, Clone)]
pub struct MonthDimension {
    year: u16,
    options: Arc<GenerateOptions>,
}

impl MonthDimension {
    pub fn new(year: u16, options: Arc<GenerateOptions>) -> Self {
        Self { year, options }
    }
}

impl Dimension for MonthDimension {
    type Choice = u8;
    type Child = DayStage;

    fn id(&self) -> &'static str {
        "month"
    }

    fn choices(&self) -> Vec<u8> {
        legal_months(&self.options, self.year)
    }

    fn child(&self, month: u8) -> Result<DayStage, GenerationError> {
        let days = legal_days(&self.options, self.year, month);
        Ok(day_stage(&days, self.year, &self.options.genders))
    }

    fn stamp(&self, candidate: &mut Candidate, month: u8) {
        candidate.month = Some(month);
    }
}

/// Interleaves the legal years of a run.
#[derive(Debug, Clone)]
pub struct YearDimension {
    options: Arc<GenerateOptions>,
}

impl YearDimension {
    pub fn new(options: Arc<GenerateOptions>) -> Self {
        Self { options }
    }
}

impl Dimension for YearDimension {
    type Choice = u16;
    type Child = MonthStage;

    fn id(&self) -> &'static str {
        "year"
    }

    fn choices(&self) -> Vec<u16> {
        legal_years(&self.options)
    }

    fn child(&self, year: u16) -> Result<MonthStage, GenerationError> {
        Ok(month_stage(year, Arc::clone(&self.options)))
    }

    fn stamp(&self, candidate: &mut Candidate, year: u16) {
        candidate.year = Some(year);
    }
}

pub fn gender_stage(year: u16, genders: &[Gender]) -> GenderStage {
    Interleave::new(GenderDimension::new(year, genders))
}

pub fn day_stage(days: &[u8], year: u16, genders: &[Gender]) -> DayStage {
    Interleave::new(DayDimension::new(days, year, genders))
}

pub fn month_stage(year: u16, options: Arc<GenerateOptions>) -> MonthStage {
    Interleave::new(MonthDimension::new(year, options))
}

pub fn year_stage(options: Arc<GenerateOptions>) -> YearStage {
    Interleave::new(YearDimension::new(options))
}

/// Configured years inside the numbering scheme and the date window,
/// deduplicated and sorted.
pub fn legal_years(options: &GenerateOptions) -> Vec<u16> {
    let years: BTreeSet<u16> = options
        .years
        .iter()
        .copied()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        .filter(|year| {
            options
                .min_date
                .is_none_or(|min| i32::from(*year) >= min.year())
        })
        .filter(|year| {
            options
                .max_date
                .is_none_or(|max| i32::from(*year) <= max.year())
        })
        .collect();
    years.into_iter().collect()
}

/// Configured months of `year`, cut by the date window when it starts or
/// ends in that year.
pub fn legal_months(options: &GenerateOptions, year: u16) -> Vec<u8> {
    let months: BTreeSet<u8> = options
        .months
        .iter()
        .copied()
        .filter(|month| {
            options
                .min_date
                .filter(|min| in_year(*min, year))
                .is_none_or(|min| u32::from(*month) >= min.month())
        })
        .filter(|month| {
            options
                .max_date
                .filter(|max| in_year(*max, year))
                .is_none_or(|max| u32::from(*month) <= max.month())
        })
        .collect();
    months.into_iter().collect()
}

/// Calendar days of `year`-`month` allowed by the day filter, cut by the
/// date window when it starts or ends in that month.
pub fn legal_days(options: &GenerateOptions, year: u16, month: u8) -> Vec<u8> {
    let Some(last_day) = days_in_month(year, month) else {
        return Vec::new();
    };

    (1..=last_day)
        .filter(|day| {
            options
                .days
                .as_ref()
                .is_none_or(|days| days.contains(day))
        })
        .filter(|day| {
            options
                .min_date
                .filter(|min| in_month(*min, year, month))
                .is_none_or(|min| u32::from(*day) >= min.day())
        })
        .filter(|day| {
            options
                .max_date
                .filter(|max| in_month(*max, year, month))
                .is_none_or(|max| u32::from(*day) <= max.day())
        })
        .collect()
}

fn in_year(date: NaiveDate, year: u16) -> bool {
    date.year() == i32::from(year)
}

fn in_month(date: NaiveDate, year: u16, month: u8) -> bool {
    in_year(date, year) && date.month() == u32::from(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn years_are_cut_by_window_and_deduplicated() {
        let options = GenerateOptions {
            years: vec![1999, 2001, 2000, 2003, 2000],
            min_date: Some(date(2000, 6, 1)),
            max_date: Some(date(2002, 1, 1)),
            ..GenerateOptions::default()
        };
        assert_eq!(legal_years(&options), vec![2000, 2001]);
    }

    #[test]
    fn years_outside_the_scheme_are_dropped() {
        let options = GenerateOptions {
            years: (1800..=2100).collect(),
            ..GenerateOptions::default()
        };
        let years = legal_years(&options);
        assert_eq!(years.first(), Some(&MIN_YEAR));
        assert_eq!(years.last(), Some(&MAX_YEAR));
        assert_eq!(years.len(), 200);
    }

    #[test]
    fn months_are_cut_only_in_window_years() {
        let options = GenerateOptions {
            min_date: Some(date(2002, 4, 20)),
            max_date: Some(date(2004, 9, 1)),
            ..GenerateOptions::default()
        };
        assert_eq!(legal_months(&options, 2002), (4..=12).collect::<Vec<_>>());
        assert_eq!(legal_months(&options, 2003), (1..=12).collect::<Vec<_>>());
        assert_eq!(legal_months(&options, 2004), (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn days_follow_calendar_filter_and_window() {
        let options = GenerateOptions::default();
        assert_eq!(legal_days(&options, 2000, 2).len(), 29);
        assert_eq!(legal_days(&options, 1900, 2).len(), 28);

        let options = GenerateOptions {
            days: Some(vec![10, 20, 31]),
            min_date: Some(date(1955, 10, 15)),
            max_date: Some(date(1955, 12, 15)),
            ..GenerateOptions::default()
        };
        assert_eq!(legal_days(&options, 1955, 10), vec![20, 31]);
        assert_eq!(legal_days(&options, 1955, 11), vec![10, 20]);
        assert_eq!(legal_days(&options, 1955, 12), vec![10]);
        assert_eq!(legal_days(&options, 1956, 12), vec![10, 20, 31]);
    }

    #[test]
    fn empty_day_filter_allows_nothing() {
        let options = GenerateOptions {
            days: Some(Vec::new()),
            ..GenerateOptions::default()
        };
        assert!(legal_days(&options, 2000, 1).is_empty());
    }
}
