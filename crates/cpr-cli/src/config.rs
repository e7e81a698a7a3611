use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Deserialize;

use cpr_core::{Cpr, Gender};
use cpr_generate::{CprBuilder, GenerateOptions};

use crate::CliError;
use crate::ranges::parse_range_list;

/// How generated codes are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeFormat {
    /// `DDMMYY-SSSS`
    #[default]
    Dash,
    /// `DDMMYYSSSS`
    NoDash,
}

impl CodeFormat {
    pub fn render(self, cpr: &Cpr) -> String {
        match self {
            CodeFormat::Dash => cpr.dash(),
            CodeFormat::NoDash => cpr.no_dash(),
        }
    }
}

/// A range list given either as a bare number or as `"N,M-K"` text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RangeList {
    Single(u64),
    Text(String),
}

impl RangeList {
    pub fn expand<T: TryFrom<u64>>(&self) -> Result<Vec<T>, CliError> {
        match self {
            RangeList::Single(value) => parse_range_list(&value.to_string()),
            RangeList::Text(text) => parse_range_list(text),
        }
    }
}

/// Settings for `generate`, read from a TOML file or collected from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub year: Option<RangeList>,
    pub month: Option<RangeList>,
    pub day: Option<RangeList>,
    pub gender: Option<Vec<Gender>>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub age: Option<u16>,
    pub count: Option<u64>,
    pub format: Option<CodeFormat>,
    pub seed: Option<u64>,
}

/// Fully resolved `generate` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub options: GenerateOptions,
    pub count: Option<u64>,
    pub format: CodeFormat,
}

pub fn load_config(path: &Path) -> Result<GenerateConfig, CliError> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

impl GenerateConfig {
    /// Field-wise merge where values already set on `self` win.
    pub fn or(self, fallback: GenerateConfig) -> GenerateConfig {
        GenerateConfig {
            year: self.year.or(fallback.year),
            month: self.month.or(fallback.month),
            day: self.day.or(fallback.day),
            gender: self.gender.or(fallback.gender),
            min_date: self.min_date.or(fallback.min_date),
            max_date: self.max_date.or(fallback.max_date),
            age: self.age.or(fallback.age),
            count: self.count.or(fallback.count),
            format: self.format.or(fallback.format),
            seed: self.seed.or(fallback.seed),
        }
    }

    /// Turns the settings into generator options. The age window is applied
    /// last and replaces both `min_date` and `max_date`.
    pub fn resolve(self, today: NaiveDate) -> Result<GenerateRequest, CliError> {
        let mut builder = CprBuilder::new();

        if let Some(years) = &self.year {
            builder = builder.with_years(years.expand::<u16>()?);
        }
        if let Some(months) = &self.month {
            builder = builder.with_months(months.expand::<u8>()?);
        }
        if let Some(days) = &self.day {
            builder = builder.with_days(days.expand::<u8>()?);
        }
        if let Some(genders) = self.gender {
            if genders.is_empty() {
                return Err(CliError::Config("gender list is empty".to_string()));
            }
            builder = builder.with_genders(genders);
        }
        if let Some(min_date) = self.min_date {
            builder = builder.with_min_date(min_date);
        }
        if let Some(max_date) = self.max_date {
            builder = builder.with_max_date(max_date);
        }
        if let Some(age) = self.age {
            builder = builder.with_age_on(age, today);
        }
        if let Some(seed) = self.seed {
            builder = builder.with_seed(seed);
        }

        Ok(GenerateRequest {
            options: builder.build()?,
            count: self.count,
            format: self.format.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_toml_file_settings() {
        let config: GenerateConfig = toml::from_str(
            r#"
            year = "1990-1992,2001"
            month = 2
            gender = ["male"]
            min_date = "1990-02-10"
            count = 25
            format = "no-dash"
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.year, Some(RangeList::Text("1990-1992,2001".into())));
        assert_eq!(config.month, Some(RangeList::Single(2)));
        assert_eq!(config.gender, Some(vec![Gender::Male]));
        assert_eq!(config.min_date, Some(date(1990, 2, 10)));
        assert_eq!(config.format, Some(CodeFormat::NoDash));

        let request = config.resolve(date(2024, 1, 1)).unwrap();
        assert_eq!(request.options.years, vec![1990, 1991, 1992, 2001]);
        assert_eq!(request.options.months, vec![2]);
        assert_eq!(request.options.days, None);
        assert_eq!(request.options.seed, Some(42));
        assert_eq!(request.count, Some(25));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = toml::from_str::<GenerateConfig>("years = \"1990\"");
        assert!(result.is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let file = GenerateConfig {
            year: Some(RangeList::Text("1950".into())),
            month: Some(RangeList::Single(3)),
            seed: Some(1),
            format: Some(CodeFormat::NoDash),
            ..GenerateConfig::default()
        };
        let flags = GenerateConfig {
            year: Some(RangeList::Text("1960-1961".into())),
            seed: Some(2),
            ..GenerateConfig::default()
        };

        let request = flags.or(file).resolve(date(2024, 1, 1)).unwrap();
        assert_eq!(request.options.years, vec![1960, 1961]);
        assert_eq!(request.options.months, vec![3]);
        assert_eq!(request.options.seed, Some(2));
        assert_eq!(request.format, CodeFormat::NoDash);
    }

    #[test]
    fn age_window_replaces_explicit_dates() {
        let config = GenerateConfig {
            age: Some(10),
            min_date: Some(date(1990, 1, 1)),
            max_date: Some(date(2012, 1, 1)),
            ..GenerateConfig::default()
        };
        let request = config.resolve(date(2022, 6, 7)).unwrap();
        assert_eq!(request.options.min_date, Some(date(2011, 6, 8)));
        assert_eq!(request.options.max_date, Some(date(2012, 6, 7)));
    }

    #[test]
    fn age_from_file_overrides_date_flags() {
        let file = GenerateConfig {
            age: Some(30),
            ..GenerateConfig::default()
        };
        let flags = GenerateConfig {
            max_date: Some(date(1970, 1, 1)),
            ..GenerateConfig::default()
        };
        let request = flags.or(file).resolve(date(2010, 4, 1)).unwrap();
        assert_eq!(request.options.min_date, Some(date(1979, 4, 2)));
        assert_eq!(request.options.max_date, Some(date(1980, 4, 1)));
    }

    #[test]
    fn bad_ranges_and_options_are_reported() {
        let config = GenerateConfig {
            month: Some(RangeList::Text("5-2".into())),
            ..GenerateConfig::default()
        };
        assert!(matches!(
            config.resolve(date(2024, 1, 1)),
            Err(CliError::InvalidRange(_))
        ));

        let config = GenerateConfig {
            month: Some(RangeList::Single(13)),
            ..GenerateConfig::default()
        };
        assert!(matches!(
            config.resolve(date(2024, 1, 1)),
            Err(CliError::Generation(_))
        ));

        let config = GenerateConfig {
            gender: Some(Vec::new()),
            ..GenerateConfig::default()
        };
        assert!(matches!(
            config.resolve(date(2024, 1, 1)),
            Err(CliError::Config(_))
        ));
    }
}
