use chrono::NaiveDate;

use cpr_core::Gender;
use cpr_generate::{CprBuilder, GenerateOptions, GenerationError, age_window};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn age_window_rolls_over_month_and_year_ends() {
    let cases = [
        (date(2022, 6, 7), date(2012, 6, 7), date(2011, 6, 8)),
        (date(2010, 4, 1), date(2000, 4, 1), date(1999, 4, 2)),
        (date(2011, 1, 31), date(2001, 1, 31), date(2000, 2, 1)),
        (date(2011, 12, 31), date(2001, 12, 31), date(2001, 1, 1)),
    ];

    for (today, max_date, min_date) in cases {
        let options = CprBuilder::new()
            .with_age_on(10, today)
            .build()
            .expect("build options");
        assert_eq!(options.min_date, Some(min_date), "today {today}");
        assert_eq!(options.max_date, Some(max_date), "today {today}");
    }
}

#[test]
fn age_window_on_leap_day() {
    let (min_date, max_date) = age_window(10, date(2024, 2, 29)).expect("window");
    assert_eq!(max_date, date(2014, 2, 28));
    assert_eq!(min_date, date(2013, 3, 1));

    let (min_date, max_date) = age_window(4, date(2024, 2, 29)).expect("window");
    assert_eq!(max_date, date(2020, 2, 29));
    assert_eq!(min_date, date(2019, 3, 1));
}

#[test]
fn inverted_window_fails_at_build() {
    let result = CprBuilder::new()
        .with_min_date(date(2001, 1, 1))
        .with_max_date(date(2000, 1, 1))
        .build();
    assert!(matches!(result, Err(GenerationError::InvalidOptions(_))));
}

#[test]
fn builder_generates_within_the_age_window() {
    let today = date(2022, 6, 7);
    let codes: Vec<_> = CprBuilder::new()
        .with_age_on(10, today)
        .with_seed(11)
        .generate()
        .expect("build generator")
        .take(500)
        .collect::<Result<_, _>>()
        .expect("generate codes");

    assert_eq!(codes.len(), 500);
    let (min_date, max_date) = (date(2011, 6, 8), date(2012, 6, 7));
    for cpr in &codes {
        assert!(cpr.date() >= min_date && cpr.date() <= max_date, "{cpr}");
    }
}

#[test]
fn first_call_replaces_defaults_and_later_calls_extend() {
    let options = CprBuilder::new()
        .with_year(1990)
        .with_year_range(2000, 2002)
        .with_month(4)
        .with_months([7, 8])
        .with_day_range(1, 3)
        .with_day(31)
        .build()
        .expect("build options");

    assert_eq!(options.years, vec![1990, 2000, 2001, 2002]);
    assert_eq!(options.months, vec![4, 7, 8]);
    assert_eq!(options.days, Some(vec![1, 2, 3, 31]));
}

#[test]
fn defaults_cover_the_whole_scheme() {
    let options = CprBuilder::new().build().expect("build options");
    assert_eq!(options, GenerateOptions::default());
    assert_eq!(options.years.first(), Some(&1858));
    assert_eq!(options.years.last(), Some(&2057));
    assert_eq!(options.months, (1..=12).collect::<Vec<u8>>());
    assert_eq!(options.days, None);
    assert_eq!(options.genders, vec![Gender::Female, Gender::Male]);
}

#[test]
fn genders_are_replaced() {
    let options = CprBuilder::new()
        .with_genders([Gender::Male])
        .with_genders([Gender::Female])
        .build()
        .expect("build options");
    assert_eq!(options.genders, vec![Gender::Female]);
}

#[test]
fn builder_values_are_independent_copies() {
    let base = CprBuilder::new().with_year(1990);
    let extended = base.clone().with_year(1991);
    assert_eq!(base.options().years, vec![1990]);
    assert_eq!(extended.options().years, vec![1990, 1991]);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: GenerateOptions = serde_json::from_str(
        r#"{"years": [1970], "genders": ["female"], "min_date": "1970-02-01"}"#,
    )
    .expect("parse options");
    assert_eq!(options.years, vec![1970]);
    assert_eq!(options.genders, vec![Gender::Female]);
    assert_eq!(options.months.len(), 12);
    assert_eq!(options.min_date, Some(date(1970, 2, 1)));
    assert_eq!(options.max_date, None);
}
