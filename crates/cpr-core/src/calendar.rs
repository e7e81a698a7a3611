use chrono::NaiveDate;

/// Number of days in `month` of `year` under the proleptic Gregorian calendar.
///
/// Returns `None` when `month` is outside 1-12.
pub fn days_in_month(year: u16, month: u8) -> Option<u8> {
    let first = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(i32::from(year) + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(i32::from(year), u32::from(month) + 1, 1)?
    };
    u8::try_from(next.signed_duration_since(first).num_days()).ok()
}

pub fn is_leap_year(year: u16) -> bool {
    NaiveDate::from_ymd_opt(i32::from(year), 2, 29).is_some()
}

/// Builds a date from CPR-sized fields.
pub fn date_from_parts(year: u16, month: u8, day: u8) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
}
