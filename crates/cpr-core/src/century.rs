//! Historical numbering windows.
//!
//! The thousands digit of the running number tells which birth years a code
//! may belong to. The same table disambiguates a two-digit year when a code
//! is parsed.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// First birth year representable by the numbering scheme.
pub const MIN_YEAR: u16 = 1858;
/// Last birth year representable by the numbering scheme.
pub const MAX_YEAR: u16 = 2057;

const WINDOWS_0_TO_3: &[RangeInclusive<u16>] = &[1900..=1999];
const WINDOWS_4_AND_9: &[RangeInclusive<u16>] = &[1937..=1999, 2000..=2036];
const WINDOWS_5_TO_8: &[RangeInclusive<u16>] = &[2000..=2057, 1858..=1899];

/// Leading digit of a running number (`0` below 1000).
pub fn leading_digit(running_number: u16) -> u8 {
    u8::try_from(running_number / 1000).unwrap_or(u8::MAX)
}

/// Year windows for which `digit` is a valid leading digit.
pub fn windows(digit: u8) -> Result<&'static [RangeInclusive<u16>]> {
    match digit {
        0..=3 => Ok(WINDOWS_0_TO_3),
        4 | 9 => Ok(WINDOWS_4_AND_9),
        5..=8 => Ok(WINDOWS_5_TO_8),
        other => Err(Error::UnclassifiableDigit(other)),
    }
}

/// Whether `digit` may lead the running number of someone born in `year`.
pub fn digit_covers_year(digit: u8, year: u16) -> Result<bool> {
    Ok(windows(digit)?.iter().any(|window| window.contains(&year)))
}

/// Resolves the four-digit birth year of a code from its seventh digit and
/// its two-digit year.
pub fn century_year(digit: u8, two_digit_year: u8) -> Result<u16> {
    let yy = u16::from(two_digit_year);
    match digit {
        0..=3 => Ok(1900 + yy),
        4 | 9 if yy >= 37 => Ok(1900 + yy),
        4 | 9 => Ok(2000 + yy),
        5..=8 if yy <= 57 => Ok(2000 + yy),
        5..=8 => Ok(1800 + yy),
        other => Err(Error::UnclassifiableDigit(other)),
    }
}
