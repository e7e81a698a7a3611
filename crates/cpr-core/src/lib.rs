//! Core types for synthetic CPR numbers.
//!
//! This crate defines the `Cpr` value object, the historical numbering
//! windows, the calendar helpers and the mod-11 checksum shared by the
//! generator and the CLI.

pub mod calendar;
pub mod century;
pub mod checksum;
pub mod cpr;
pub mod error;
pub mod gender;

pub use calendar::{date_from_parts, days_in_month, is_leap_year};
pub use century::{MAX_YEAR, MIN_YEAR, century_year, digit_covers_year, leading_digit};
pub use checksum::{is_valid_checksum, weighted_sum};
pub use cpr::{Cpr, MAX_RUNNING_NUMBER};
pub use error::{Error, Result};
pub use gender::Gender;
