//! Strict tokenizers for the textual receipt fields.
//!
//! Every parser consumes its whole input: trailing characters after an otherwise valid date,
//! time, or amount are rejected rather than ignored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_SHAPE: &str = "a date formatted as YYYY-MM-DD";
const TIME_SHAPE: &str = "a 24-hour time formatted as HH:MM";
const AMOUNT_SHAPE: &str = "a dollar amount formatted as D.DD";

const MAX_HOUR: u32 = 23;
const MAX_MINUTE: u32 = 59;

/// Failure to turn a textual field into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The text does not match the required pattern.
    #[error("failed to parse {value:?}, expected {expected}")]
    Parse {
        value: String,
        expected: &'static str,
    },
    /// The text is well formed but a component is out of range.
    #[error("invalid {component} value '{value}', must be >= 0 and <= {max}")]
    Validation {
        component: &'static str,
        value: u32,
        max: u32,
    },
}

impl FieldError {
    fn parse(value: &str, expected: &'static str) -> Self {
        Self::Parse {
            value: value.to_string(),
            expected,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let invalid = || FieldError::parse(raw, DATE_SHAPE);

    let mut parts = raw.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return Err(invalid());
    }
    if !(all_digits(year) && all_digits(month) && all_digits(day)) {
        return Err(invalid());
    }

    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    let day = day.parse::<u32>().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Parses `H:MM` or `HH:MM` into `(hour, minute)`.
///
/// Seconds, fractions and offsets are rejected as malformed. Components outside the 24-hour
/// clock are reported as [`FieldError::Validation`].
pub fn parse_time(raw: &str) -> Result<(u32, u32), FieldError> {
    let invalid = || FieldError::parse(raw, TIME_SHAPE);

    let (hour, minute) = raw.split_once(':').ok_or_else(invalid)?;
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
        return Err(invalid());
    }
    if !(all_digits(hour) && all_digits(minute)) {
        return Err(invalid());
    }

    let hour = hour.parse::<u32>().map_err(|_| invalid())?;
    let minute = minute.parse::<u32>().map_err(|_| invalid())?;
    check_clock(hour, minute)?;

    Ok((hour, minute))
}

fn check_clock(hour: u32, minute: u32) -> Result<(), FieldError> {
    if hour > MAX_HOUR {
        return Err(FieldError::Validation {
            component: "hour",
            value: hour,
            max: MAX_HOUR,
        });
    }
    if minute > MAX_MINUTE {
        return Err(FieldError::Validation {
            component: "minute",
            value: minute,
            max: MAX_MINUTE,
        });
    }
    Ok(())
}

/// Joins a date and a wall-clock time into the naive purchase timestamp.
pub fn combine(date: NaiveDate, hour: u32, minute: u32) -> Result<NaiveDateTime, FieldError> {
    check_clock(hour, minute)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or(FieldError::Validation {
        component: "hour",
        value: hour,
        max: MAX_HOUR,
    })?;
    Ok(date.and_time(time))
}

/// Parses `D+.DD` monetary text into integer cents.
///
/// Cents digits past the second are truncated; a single cents digit counts as tenths.
pub fn parse_amount(raw: &str) -> Result<u64, FieldError> {
    let invalid = || FieldError::parse(raw, AMOUNT_SHAPE);

    let (dollars, cents) = raw.split_once('.').ok_or_else(invalid)?;
    if !(all_digits(dollars) && all_digits(cents)) {
        return Err(invalid());
    }

    let dollars = dollars.parse::<u64>().map_err(|_| invalid())?;
    let cents = match cents.as_bytes() {
        [tenths] => u64::from(tenths - b'0') * 10,
        [tenths, hundredths, ..] => {
            u64::from(tenths - b'0') * 10 + u64::from(hundredths - b'0')
        }
        [] => return Err(invalid()),
    };

    dollars
        .checked_mul(100)
        .and_then(|whole| whole.checked_add(cents))
        .ok_or_else(invalid)
}
