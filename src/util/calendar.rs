use chrono::{NaiveDate, TimeZone, Utc};

use crate::interpreter::value::core::Instant;

/// Length of a date-time literal such as `2016-02-29T00:00:00.000Z`.
pub const DATE_TIME_LITERAL_LEN: usize = 24;

/// Reasons a date-time literal is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    /// The text does not have the `YYYY-MM-DDTHH:MM:SS.mmmZ` shape.
    Malformed,
    /// The month is outside `01..=12`.
    Month(u32),
    /// The day does not exist in the given month of the given year.
    Day {
        /// The rejected day.
        day:   u32,
        /// The month the day was checked against.
        month: u32,
        /// The year the day was checked against.
        year:  i32,
    },
    /// The hour is outside `00..=23`.
    Hour(u32),
    /// The minute is outside `00..=59`.
    Minute(u32),
    /// The second is outside `00..=59`.
    Second(u32),
}

impl std::fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "expected the form YYYY-MM-DDTHH:MM:SS.mmmZ"),
            Self::Month(month) => write!(f, "month {month:02} is not between 01 and 12"),
            Self::Day { day, month, year } => write!(f,
                                                     "day {day:02} does not exist in month {month:02} of {year:04} (it has {} days)",
                                                     days_in_month(*year, *month)),
            Self::Hour(hour) => write!(f, "hour {hour:02} is not between 00 and 23"),
            Self::Minute(minute) => write!(f, "minute {minute:02} is not between 00 and 59"),
            Self::Second(second) => write!(f, "second {second:02} is not between 00 and 59"),
        }
    }
}

impl std::error::Error for DateTimeError {}

/// Returns `true` for Gregorian leap years.
///
/// ## Example
/// ```
/// use tyexpr::util::calendar::is_leap_year;
///
/// assert!(is_leap_year(2016));
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(!is_leap_year(2015));
/// ```
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-based) of `year`.
///
/// Months outside `1..=12` have no days.
///
/// ## Example
/// ```
/// use tyexpr::util::calendar::days_in_month;
///
/// assert_eq!(days_in_month(2016, 2), 29);
/// assert_eq!(days_in_month(2015, 2), 28);
/// assert_eq!(days_in_month(2015, 4), 30);
/// assert_eq!(days_in_month(2015, 13), 0);
/// ```
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Parses and validates a `YYYY-MM-DDTHH:MM:SS.mmmZ` literal as a UTC instant.
///
/// The fields are checked against the calendar before the instant is built,
/// so `2015-02-29T00:00:00.000Z` and `2015-04-31T00:00:00.000Z` are rejected
/// with the offending field named.
///
/// ## Errors
/// Returns a [`DateTimeError`] naming the first field that is out of range,
/// or [`DateTimeError::Malformed`] when the text does not have the literal's
/// shape.
///
/// ## Example
/// ```
/// use tyexpr::util::calendar::{DateTimeError, parse_date_time};
///
/// assert!(parse_date_time("2016-02-29T00:00:00.000Z").is_ok());
/// assert!(matches!(parse_date_time("2015-02-29T00:00:00.000Z"),
///                  Err(DateTimeError::Day { day: 29, month: 2, year: 2015 })));
/// assert_eq!(parse_date_time("2015-01-01T24:00:00.000Z"),
///            Err(DateTimeError::Hour(24)));
/// ```
pub fn parse_date_time(text: &str) -> Result<Instant, DateTimeError> {
    let bytes = text.as_bytes();
    if bytes.len() != DATE_TIME_LITERAL_LEN
       || bytes[4] != b'-'
       || bytes[7] != b'-'
       || bytes[10] != b'T'
       || bytes[13] != b':'
       || bytes[16] != b':'
       || bytes[19] != b'.'
       || bytes[23] != b'Z'
    {
        return Err(DateTimeError::Malformed);
    }

    let year = i32::try_from(digits(text, 0, 4)?).map_err(|_| DateTimeError::Malformed)?;
    let month = digits(text, 5, 7)?;
    let day = digits(text, 8, 10)?;
    let hour = digits(text, 11, 13)?;
    let minute = digits(text, 14, 16)?;
    let second = digits(text, 17, 19)?;
    let millisecond = digits(text, 20, 23)?;

    if !(1..=12).contains(&month) {
        return Err(DateTimeError::Month(month));
    }
    if day == 0 || day > days_in_month(year, month) {
        return Err(DateTimeError::Day { day, month, year });
    }
    if hour > 23 {
        return Err(DateTimeError::Hour(hour));
    }
    if minute > 59 {
        return Err(DateTimeError::Minute(minute));
    }
    if second > 59 {
        return Err(DateTimeError::Second(second));
    }

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_milli_opt(hour, minute, second, millisecond))
        .ok_or(DateTimeError::Malformed)?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// Formats an instant in the literal form accepted by [`parse_date_time`].
///
/// ## Example
/// ```
/// use tyexpr::util::calendar::{format_date_time, parse_date_time};
///
/// let instant = parse_date_time("2016-02-29T13:05:09.042Z").unwrap();
/// assert_eq!(format_date_time(&instant), "2016-02-29T13:05:09.042Z");
/// ```
#[must_use]
pub fn format_date_time(instant: &Instant) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Reads the ASCII digits in `text[start..end]` as a number.
fn digits(text: &str, start: usize, end: usize) -> Result<u32, DateTimeError> {
    let field = text.get(start..end).ok_or(DateTimeError::Malformed)?;
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateTimeError::Malformed);
    }
    field.parse().map_err(|_| DateTimeError::Malformed)
}
