/// Calendar validation and formatting of date-time literals.
///
/// Literals have the shape `YYYY-MM-DDTHH:MM:SS.mmmZ`. Every field is range
/// checked, including the length of the month in leap and common years.
pub mod calendar;
