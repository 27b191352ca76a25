use chrono::{DateTime, Datelike, NaiveDate, NaiveTime};

pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_D: i64 = 60 * 60 * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
}

// Time Helper functions

/// Parses an ISO `YYYY-MM-DD` date string.
pub fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::STANDARD_TIME_FORMAT)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

/// UTC calendar date of a unix timestamp (seconds).
pub fn epoch_sec_to_date(epoch_sec: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(epoch_sec, 0).map(|dt| dt.date_naive())
}

/// Unix timestamp (seconds) of midnight UTC on `date`.
pub fn date_to_epoch_sec(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Coarse week-of-month bucket: `floor((day_of_month + day_of_week) / 7)`,
/// with Sunday as day 0. Not ISO week numbering.
pub fn approx_week_number(date: NaiveDate) -> u32 {
    (date.day() + date.weekday().num_days_from_sunday()) / 7
}
