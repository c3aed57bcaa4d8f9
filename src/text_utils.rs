use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

pub const UNKNOWN: &str = "Unknown";

fn to_int<T: std::str::FromStr>(caps: &Captures, name: &str) -> Option<T> {
    match caps.name(name) {
        Some(m) => m.as_str().parse::<T>().ok(),
        None => "0".parse::<T>().ok(),
    }
}

/// Parses a `created` value. Accepts `YYYY-MM-DD` optionally followed by a
/// time (`T` or space separated). Anything after the time, like a zone, is
/// ignored. Returns None for out of range dates.
pub fn parse_created(buf: &str) -> Option<NaiveDateTime> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(?P<y>\d{4})-(?P<m>\d{1,2})-(?P<d>\d{1,2})(?:[T ](?P<h>\d{1,2}):(?P<mn>\d{1,2})(?::(?P<s>\d{1,2}))?(?:\.\d+)?)?"
        ).unwrap();
    }

    let caps = DATE_REGEX.captures(buf.trim())?;

    let date = NaiveDate::from_ymd_opt(
        to_int::<i32>(&caps, "y")?,
        to_int::<u32>(&caps, "m")?,
        to_int::<u32>(&caps, "d")?,
    )?;
    let time = NaiveTime::from_hms_opt(
        to_int::<u32>(&caps, "h")?,
        to_int::<u32>(&caps, "mn")?,
        to_int::<u32>(&caps, "s")?,
    )?;

    Some(NaiveDateTime::new(date, time))
}

/// Long human readable form, e.g. `June 14, 2025`.
pub fn format_long_date(date_time: &Option<NaiveDateTime>) -> String {
    match date_time {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => UNKNOWN.to_string(),
    }
}
