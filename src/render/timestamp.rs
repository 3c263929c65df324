use std::fmt::Display;

use chrono::{NaiveDateTime, TimeZone};

use crate::app::{FeederError, Result};
use crate::normalizer::FEED_TIMESTAMP_FORMAT;

/// Localized timestamps drop the `Z` and carry no offset.
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Reinterpret a feed timestamp (UTC, `YYYY-MM-DDTHH:MM:SSZ`) in `zone`.
pub fn localize<Tz>(raw: &str, zone: &Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let naive = NaiveDateTime::parse_from_str(raw, FEED_TIMESTAMP_FORMAT).map_err(|source| {
        FeederError::TimestampParse {
            value: raw.to_string(),
            source,
        }
    })?;

    Ok(naive
        .and_utc()
        .with_timezone(zone)
        .format(LOCAL_TIMESTAMP_FORMAT)
        .to_string())
}
