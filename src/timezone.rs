//! Helpers for resolving the server's canonical timezone to local dates.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset for a canonical timezone name, e.g. "Pacific/Auckland".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get today's date in the given timezone.
///
/// Dates entered by users are calendar days in their own timezone, so "today"
/// must be computed with the local offset applied. Taking the date of the raw
/// UTC instant shifts the apparent day for anyone not at UTC+0.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a valid,
/// canonical timezone name.
pub fn current_local_date(canonical_timezone: &str) -> Result<Date, Error> {
    let Some(local_offset) = get_local_offset(canonical_timezone) else {
        tracing::error!("Invalid timezone {canonical_timezone}");
        return Err(Error::InvalidTimezone(canonical_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::{current_local_date, get_local_offset};
    use crate::Error;

    #[test]
    fn utc_timezone_matches_utc_date() {
        let today = current_local_date("Etc/UTC").unwrap();

        assert_eq!(today, OffsetDateTime::now_utc().date());
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert_eq!(get_local_offset("Moon/TranquilityBase"), None);
        assert_eq!(
            current_local_date("Moon/TranquilityBase"),
            Err(Error::InvalidTimezone("Moon/TranquilityBase".to_owned()))
        );
    }
}
