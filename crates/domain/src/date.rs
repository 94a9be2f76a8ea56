use chrono::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDateError {
    #[error("Datetime is required")]
    Missing,
    #[error("Invalid datetime format: `{0}`. Expected ISO 8601, e.g. 2021-03-01T10:00:00Z")]
    Malformed(String),
}

/// Formats a point in time as ISO 8601 in UTC with a `Z` suffix.
/// Sub-second precision is only included when present.
pub fn format_utc(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an ISO 8601 datetime and normalizes it to UTC.
///
/// Values carrying an offset (`Z`, `+02:00`) are converted. Values without
/// any offset are taken to already be in UTC.
pub fn parse_utc(datestr: &str) -> Result<DateTime<Utc>, InvalidDateError> {
    let datestr = datestr.trim();
    if datestr.is_empty() {
        return Err(InvalidDateError::Missing);
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(datestr) {
        return Ok(date.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    for format in &NAIVE_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(datestr, format) {
            return Ok(Utc.from_utc_datetime(&date));
        }
    }

    Err(InvalidDateError::Malformed(datestr.to_string()))
}

/// Converts a stored timestamp without timezone into UTC
pub fn from_naive_utc(date: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_formats_with_z_suffix() {
        let date = Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(format_utc(&date), "2021-03-01T10:00:00Z");

        let date = Utc
            .with_ymd_and_hms(2021, 3, 1, 10, 0, 0)
            .unwrap()
            .with_nanosecond(250_000_000)
            .unwrap();
        assert_eq!(format_utc(&date), "2021-03-01T10:00:00.250Z");
    }

    #[test]
    fn it_normalizes_offsets_to_utc() {
        let date = parse_utc("2021-03-01T12:00:00+02:00").unwrap();
        assert_eq!(format_utc(&date), "2021-03-01T10:00:00Z");

        let date = parse_utc("2021-03-01T10:00:00Z").unwrap();
        assert_eq!(format_utc(&date), "2021-03-01T10:00:00Z");
    }

    #[test]
    fn it_treats_naive_datetimes_as_utc() {
        let date = parse_utc("2021-03-01T10:00:00").unwrap();
        assert_eq!(format_utc(&date), "2021-03-01T10:00:00Z");

        let date = parse_utc("2021-03-01 10:00:00.5").unwrap();
        assert_eq!(format_utc(&date), "2021-03-01T10:00:00.500Z");
    }

    #[test]
    fn it_rejects_invalid_datetimes() {
        let invalid_dates = vec!["2021-13-01T10:00:00Z", "yesterday", "2021-02-30T10:00:00"];

        for date in &invalid_dates {
            assert!(parse_utc(date).is_err());
        }
        assert_eq!(parse_utc("  "), Err(InvalidDateError::Missing));
    }

    #[test]
    fn round_trips_through_string() {
        let date = Utc
            .with_ymd_and_hms(2024, 12, 24, 18, 30, 5)
            .unwrap()
            .with_nanosecond(123_456_000)
            .unwrap();
        assert_eq!(parse_utc(&format_utc(&date)).unwrap(), date);
    }
}
