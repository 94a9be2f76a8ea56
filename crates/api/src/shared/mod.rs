pub mod auth;
pub mod usecase;

use crate::error::CalendarError;
use calendar_domain::{parse_utc, DateTime, Utc};

/// Parses a datetime coming from a request body
pub fn parse_datetime_field(field: &str, value: &str) -> Result<DateTime<Utc>, CalendarError> {
    parse_utc(value).map_err(|e| {
        CalendarError::BadClientData(format!("Invalid value for `{}`: {}", field, e))
    })
}

#[cfg(test)]
pub mod test_utils {
    use chrono::{DateTime, TimeZone, Utc};
    use calendar_infra::{CalendarContext, ISys};
    use std::sync::Arc;

    /// Sun Feb 21 2021 00:00:00 UTC
    pub struct StaticTimeSys {}
    impl ISys for StaticTimeSys {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2021, 2, 21, 0, 0, 0).unwrap()
        }
    }

    pub fn setup_context() -> CalendarContext {
        let mut ctx = CalendarContext::create_inmemory();
        ctx.config.password_hash_cost = 4;
        ctx.sys = Arc::new(StaticTimeSys {});
        ctx
    }
}
