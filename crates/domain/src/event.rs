use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub const DEFAULT_EVENT_COLOR: &str = "blue";
pub const MAX_TITLE_LENGTH: usize = 128;
pub const MAX_COLOR_LENGTH: usize = 20;

/// A `CalendarEvent` owned by a `User`. It exclusively owns its `Reminder`s,
/// deleting the event deletes them as well.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub color: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidEventError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Title can be at most {} characters long", MAX_TITLE_LENGTH)]
    TitleTooLong,
    #[error("Color can be at most {} characters long", MAX_COLOR_LENGTH)]
    ColorTooLong,
    #[error("End datetime must be after start datetime")]
    EndBeforeStart,
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl CalendarEvent {
    pub fn validate_title(title: &str) -> Result<(), InvalidEventError> {
        if title.trim().is_empty() {
            return Err(InvalidEventError::MissingTitle);
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(InvalidEventError::TitleTooLong);
        }
        Ok(())
    }

    pub fn validate_color(color: &str) -> Result<(), InvalidEventError> {
        if color.chars().count() > MAX_COLOR_LENGTH {
            return Err(InvalidEventError::ColorTooLong);
        }
        Ok(())
    }

    pub fn validate_timespan(
        start: &DateTime<Utc>,
        end: Option<&DateTime<Utc>>,
    ) -> Result<(), InvalidEventError> {
        match end {
            Some(end) if end <= start => Err(InvalidEventError::EndBeforeStart),
            _ => Ok(()),
        }
    }

    /// Moves the event to start at `new_start`.
    ///
    /// When no `new_end` is given and the event already has an end, the
    /// duration of the event is kept.
    pub fn move_to(
        &mut self,
        new_start: DateTime<Utc>,
        new_end: Option<Option<DateTime<Utc>>>,
    ) -> Result<(), InvalidEventError> {
        let end = match new_end {
            Some(end) => end,
            None => self.end.map(|end| new_start + (end - self.start)),
        };
        Self::validate_timespan(&new_start, end.as_ref())?;
        self.start = new_start;
        self.end = end;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn event_factory(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> CalendarEvent {
        CalendarEvent {
            id: Default::default(),
            user_id: Default::default(),
            title: "Standup".into(),
            description: None,
            start,
            end,
            all_day: false,
            color: DEFAULT_EVENT_COLOR.into(),
            created: start,
            updated: start,
        }
    }

    #[test]
    fn end_must_be_after_start() {
        let start = Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap();
        assert!(CalendarEvent::validate_timespan(&start, None).is_ok());
        assert!(CalendarEvent::validate_timespan(&start, Some(&(start + Duration::seconds(1)))).is_ok());
        assert_eq!(
            CalendarEvent::validate_timespan(&start, Some(&start)),
            Err(InvalidEventError::EndBeforeStart)
        );
        assert_eq!(
            CalendarEvent::validate_timespan(&start, Some(&(start - Duration::hours(1)))),
            Err(InvalidEventError::EndBeforeStart)
        );
    }

    #[test]
    fn rejects_blank_titles() {
        assert!(CalendarEvent::validate_title("Lunch").is_ok());
        assert_eq!(
            CalendarEvent::validate_title("   "),
            Err(InvalidEventError::MissingTitle)
        );
        assert!(CalendarEvent::validate_title(&"a".repeat(128)).is_ok());
        assert_eq!(
            CalendarEvent::validate_title(&"a".repeat(129)),
            Err(InvalidEventError::TitleTooLong)
        );
    }

    #[test]
    fn rejects_long_colors() {
        assert!(CalendarEvent::validate_color("#3788d8").is_ok());
        assert!(CalendarEvent::validate_color(&"a".repeat(20)).is_ok());
        assert_eq!(
            CalendarEvent::validate_color(&"a".repeat(21)),
            Err(InvalidEventError::ColorTooLong)
        );
    }

    #[test]
    fn moving_keeps_duration() {
        let start = Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap();
        let mut event = event_factory(start, Some(start + Duration::hours(2)));

        let new_start = start + Duration::days(1);
        event.move_to(new_start, None).unwrap();
        assert_eq!(event.start, new_start);
        assert_eq!(event.end, Some(new_start + Duration::hours(2)));
    }

    #[test]
    fn moving_with_explicit_end() {
        let start = Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap();
        let mut event = event_factory(start, None);

        let new_start = start + Duration::hours(1);
        event.move_to(new_start, None).unwrap();
        assert_eq!(event.end, None);

        let new_end = new_start + Duration::minutes(30);
        event.move_to(new_start, Some(Some(new_end))).unwrap();
        assert_eq!(event.end, Some(new_end));

        event.move_to(new_start, Some(None)).unwrap();
        assert_eq!(event.end, None);

        assert!(event.move_to(new_start, Some(Some(start))).is_err());
        assert_eq!(event.start, new_start);
    }
}
