use crate::{
    event::CalendarEvent,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// A `Reminder` represents a specific time before the start of a
/// `CalendarEvent` at which the owner of the event should be notified.
///
/// `notification_sent` only ever goes from `false` to `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `CalendarEvent` this `Reminder` is associated with
    pub event_id: ID,
    /// The point in time at which the owner should be notified
    pub remind_at: DateTime<Utc>,
    pub notification_sent: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderError {
    #[error("Reminder time must be before event start time")]
    NotBeforeEventStart,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Reminder {
    pub fn new(event_id: ID, remind_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            event_id,
            remind_at,
            notification_sent: false,
            created: now,
            updated: now,
        }
    }

    pub fn validate_for_event(
        remind_at: &DateTime<Utc>,
        event: &CalendarEvent,
    ) -> Result<(), InvalidReminderError> {
        if *remind_at >= event.start {
            return Err(InvalidReminderError::NotBeforeEventStart);
        }
        Ok(())
    }

    /// A reminder is due when it is unsent and its time has been reached
    /// or falls within the `lookahead` window from `now`.
    pub fn is_due(&self, now: DateTime<Utc>, lookahead: Duration) -> bool {
        !self.notification_sent && self.remind_at <= now + lookahead
    }

    /// Returns `false` if the notification was already marked as sent
    pub fn mark_sent(&mut self, now: DateTime<Utc>) -> bool {
        if self.notification_sent {
            return false;
        }
        self.notification_sent = true;
        self.updated = now;
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::DEFAULT_EVENT_COLOR;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 2, 21, 0, 0, 0).unwrap()
    }

    #[test]
    fn detects_due_reminders() {
        let lookahead = Duration::minutes(1);

        let reminder = Reminder::new(ID::new(), now() - Duration::seconds(1), now());
        assert!(reminder.is_due(now(), lookahead));

        let reminder = Reminder::new(ID::new(), now() + Duration::seconds(60), now());
        assert!(reminder.is_due(now(), lookahead));

        let reminder = Reminder::new(ID::new(), now() + Duration::seconds(61), now());
        assert!(!reminder.is_due(now(), lookahead));

        let reminder = Reminder::new(ID::new(), now() + Duration::minutes(10), now());
        assert!(!reminder.is_due(now(), lookahead));
    }

    #[test]
    fn sent_reminders_are_never_due() {
        let mut reminder = Reminder::new(ID::new(), now() - Duration::hours(1), now());
        assert!(reminder.mark_sent(now()));
        assert!(!reminder.is_due(now(), Duration::minutes(1)));
    }

    #[test]
    fn mark_sent_is_monotonic() {
        let created = now() - Duration::hours(1);
        let mut reminder = Reminder::new(ID::new(), now(), created);
        assert!(reminder.mark_sent(now()));
        assert!(reminder.notification_sent);
        assert_eq!(reminder.updated, now());

        let later = now() + Duration::minutes(5);
        assert!(!reminder.mark_sent(later));
        assert!(reminder.notification_sent);
        assert_eq!(reminder.updated, now());
    }

    #[test]
    fn reminder_must_precede_event_start() {
        let event = CalendarEvent {
            id: Default::default(),
            user_id: Default::default(),
            title: "Dentist".into(),
            description: None,
            start: now(),
            end: None,
            all_day: false,
            color: DEFAULT_EVENT_COLOR.into(),
            created: now(),
            updated: now(),
        };
        assert!(Reminder::validate_for_event(&(now() - Duration::minutes(10)), &event).is_ok());
        assert_eq!(
            Reminder::validate_for_event(&now(), &event),
            Err(InvalidReminderError::NotBeforeEventStart)
        );
        assert!(Reminder::validate_for_event(&(now() + Duration::minutes(1)), &event).is_err());
    }
}
