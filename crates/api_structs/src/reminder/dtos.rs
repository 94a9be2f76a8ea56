use calendar_domain::{format_utc, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReminderDTO {
    pub id: ID,
    pub event_id: ID,
    pub reminder_time: String,
    pub notification_sent: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id.clone(),
            event_id: reminder.event_id.clone(),
            reminder_time: format_utc(&reminder.remind_at),
            notification_sent: reminder.notification_sent,
            created_at: format_utc(&reminder.created),
            updated_at: format_utc(&reminder.updated),
        }
    }
}
