use calendar_domain::{format_utc, CalendarEvent, Reminder, User, DateTime, Utc, ID};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::info;

/// Delivery channel for due `Reminder`s
#[async_trait::async_trait]
pub trait INotificationSink: Send + Sync {
    /// Delivers a notification about `reminder` to `user`. An error means
    /// the notification was not delivered.
    async fn notify(
        &self,
        user: &User,
        event: &CalendarEvent,
        reminder: &Reminder,
    ) -> anyhow::Result<()>;
}

/// Writes a log line for every notification
pub struct LogNotificationSink;

#[async_trait::async_trait]
impl INotificationSink for LogNotificationSink {
    async fn notify(
        &self,
        user: &User,
        event: &CalendarEvent,
        reminder: &Reminder,
    ) -> anyhow::Result<()> {
        info!(
            user_id = %user.id,
            event_id = %event.id,
            reminder_id = %reminder.id,
            "Reminder for {}: '{}' starts at {}",
            user.username,
            event.title,
            format_utc(&event.start)
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub reminder_id: ID,
    pub user_id: ID,
    pub username: String,
    pub event_title: String,
    pub event_start: DateTime<Utc>,
}

/// Keeps every delivered notification in memory
pub struct InMemoryNotificationSink {
    sent: Mutex<Vec<SentNotification>>,
    failing: Mutex<HashSet<ID>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Delivery will fail for the given reminder until `recover` is called
    pub fn fail_for(&self, reminder_id: &ID) {
        self.failing.lock().unwrap().insert(reminder_id.clone());
    }

    pub fn recover(&self, reminder_id: &ID) {
        self.failing.lock().unwrap().remove(reminder_id);
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationSink for InMemoryNotificationSink {
    async fn notify(
        &self,
        user: &User,
        event: &CalendarEvent,
        reminder: &Reminder,
    ) -> anyhow::Result<()> {
        if self.failing.lock().unwrap().contains(&reminder.id) {
            return Err(anyhow::anyhow!(
                "Delivery of reminder {} failed",
                reminder.id
            ));
        }
        self.sent.lock().unwrap().push(SentNotification {
            reminder_id: reminder.id.clone(),
            user_id: user.id.clone(),
            username: user.username.clone(),
            event_title: event.title.clone(),
            event_start: event.start,
        });
        Ok(())
    }
}
