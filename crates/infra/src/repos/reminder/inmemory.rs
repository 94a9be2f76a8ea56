use super::{IReminderRepo, MarkSentResult};
use crate::repos::shared::inmemory_repo::*;
use calendar_domain::{Reminder, ID};
use chrono::{DateTime, Duration, Utc};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.event_id == *event_id);
        reminders.sort_by(|r1, r2| r1.remind_at.cmp(&r2.remind_at));
        Ok(reminders)
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_and_delete_by(&self.reminders, |r| {
            r.event_id == *event_id
        }))
    }

    async fn find_due(&self, before: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.is_due(before, Duration::zero()));
        reminders.sort_by(|r1, r2| {
            r1.remind_at
                .cmp(&r2.remind_at)
                .then_with(|| r1.id.cmp(&r2.id))
        });
        Ok(reminders)
    }

    async fn mark_sent(
        &self,
        reminder_id: &ID,
        now: DateTime<Utc>,
    ) -> anyhow::Result<MarkSentResult> {
        let res = match update(reminder_id, &self.reminders, |r| r.mark_sent(now)) {
            Some(true) => MarkSentResult::Sent,
            Some(false) => MarkSentResult::AlreadySent,
            None => MarkSentResult::NotFound,
        };
        Ok(res)
    }
}
