mod inmemory;
mod postgres;

use calendar_domain::{Reminder, ID};
use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

/// Outcome of trying to flip the sent flag of a `Reminder`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkSentResult {
    Sent,
    AlreadySent,
    NotFound,
}

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// All unsent reminders with a reminder time at or before `before`,
    /// ordered by reminder time.
    async fn find_due(&self, before: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>>;
    /// Marks the reminder as sent in a transaction of its own
    async fn mark_sent(&self, reminder_id: &ID, now: DateTime<Utc>)
        -> anyhow::Result<MarkSentResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_domain::Duration;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 2, 21, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn finds_only_unsent_reminders_before_timestamp() {
        let repo = InMemoryReminderRepo::new();
        let event_id = ID::new();

        let overdue = Reminder::new(event_id.clone(), now() - Duration::minutes(5), now());
        let at_limit = Reminder::new(event_id.clone(), now() + Duration::minutes(1), now());
        let later = Reminder::new(event_id.clone(), now() + Duration::minutes(10), now());
        let mut sent = Reminder::new(event_id.clone(), now() - Duration::minutes(1), now());
        sent.mark_sent(now());
        for r in &[&later, &sent, &at_limit, &overdue] {
            repo.insert(r).await.unwrap();
        }

        let due = repo.find_due(now() + Duration::minutes(1)).await.unwrap();
        assert_eq!(
            due.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
            vec![overdue.id, at_limit.id]
        );
    }

    #[tokio::test]
    async fn finds_due_reminders_up_to_the_end_of_time() {
        let repo = InMemoryReminderRepo::new();
        let reminder = Reminder::new(ID::new(), now() + Duration::weeks(5000), now());
        repo.insert(&reminder).await.unwrap();

        let due = repo.find_due(DateTime::<Utc>::MAX_UTC).await.unwrap();
        assert_eq!(due, vec![reminder]);
    }

    #[tokio::test]
    async fn mark_sent_only_flips_once() {
        let repo = InMemoryReminderRepo::new();
        let reminder = Reminder::new(ID::new(), now(), now() - Duration::hours(1));
        repo.insert(&reminder).await.unwrap();

        let res = repo.mark_sent(&reminder.id, now()).await.unwrap();
        assert_eq!(res, MarkSentResult::Sent);
        let stored = repo.find(&reminder.id).await.unwrap().expect("To find reminder");
        assert!(stored.notification_sent);
        assert_eq!(stored.updated, now());

        let res = repo
            .mark_sent(&reminder.id, now() + Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(res, MarkSentResult::AlreadySent);
        let stored = repo.find(&reminder.id).await.unwrap().expect("To find reminder");
        assert_eq!(stored.updated, now());

        let res = repo.mark_sent(&ID::new(), now()).await.unwrap();
        assert_eq!(res, MarkSentResult::NotFound);
    }

    #[tokio::test]
    async fn deletes_reminders_of_event() {
        let repo = InMemoryReminderRepo::new();
        let event_id = ID::new();
        let other_event_id = ID::new();
        let r1 = Reminder::new(event_id.clone(), now(), now());
        let r2 = Reminder::new(event_id.clone(), now(), now());
        let r3 = Reminder::new(other_event_id.clone(), now(), now());
        for r in &[&r1, &r2, &r3] {
            repo.insert(r).await.unwrap();
        }

        assert_eq!(repo.find_by_event(&event_id).await.unwrap().len(), 2);
        let deleted = repo.delete_by_event(&event_id).await.unwrap();
        assert_eq!(deleted.len(), 2);
        assert!(repo.find_by_event(&event_id).await.unwrap().is_empty());
        assert_eq!(repo.find_by_event(&other_event_id).await.unwrap().len(), 1);

        assert!(repo.delete(&r3.id).await.unwrap().is_some());
        assert!(repo.delete(&r3.id).await.unwrap().is_none());
    }
}
