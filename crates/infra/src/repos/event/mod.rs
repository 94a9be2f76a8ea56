mod inmemory;
mod postgres;

use calendar_domain::{CalendarEvent, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<CalendarEvent>>;
    /// Deletes the event. `Reminder`s of the event are deleted by the store
    /// where it enforces the relation, callers should not rely on it.
    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_domain::{Duration, DEFAULT_EVENT_COLOR};
    use chrono::Utc;

    fn event_factory(user_id: &ID) -> CalendarEvent {
        let now = Utc::now();
        CalendarEvent {
            id: Default::default(),
            user_id: user_id.clone(),
            title: "Planning".into(),
            description: Some("Quarterly planning".into()),
            start: now + Duration::hours(1),
            end: Some(now + Duration::hours(2)),
            all_day: false,
            color: DEFAULT_EVENT_COLOR.into(),
            created: now,
            updated: now,
        }
    }

    #[tokio::test]
    async fn crud_events() {
        let repo = InMemoryEventRepo::new();
        let user_id = ID::new();
        let mut event = event_factory(&user_id);

        repo.insert(&event).await.unwrap();
        repo.insert(&event_factory(&ID::new())).await.unwrap();
        assert_eq!(repo.find(&event.id).await.unwrap(), Some(event.clone()));

        event.title = "Retro".into();
        repo.save(&event).await.unwrap();
        let found = repo.find(&event.id).await.unwrap().expect("To find event");
        assert_eq!(found.title, "Retro");

        let user_events = repo.find_by_user(&user_id).await.unwrap();
        assert_eq!(user_events.len(), 1);
        assert_eq!(user_events[0].id, event.id);

        let deleted = repo.delete(&event.id).await.unwrap().expect("To delete event");
        assert_eq!(deleted.id, event.id);
        assert!(repo.find(&event.id).await.unwrap().is_none());
        assert!(repo.delete(&event.id).await.unwrap().is_none());
    }
}
