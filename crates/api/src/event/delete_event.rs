use crate::error::CalendarError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::delete_event::*;
use calendar_domain::{CalendarEvent, ID};
use calendar_infra::CalendarContext;
use tracing::error;

pub async fn delete_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteEventUseCase {
        user_id: user.id,
        event_id: path_params.event_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(CalendarError::from)
}

/// Deletes a `CalendarEvent` together with its `Reminder`s
#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub user_id: ID,
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for CalendarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        match ctx
            .repos
            .event_repo
            .find(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
        {
            Some(event) if event.user_id == self.user_id => (),
            _ => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };

        // Reminders go first, an event is never deleted while its reminders remain
        ctx.repos
            .reminder_repo
            .delete_by_event(&self.event_id)
            .await
            .map_err(|e| {
                error!(
                    "Unable to delete reminders of event {}: {:?}",
                    self.event_id, e
                );
                UseCaseError::StorageError
            })?;

        let e = ctx
            .repos
            .event_repo
            .delete(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        Ok(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::setup_context;
    use calendar_domain::{Reminder, DEFAULT_EVENT_COLOR};
    use calendar_infra::{IReminderRepo, MarkSentResult};
    use chrono::{DateTime, Duration, Utc};
    use std::sync::Arc;

    async fn insert_event_with_reminder(ctx: &CalendarContext) -> (CalendarEvent, Reminder) {
        let now = ctx.sys.now();
        let start = now + Duration::hours(1);
        let event = CalendarEvent {
            id: Default::default(),
            user_id: Default::default(),
            title: "Dentist".into(),
            description: None,
            start,
            end: None,
            all_day: false,
            color: DEFAULT_EVENT_COLOR.into(),
            created: now,
            updated: now,
        };
        ctx.repos.event_repo.insert(&event).await.unwrap();
        let reminder = Reminder::new(event.id.clone(), start - Duration::minutes(10), now);
        ctx.repos.reminder_repo.insert(&reminder).await.unwrap();
        (event, reminder)
    }

    #[actix_web::test]
    async fn deletes_reminders_of_event() {
        let ctx = setup_context();
        let (event, reminder) = insert_event_with_reminder(&ctx).await;

        let mut usecase = DeleteEventUseCase {
            user_id: ID::default(),
            event_id: event.id.clone(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(event.id.clone())
        );

        let mut usecase = DeleteEventUseCase {
            user_id: event.user_id.clone(),
            event_id: event.id.clone(),
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap(), event);
        assert!(ctx.repos.event_repo.find(&event.id).await.unwrap().is_none());
        assert!(ctx
            .repos
            .reminder_repo
            .find(&reminder.id)
            .await
            .unwrap()
            .is_none());
    }

    /// Reminder store that cannot delete reminders
    struct StuckReminderRepo {
        inner: Arc<dyn IReminderRepo>,
    }

    #[async_trait::async_trait]
    impl IReminderRepo for StuckReminderRepo {
        async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
            self.inner.insert(reminder).await
        }
        async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
            self.inner.find(reminder_id).await
        }
        async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
            self.inner.find_by_event(event_id).await
        }
        async fn delete(&self, _reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
            Err(anyhow::anyhow!("Connection reset"))
        }
        async fn delete_by_event(&self, _event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
            Err(anyhow::anyhow!("Connection reset"))
        }
        async fn find_due(&self, before: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
            self.inner.find_due(before).await
        }
        async fn mark_sent(
            &self,
            reminder_id: &ID,
            now: DateTime<Utc>,
        ) -> anyhow::Result<MarkSentResult> {
            self.inner.mark_sent(reminder_id, now).await
        }
    }

    #[actix_web::test]
    async fn keeps_event_when_reminders_cannot_be_deleted() {
        let mut ctx = setup_context();
        ctx.repos.reminder_repo = Arc::new(StuckReminderRepo {
            inner: ctx.repos.reminder_repo.clone(),
        });
        let (event, reminder) = insert_event_with_reminder(&ctx).await;

        let mut usecase = DeleteEventUseCase {
            user_id: event.user_id.clone(),
            event_id: event.id.clone(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::StorageError
        );
        assert_eq!(
            ctx.repos.event_repo.find(&event.id).await.unwrap(),
            Some(event)
        );
        assert!(ctx
            .repos
            .reminder_repo
            .find(&reminder.id)
            .await
            .unwrap()
            .is_some());
    }
}
