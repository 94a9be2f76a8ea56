use crate::error::CalendarError;
use crate::shared::{
    auth::protect_route,
    parse_datetime_field,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::create_reminder::*;
use calendar_domain::{InvalidReminderError, Reminder, ID};
use calendar_infra::CalendarContext;
use chrono::{DateTime, Utc};

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = CreateReminderUseCase {
        user_id: user.id,
        event_id: path_params.event_id.clone(),
        remind_at: parse_datetime_field("reminder_time", &body.reminder_time)?,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(CalendarError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub event_id: ID,
    pub remind_at: DateTime<Utc>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EventNotFound(ID),
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for CalendarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx
            .repos
            .event_repo
            .find(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
        {
            Some(event) if event.user_id == self.user_id => event,
            _ => return Err(UseCaseError::EventNotFound(self.event_id.clone())),
        };

        Reminder::validate_for_event(&self.remind_at, &event)
            .map_err(UseCaseError::InvalidReminder)?;

        let reminder = Reminder::new(event.id, self.remind_at, ctx.sys.now());
        ctx.repos
            .reminder_repo
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::setup_context;
    use calendar_domain::{CalendarEvent, DEFAULT_EVENT_COLOR};
    use chrono::Duration;

    async fn insert_event(ctx: &CalendarContext) -> CalendarEvent {
        let now = ctx.sys.now();
        let event = CalendarEvent {
            id: Default::default(),
            user_id: Default::default(),
            title: "Flight".into(),
            description: None,
            start: now + Duration::hours(3),
            end: None,
            all_day: false,
            color: DEFAULT_EVENT_COLOR.into(),
            created: now,
            updated: now,
        };
        ctx.repos.event_repo.insert(&event).await.unwrap();
        event
    }

    #[actix_web::test]
    async fn creates_unsent_reminder_before_event() {
        let ctx = setup_context();
        let event = insert_event(&ctx).await;

        let mut usecase = CreateReminderUseCase {
            user_id: event.user_id.clone(),
            event_id: event.id.clone(),
            remind_at: event.start - Duration::hours(1),
        };
        let reminder = usecase.execute(&ctx).await.unwrap();
        assert!(!reminder.notification_sent);
        assert_eq!(
            ctx.repos.reminder_repo.find_by_event(&event.id).await.unwrap(),
            vec![reminder]
        );
    }

    #[actix_web::test]
    async fn rejects_reminder_at_or_after_event_start() {
        let ctx = setup_context();
        let event = insert_event(&ctx).await;

        let mut usecase = CreateReminderUseCase {
            user_id: event.user_id.clone(),
            event_id: event.id.clone(),
            remind_at: event.start,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidReminder(InvalidReminderError::NotBeforeEventStart)
        );
    }

    #[actix_web::test]
    async fn rejects_event_of_other_user() {
        let ctx = setup_context();
        let event = insert_event(&ctx).await;

        let mut usecase = CreateReminderUseCase {
            user_id: ID::default(),
            event_id: event.id.clone(),
            remind_at: event.start - Duration::hours(1),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::EventNotFound(event.id)
        );
    }
}
