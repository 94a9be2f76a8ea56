use crate::error::CalendarError;
use crate::shared::{
    auth::protect_route,
    parse_datetime_field,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::update_event::*;
use calendar_domain::{CalendarEvent, InvalidEventError, ID};
use calendar_infra::CalendarContext;
use chrono::{DateTime, Utc};

pub async fn update_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let start = match &body.start_datetime {
        Some(start) => Some(parse_datetime_field("start_datetime", start)?),
        None => None,
    };
    let end = match &body.end_datetime {
        Some(Some(end)) => Some(Some(parse_datetime_field("end_datetime", end)?)),
        Some(None) => Some(None),
        None => None,
    };
    let usecase = UpdateEventUseCase {
        user_id: user.id,
        event_id: path_params.event_id.clone(),
        title: body.title,
        description: body.description,
        start,
        end,
        all_day: body.is_all_day,
        color: body.color,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(CalendarError::from)
}

/// Partial update of a `CalendarEvent`. `None` leaves a field unchanged,
/// `Some(None)` clears an optional field.
#[derive(Debug, Default)]
pub struct UpdateEventUseCase {
    pub user_id: ID,
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<Option<DateTime<Utc>>>,
    pub all_day: Option<bool>,
    pub color: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidEvent(InvalidEventError),
    StorageError,
}

impl From<UseCaseError> for CalendarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidEvent(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        let mut e = match ctx
            .repos
            .event_repo
            .find(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
        {
            Some(event) if event.user_id == self.user_id => event,
            _ => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };

        if let Some(title) = &self.title {
            CalendarEvent::validate_title(title).map_err(UseCaseError::InvalidEvent)?;
            e.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            e.description = description.clone();
        }
        let start = self.start.unwrap_or(e.start);
        let end = match self.end {
            Some(end) => end,
            None => e.end,
        };
        // The merged values have to make up a valid timespan
        CalendarEvent::validate_timespan(&start, end.as_ref())
            .map_err(UseCaseError::InvalidEvent)?;
        e.start = start;
        e.end = end;
        if let Some(all_day) = self.all_day {
            e.all_day = all_day;
        }
        if let Some(color) = &self.color {
            CalendarEvent::validate_color(color).map_err(UseCaseError::InvalidEvent)?;
            e.color = color.clone();
        }
        e.updated = ctx.sys.now();

        ctx.repos
            .event_repo
            .save(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::setup_context;
    use calendar_domain::DEFAULT_EVENT_COLOR;
    use chrono::Duration;

    async fn insert_event(ctx: &CalendarContext) -> CalendarEvent {
        let start = ctx.sys.now() + Duration::hours(1);
        let event = CalendarEvent {
            id: Default::default(),
            user_id: Default::default(),
            title: "Standup".into(),
            description: Some("Daily".into()),
            start,
            end: Some(start + Duration::minutes(15)),
            all_day: false,
            color: DEFAULT_EVENT_COLOR.into(),
            created: start,
            updated: start,
        };
        ctx.repos.event_repo.insert(&event).await.unwrap();
        event
    }

    #[actix_web::test]
    async fn updates_only_given_fields() {
        let ctx = setup_context();
        let event = insert_event(&ctx).await;

        let mut usecase = UpdateEventUseCase {
            user_id: event.user_id.clone(),
            event_id: event.id.clone(),
            title: Some("Retro".into()),
            description: Some(None),
            end: Some(None),
            ..Default::default()
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.title, "Retro");
        assert_eq!(updated.description, None);
        assert_eq!(updated.start, event.start);
        assert_eq!(updated.end, None);
        assert_eq!(updated.color, event.color);
        assert_eq!(
            ctx.repos.event_repo.find(&event.id).await.unwrap(),
            Some(updated)
        );
    }

    #[actix_web::test]
    async fn validates_merged_timespan() {
        let ctx = setup_context();
        let event = insert_event(&ctx).await;

        // New start after the stored end
        let mut usecase = UpdateEventUseCase {
            user_id: event.user_id.clone(),
            event_id: event.id.clone(),
            start: Some(event.start + Duration::hours(2)),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(InvalidEventError::EndBeforeStart)
        );
    }

    #[actix_web::test]
    async fn hides_events_of_other_users() {
        let ctx = setup_context();
        let event = insert_event(&ctx).await;

        let mut usecase = UpdateEventUseCase {
            user_id: ID::default(),
            event_id: event.id.clone(),
            title: Some("Mine now".into()),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(event.id)
        );
    }

    #[actix_web::test]
    async fn rejects_long_color_and_keeps_event() {
        let ctx = setup_context();
        let event = insert_event(&ctx).await;

        let mut usecase = UpdateEventUseCase {
            user_id: event.user_id.clone(),
            event_id: event.id.clone(),
            color: Some("a".repeat(21)),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(InvalidEventError::ColorTooLong)
        );
        assert_eq!(
            ctx.repos.event_repo.find(&event.id).await.unwrap(),
            Some(event)
        );
    }
}
