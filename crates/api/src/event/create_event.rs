use crate::error::CalendarError;
use crate::shared::{
    auth::protect_route,
    parse_datetime_field,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::create_event::*;
use calendar_domain::{CalendarEvent, InvalidEventError, DEFAULT_EVENT_COLOR, ID};
use calendar_infra::CalendarContext;
use chrono::{DateTime, Utc};

pub async fn create_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let start = parse_datetime_field("start_datetime", &body.start_datetime)?;
    let end = match &body.end_datetime {
        Some(end) => Some(parse_datetime_field("end_datetime", end)?),
        None => None,
    };
    let usecase = CreateEventUseCase {
        user_id: user.id,
        title: body.title,
        description: body.description,
        start,
        end,
        all_day: body.is_all_day.unwrap_or(false),
        color: body.color,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Created().json(APIResponse::new(event)))
        .map_err(CalendarError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub color: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEvent(InvalidEventError),
    StorageError,
}

impl From<UseCaseError> for CalendarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEvent(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        CalendarEvent::validate_title(&self.title).map_err(UseCaseError::InvalidEvent)?;
        if let Some(color) = &self.color {
            CalendarEvent::validate_color(color).map_err(UseCaseError::InvalidEvent)?;
        }
        CalendarEvent::validate_timespan(&self.start, self.end.as_ref())
            .map_err(UseCaseError::InvalidEvent)?;

        let now = ctx.sys.now();
        let e = CalendarEvent {
            id: Default::default(),
            user_id: self.user_id.clone(),
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            start: self.start,
            end: self.end,
            all_day: self.all_day,
            color: self
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_EVENT_COLOR.into()),
            created: now,
            updated: now,
        };

        ctx.repos
            .event_repo
            .insert(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::setup_context;
    use chrono::Duration;

    fn usecase(ctx: &CalendarContext) -> CreateEventUseCase {
        let start = ctx.sys.now() + Duration::hours(1);
        CreateEventUseCase {
            user_id: ID::default(),
            title: "Standup".into(),
            description: None,
            start,
            end: Some(start + Duration::minutes(15)),
            all_day: false,
            color: None,
        }
    }

    #[actix_web::test]
    async fn creates_event_with_default_color() {
        let ctx = setup_context();
        let mut usecase = usecase(&ctx);

        let event = usecase.execute(&ctx).await.unwrap();
        assert_eq!(event.color, DEFAULT_EVENT_COLOR);
        assert_eq!(event.created, ctx.sys.now());
        assert_eq!(
            ctx.repos.event_repo.find(&event.id).await.unwrap(),
            Some(event)
        );
    }

    #[actix_web::test]
    async fn rejects_end_before_start() {
        let ctx = setup_context();
        let mut usecase = usecase(&ctx);
        usecase.end = Some(usecase.start);

        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidEvent(InvalidEventError::EndBeforeStart)
        );
    }

    #[actix_web::test]
    async fn rejects_empty_title() {
        let ctx = setup_context();
        let mut usecase = usecase(&ctx);
        usecase.title = "  ".into();

        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidEvent(InvalidEventError::MissingTitle)
        );
    }

    #[actix_web::test]
    async fn rejects_color_longer_than_stored_column() {
        let ctx = setup_context();
        let mut usecase = usecase(&ctx);
        usecase.color = Some("a".repeat(21));

        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidEvent(InvalidEventError::ColorTooLong)
        );
    }
}
