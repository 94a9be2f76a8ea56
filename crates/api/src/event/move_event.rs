use crate::error::CalendarError;
use crate::shared::{
    auth::protect_route,
    parse_datetime_field,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::move_event::*;
use calendar_domain::{CalendarEvent, InvalidEventError, ID};
use calendar_infra::CalendarContext;
use chrono::{DateTime, Utc};

pub async fn move_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let end = match &body.end_datetime {
        Some(Some(end)) => Some(Some(parse_datetime_field("end_datetime", end)?)),
        Some(None) => Some(None),
        None => None,
    };
    let usecase = MoveEventUseCase {
        user_id: user.id,
        event_id: path_params.event_id.clone(),
        start: parse_datetime_field("start_datetime", &body.start_datetime)?,
        end,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(CalendarError::from)
}

/// Drag and drop of a `CalendarEvent` in the calendar view
#[derive(Debug)]
pub struct MoveEventUseCase {
    pub user_id: ID,
    pub event_id: ID,
    pub start: DateTime<Utc>,
    pub end: Option<Option<DateTime<Utc>>>,
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
impl UseCase for MoveEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "MoveEvent";

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

        e.move_to(self.start, self.end)
            .map_err(UseCaseError::InvalidEvent)?;
        e.updated = ctx.sys.now();

        ctx.repos
            .event_repo
            .save(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(e)
    }
}
