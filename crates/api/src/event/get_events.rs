use crate::error::CalendarError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::get_events::*;
use calendar_domain::{CalendarEvent, ID};
use calendar_infra::CalendarContext;

pub async fn get_events_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetEventsUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(CalendarError::from)
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for CalendarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<CalendarEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .event_repo
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
