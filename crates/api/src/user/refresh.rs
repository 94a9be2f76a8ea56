use crate::error::CalendarError;
use crate::shared::auth::{issue_tokens, protect_refresh_route};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::refresh::*;
use calendar_infra::CalendarContext;

pub async fn refresh_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (user, _) = protect_refresh_route(&http_req, &ctx).await?;
    let tokens = issue_tokens(&user, false, &ctx)?;

    Ok(HttpResponse::Ok().json(APIResponse { tokens }))
}
