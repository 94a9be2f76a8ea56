use crate::{error::CalendarError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::get_me::*;
use calendar_infra::CalendarContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
