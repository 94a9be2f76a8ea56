use crate::error::CalendarError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calendar_api_structs::logout::*;
use calendar_infra::CalendarContext;
use chrono::{DateTime, TimeZone, Utc};
use std::convert::TryFrom;

pub async fn logout_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let (_, claims) = protect_route(&http_req, &ctx).await?;

    let usecase = LogoutUseCase {
        jti: claims.jti,
        expires: revoked_until(claims.exp),
    };

    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "Successfully logged out".into(),
            })
        })
        .map_err(CalendarError::from)
}

/// Tokens expiring beyond what can be represented are revoked for good
fn revoked_until(exp: usize) -> DateTime<Utc> {
    i64::try_from(exp)
        .ok()
        .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Revokes an access token until it expires
#[derive(Debug)]
pub struct LogoutUseCase {
    pub jti: String,
    pub expires: DateTime<Utc>,
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
impl UseCase for LogoutUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "Logout";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .revoked_token_repo
            .revoke(&self.jti, self.expires)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::setup_context;

    #[test]
    fn revokes_until_token_expiry() {
        assert_eq!(
            revoked_until(1613865600),
            Utc.with_ymd_and_hms(2021, 2, 21, 0, 0, 0).unwrap()
        );
        assert_eq!(revoked_until(usize::MAX), DateTime::<Utc>::MAX_UTC);
    }

    #[actix_web::test]
    async fn revokes_token_that_never_expires() {
        let ctx = setup_context();
        let mut usecase = LogoutUseCase {
            jti: "token-id".into(),
            expires: revoked_until(usize::MAX),
        };
        usecase.execute(&ctx).await.unwrap();
        assert!(ctx
            .repos
            .revoked_token_repo
            .is_revoked("token-id")
            .await
            .unwrap());
    }
}
