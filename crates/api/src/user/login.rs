use crate::error::CalendarError;
use crate::shared::{
    auth::issue_tokens,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use calendar_api_structs::login::*;
use calendar_domain::User;
use calendar_infra::CalendarContext;

pub async fn login_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let body = body.0;
    let usecase = LoginUseCase {
        username_or_email: body.username,
        password: body.password,
    };

    let user = execute(usecase, &ctx).await.map_err(CalendarError::from)?;
    let tokens = issue_tokens(&user, true, &ctx)?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user, tokens)))
}

pub struct LoginUseCase {
    pub username_or_email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUseCase")
            .field("username_or_email", &self.username_or_email)
            .finish()
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidCredentials,
    StorageError,
}

impl From<UseCaseError> for CalendarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid username or password".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "Login";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        let identifier = self.username_or_email.trim();
        let user = if identifier.contains('@') {
            ctx.repos
                .user_repo
                .find_by_email(&identifier.to_lowercase())
                .await
        } else {
            ctx.repos.user_repo.find_by_username(identifier).await
        }
        .map_err(|_| UseCaseError::StorageError)?
        .ok_or(UseCaseError::InvalidCredentials)?;

        match bcrypt::verify(&self.password, &user.password_hash) {
            Ok(true) => Ok(user),
            _ => Err(UseCaseError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::setup_context;
    use crate::user::register::RegisterUseCase;

    async fn register(ctx: &CalendarContext) -> User {
        RegisterUseCase {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "Secret123".into(),
        }
        .execute(ctx)
        .await
        .unwrap()
    }

    #[actix_web::test]
    async fn logs_in_with_username_or_email() {
        let ctx = setup_context();
        let user = register(&ctx).await;

        for identifier in &["alice", "ALICE@example.com"] {
            let mut usecase = LoginUseCase {
                username_or_email: identifier.to_string(),
                password: "Secret123".into(),
            };
            assert_eq!(usecase.execute(&ctx).await.unwrap().id, user.id);
        }
    }

    #[actix_web::test]
    async fn rejects_wrong_password_and_unknown_user() {
        let ctx = setup_context();
        register(&ctx).await;

        let mut usecase = LoginUseCase {
            username_or_email: "alice".into(),
            password: "Secret124".into(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidCredentials
        );

        let mut usecase = LoginUseCase {
            username_or_email: "bob".into(),
            password: "Secret123".into(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidCredentials
        );
    }
}
