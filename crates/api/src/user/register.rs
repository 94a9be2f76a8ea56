use crate::error::CalendarError;
use crate::shared::{
    auth::issue_tokens,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use calendar_api_structs::register::*;
use calendar_domain::{
    validate_email, validate_password, validate_username, InvalidCredentialsError, User,
};
use calendar_infra::CalendarContext;

pub async fn register_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<CalendarContext>,
) -> Result<HttpResponse, CalendarError> {
    let body = body.0;
    let usecase = RegisterUseCase {
        username: body.username,
        email: body.email,
        password: body.password,
    };

    let user = execute(usecase, &ctx).await.map_err(CalendarError::from)?;
    let tokens = issue_tokens(&user, true, &ctx)?;

    Ok(HttpResponse::Created().json(APIResponse::new(user, tokens)))
}

pub struct RegisterUseCase {
    pub username: String,
    pub email: String,
    pub password: String,
}

// Keeps the password out of the logs
impl std::fmt::Debug for RegisterUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUseCase")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidCredentials(InvalidCredentialsError),
    UsernameTaken,
    EmailTaken,
    PasswordHashing,
    StorageError,
}

impl From<UseCaseError> for CalendarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCredentials(e) => Self::BadClientData(e.to_string()),
            UseCaseError::UsernameTaken => Self::Conflict("Username already exists".into()),
            UseCaseError::EmailTaken => Self::Conflict("Email already exists".into()),
            UseCaseError::PasswordHashing | UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "Register";

    async fn execute(&mut self, ctx: &CalendarContext) -> Result<Self::Response, Self::Error> {
        let username = self.username.trim();
        let email = self.email.trim().to_lowercase();
        validate_username(username).map_err(UseCaseError::InvalidCredentials)?;
        validate_email(&email).map_err(UseCaseError::InvalidCredentials)?;
        validate_password(&self.password).map_err(UseCaseError::InvalidCredentials)?;

        let users = &ctx.repos.user_repo;
        if users
            .find_by_username(username)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .is_some()
        {
            return Err(UseCaseError::UsernameTaken);
        }
        if users
            .find_by_email(&email)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .is_some()
        {
            return Err(UseCaseError::EmailTaken);
        }

        let password_hash = bcrypt::hash(&self.password, ctx.config.password_hash_cost)
            .map_err(|_| UseCaseError::PasswordHashing)?;
        let user = User::new(username.to_string(), email, password_hash, ctx.sys.now());

        users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}
