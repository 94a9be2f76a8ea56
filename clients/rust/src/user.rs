use crate::{APIResponse, BaseClient};
use calendar_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn register(&self, input: RegisterInput) -> APIResponse<register::APIResponse> {
        let body = register::RequestBody {
            username: input.username,
            email: input.email,
            password: input.password,
        };
        self.base
            .post(body, "auth/register".into(), StatusCode::CREATED)
            .await
    }

    /// `username` may also be the email of the user
    pub async fn login(&self, username: &str, password: &str) -> APIResponse<login::APIResponse> {
        let body = login::RequestBody {
            username: username.into(),
            password: password.into(),
        };
        self.base
            .post(body, "auth/login".into(), StatusCode::OK)
            .await
    }

    pub async fn logout(&self) -> APIResponse<logout::APIResponse> {
        self.base
            .post((), "auth/logout".into(), StatusCode::OK)
            .await
    }

    /// Must be called by a client holding a refresh token
    pub async fn refresh(&self) -> APIResponse<refresh::APIResponse> {
        self.base
            .post((), "auth/refresh".into(), StatusCode::OK)
            .await
    }

    pub async fn me(&self) -> APIResponse<get_me::APIResponse> {
        self.base.get("users/me".into(), StatusCode::OK).await
    }
}
