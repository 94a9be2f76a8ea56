use crate::dtos::{TokensDTO, UserDTO};
use calendar_domain::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthenticatedUserResponse {
    pub user: UserDTO,
    pub tokens: TokensDTO,
}

impl AuthenticatedUserResponse {
    pub fn new(user: User, tokens: TokensDTO) -> Self {
        Self {
            user: UserDTO::new(user),
            tokens,
        }
    }
}

pub mod register {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    pub type APIResponse = AuthenticatedUserResponse;
}

pub mod login {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        /// Username or email
        pub username: String,
        pub password: String,
    }

    pub type APIResponse = AuthenticatedUserResponse;
}

pub mod logout {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub message: String,
    }
}

pub mod refresh {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub tokens: TokensDTO,
    }
}

pub mod get_me {
    use super::*;

    pub type APIResponse = UserResponse;
}
