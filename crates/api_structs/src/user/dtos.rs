use calendar_domain::{format_utc, User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UserDTO {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username,
            email: user.email,
            created_at: format_utc(&user.created),
            updated_at: format_utc(&user.updated),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TokensDTO {
    pub access_token: String,
    /// Only issued on register and login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
    /// Lifetime of the access token in seconds
    pub expires_in: u64,
}
