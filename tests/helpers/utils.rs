use super::setup::TestApp;
use calendar_sdk::{CalendarSDK, RegisterInput, TokensDTO, User};

pub const PASSWORD: &str = "Secret123";

/// Registers a user and returns an sdk authenticated as that user
pub async fn register_user(
    app: &TestApp,
    sdk: &CalendarSDK,
    username: &str,
) -> (User, TokensDTO, CalendarSDK) {
    let res = sdk
        .user
        .register(RegisterInput {
            username: username.into(),
            email: format!("{}@example.com", username),
            password: PASSWORD.into(),
        })
        .await
        .expect("Expected to register user");

    let user_sdk = CalendarSDK::with_token(app.address.clone(), res.tokens.access_token.clone());
    (res.user, res.tokens, user_sdk)
}
