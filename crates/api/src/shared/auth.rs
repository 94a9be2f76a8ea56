use crate::error::CalendarError;
use actix_web::HttpRequest;
use calendar_api_structs::dtos::TokensDTO;
use calendar_domain::{User, ID};
use calendar_infra::CalendarContext;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Subject, the id of the `User`
    pub sub: String,
    pub username: String,
    /// Unique token id, used to revoke the token on logout
    pub jti: String,
    pub token_type: TokenType,
}

fn create_token(
    user: &User,
    token_type: TokenType,
    ctx: &CalendarContext,
) -> anyhow::Result<String> {
    let ttl = match token_type {
        TokenType::Access => ctx.config.access_token_ttl,
        TokenType::Refresh => ctx.config.refresh_token_ttl,
    };
    let iat = ctx.sys.now().timestamp() as usize;
    let claims = Claims {
        exp: iat.saturating_add(ttl.as_secs() as usize),
        iat,
        sub: user.id.to_string(),
        username: user.username.clone(),
        jti: ID::new().to_string(),
        token_type,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Issues an access token, and a refresh token if `with_refresh_token` is set
pub fn issue_tokens(
    user: &User,
    with_refresh_token: bool,
    ctx: &CalendarContext,
) -> Result<TokensDTO, CalendarError> {
    let issue = |token_type| {
        create_token(user, token_type, ctx).map_err(|e| {
            error!("Unable to create token: {:?}", e);
            CalendarError::InternalError
        })
    };

    let access_token = issue(TokenType::Access)?;
    let refresh_token = if with_refresh_token {
        Some(issue(TokenType::Refresh)?)
    } else {
        None
    };

    Ok(TokensDTO {
        access_token,
        refresh_token,
        token_type: "Bearer".into(),
        expires_in: ctx.config.access_token_ttl.as_secs(),
    })
}

fn decode_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?
    .claims;

    Ok(claims)
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replacen("Bearer", "", 1)
        .replacen("bearer", "", 1)
        .trim()
        .to_string()
}

async fn authenticate(
    req: &HttpRequest,
    ctx: &CalendarContext,
    token_type: TokenType,
) -> Result<(User, Claims), CalendarError> {
    let token = match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(CalendarError::Unauthorized(
                    "Malformed authorization header".into(),
                ))
            }
        },
        None => {
            return Err(CalendarError::Unauthorized(
                "Missing authorization header".into(),
            ))
        }
    };

    let claims = decode_token(&token, &ctx.config.jwt_secret)
        .map_err(|_| CalendarError::Unauthorized("Invalid or expired token".into()))?;
    if claims.token_type != token_type {
        return Err(CalendarError::Unauthorized(format!(
            "Expected a token of type {:?}",
            token_type
        )));
    }

    let revoked = ctx
        .repos
        .revoked_token_repo
        .is_revoked(&claims.jti)
        .await
        .map_err(|e| {
            error!("Unable to check token blocklist: {:?}", e);
            CalendarError::InternalError
        })?;
    if revoked {
        return Err(CalendarError::Unauthorized("Token has been revoked".into()));
    }

    let user_id: ID = claims
        .sub
        .parse()
        .map_err(|_| CalendarError::Unauthorized("Invalid or expired token".into()))?;
    let user = ctx.repos.user_repo.find(&user_id).await.map_err(|e| {
        error!("Unable to find user of token: {:?}", e);
        CalendarError::InternalError
    })?;

    match user {
        Some(user) => Ok((user, claims)),
        None => Err(CalendarError::Unauthorized(
            "Unable to find user from credentials".into(),
        )),
    }
}

/// Only lets requests with a valid, unrevoked access token through
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &CalendarContext,
) -> Result<(User, Claims), CalendarError> {
    authenticate(req, ctx, TokenType::Access).await
}

/// Same as `protect_route` but for refresh tokens
pub async fn protect_refresh_route(
    req: &HttpRequest,
    ctx: &CalendarContext,
) -> Result<(User, Claims), CalendarError> {
    authenticate(req, ctx, TokenType::Refresh).await
}
