use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A registered `User` owning `CalendarEvent`s.
///
/// The password is only ever held as a hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            username,
            email,
            password_hash,
            created: now,
            updated: now,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidCredentialsError {
    #[error("Username must be between 3 and 64 characters")]
    UsernameLength,
    #[error("Username can only contain letters, numbers, '_', '-' and '.'")]
    UsernameCharacters,
    #[error("Invalid email address")]
    Email,
    #[error("Email can be at most {} characters long", MAX_EMAIL_LENGTH)]
    EmailLength,
    #[error("Password must be at least 8 characters long")]
    PasswordLength,
    #[error("Password must contain an uppercase letter, a lowercase letter and a digit")]
    PasswordStrength,
}

pub fn validate_username(username: &str) -> Result<(), InvalidCredentialsError> {
    let len = username.chars().count();
    if !(3..=64).contains(&len) {
        return Err(InvalidCredentialsError::UsernameLength);
    }
    let valid_chars = username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.');
    if !valid_chars {
        return Err(InvalidCredentialsError::UsernameCharacters);
    }
    Ok(())
}

pub const MAX_EMAIL_LENGTH: usize = 255;

pub fn validate_email(email: &str) -> Result<(), InvalidCredentialsError> {
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(InvalidCredentialsError::EmailLength);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(InvalidCredentialsError::Email);
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(InvalidCredentialsError::Email),
    };
    let labels = domain.split('.').collect::<Vec<_>>();
    if local.is_empty() || labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(InvalidCredentialsError::Email);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), InvalidCredentialsError> {
    if password.chars().count() < 8 {
        return Err(InvalidCredentialsError::PasswordLength);
    }
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(InvalidCredentialsError::PasswordStrength);
    }
    Ok(())
}
