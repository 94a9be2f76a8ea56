mod date;
mod event;
mod reminder;
mod shared;
mod user;

pub use date::{format_utc, from_naive_utc, parse_utc, InvalidDateError};
pub use event::{
    CalendarEvent, InvalidEventError, DEFAULT_EVENT_COLOR, MAX_COLOR_LENGTH, MAX_TITLE_LENGTH,
};
pub use reminder::{InvalidReminderError, Reminder};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::{
    validate_email, validate_password, validate_username, InvalidCredentialsError, User,
    MAX_EMAIL_LENGTH,
};

pub use chrono::{DateTime, Duration, Utc};
