mod base;
mod event;
mod reminder;
mod status;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use calendar_api_structs::dtos::*;
pub use calendar_api_structs::update_event::RequestBody as UpdateEventBody;
pub use calendar_domain::ID;
use event::CalendarEventClient;
pub use event::{CreateEventInput, MoveEventInput, UpdateEventInput};
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;
pub use user::RegisterInput;

// Domain
pub use calendar_api_structs::dtos::CalendarEventDTO as CalendarEvent;
pub use calendar_api_structs::dtos::ReminderDTO as Reminder;
pub use calendar_api_structs::dtos::UserDTO as User;

/// Calendar Server SDK
///
/// The SDK contains methods for interacting with the calendar server API.
#[derive(Clone)]
pub struct CalendarSDK {
    pub event: CalendarEventClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl CalendarSDK {
    /// Client without credentials, only able to register, login and check health
    pub fn new(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    /// Client sending `token` as bearer token with every request
    pub fn with_token<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        Self::create(base)
    }

    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let event = CalendarEventClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            event,
            reminder,
            status,
            user,
        }
    }
}
