use calendar_domain::{format_utc, CalendarEvent, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendarEventDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_datetime: String,
    pub end_datetime: Option<String>,
    pub is_all_day: bool,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            id: event.id.clone(),
            user_id: event.user_id.clone(),
            title: event.title,
            description: event.description,
            start_datetime: format_utc(&event.start),
            end_datetime: event.end.as_ref().map(format_utc),
            is_all_day: event.all_day,
            color: event.color,
            created_at: format_utc(&event.created),
            updated_at: format_utc(&event.updated),
        }
    }
}
