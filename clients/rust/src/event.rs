use crate::{APIResponse, BaseClient, ID};
use calendar_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct CalendarEventClient {
    base: Arc<BaseClient>,
}

pub type CreateEventInput = create_event::RequestBody;

pub struct UpdateEventInput {
    pub event_id: ID,
    pub body: update_event::RequestBody,
}

pub struct MoveEventInput {
    pub event_id: ID,
    pub start_datetime: String,
    /// `None` keeps the duration, `Some(None)` removes the end
    pub end_datetime: Option<Option<String>>,
}

impl CalendarEventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateEventInput) -> APIResponse<create_event::APIResponse> {
        self.base
            .post(input, "events".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, event_id: ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_events::APIResponse> {
        self.base.get("events".into(), StatusCode::OK).await
    }

    pub async fn update(&self, input: UpdateEventInput) -> APIResponse<update_event::APIResponse> {
        self.base
            .put(
                input.body,
                format!("events/{}", input.event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn move_to(&self, input: MoveEventInput) -> APIResponse<move_event::APIResponse> {
        let body = move_event::RequestBody {
            start_datetime: input.start_datetime,
            end_datetime: input.end_datetime,
        };
        self.base
            .put(
                body,
                format!("events/{}/move", input.event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, event_id: ID) -> APIResponse<delete_event::APIResponse> {
        self.base
            .delete(format!("events/{}", event_id), StatusCode::OK)
            .await
    }
}
