use crate::{APIResponse, BaseClient, ID};
use calendar_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        event_id: ID,
        reminder_time: &str,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            reminder_time: reminder_time.into(),
        };
        self.base
            .post(
                body,
                format!("reminders/event/{}/reminders", event_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn list(&self, event_id: ID) -> APIResponse<get_event_reminders::APIResponse> {
        self.base
            .get(
                format!("reminders/event/{}/reminders", event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }
}
