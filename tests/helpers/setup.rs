use calendar_api::Application;
use calendar_infra::{CalendarContext, Config, InMemoryNotificationSink, ReminderJobConfig};
use calendar_sdk::CalendarSDK;
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub config: Config,
    pub address: String,
    /// Every reminder notification sent by the reminder job
    pub notifications: Arc<InMemoryNotificationSink>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, CalendarSDK) {
    let mut ctx = CalendarContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.password_hash_cost = 4;
    ctx.config.reminder_job =
        ReminderJobConfig::new(Duration::from_millis(50), Duration::from_secs(60), false);
    let notifications = Arc::new(InMemoryNotificationSink::new());
    ctx.notifier = notifications.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        address: address.clone(),
        notifications,
    };
    let sdk = CalendarSDK::new(address);
    (app, sdk)
}
