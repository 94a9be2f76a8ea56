mod event;
mod reminder;
mod revoked_token;
mod shared;
mod user;

use event::{InMemoryEventRepo, PostgresEventRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use revoked_token::{InMemoryRevokedTokenRepo, PostgresRevokedTokenRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use event::IEventRepo;
pub use reminder::{IReminderRepo, MarkSentResult};
pub use revoked_token::IRevokedTokenRepo;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub user_repo: Arc<dyn IUserRepo>,
    pub event_repo: Arc<dyn IEventRepo>,
    pub reminder_repo: Arc<dyn IReminderRepo>,
    pub revoked_token_repo: Arc<dyn IRevokedTokenRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            reminder_repo: Arc::new(PostgresReminderRepo::new(pool.clone())),
            revoked_token_repo: Arc::new(PostgresRevokedTokenRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            user_repo: Arc::new(InMemoryUserRepo::new()),
            event_repo: Arc::new(InMemoryEventRepo::new()),
            reminder_repo: Arc::new(InMemoryReminderRepo::new()),
            revoked_token_repo: Arc::new(InMemoryRevokedTokenRepo::new()),
        }
    }
}
