mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, ReminderJobConfig};
pub use repos::{
    IEventRepo, IReminderRepo, IRevokedTokenRepo, IUserRepo, MarkSentResult, Repos,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct CalendarContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotificationSink>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl CalendarContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(LogNotificationSink),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(LogNotificationSink),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> CalendarContext {
    match get_psql_connection_string() {
        Some(postgres_connection_string) => {
            CalendarContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        None => {
            warn!(
                "{} env var is not set, all data is kept in memory and lost on shutdown.",
                PSQL_CONNECTION_STRING
            );
            CalendarContext::create_inmemory()
        }
    }
}

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

fn get_psql_connection_string() -> Option<String> {
    std::env::var(PSQL_CONNECTION_STRING).ok()
}

/// Applies the migrations under `migrations/`. Does nothing without a database.
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match get_psql_connection_string() {
        Some(connection_string) => connection_string,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    info!("Running database migrations");
    sqlx::migrate!().run(&pool).await
}
