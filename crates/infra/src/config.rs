use calendar_utils::create_random_secret;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign and verify json web tokens
    pub jwt_secret: String,
    /// How long an access token is valid
    pub access_token_ttl: Duration,
    /// How long a refresh token is valid
    pub refresh_token_ttl: Duration,
    /// Bcrypt cost used when hashing passwords
    pub password_hash_cost: u32,
    pub reminder_job: ReminderJobConfig,
}

/// Settings for the background job dispatching due `Reminder`s
#[derive(Debug, Clone)]
pub struct ReminderJobConfig {
    /// Time between two runs of the job
    pub interval: Duration,
    /// Reminders due before `now + lookahead` are sent in the current run.
    /// Never smaller than `interval`, otherwise a reminder could fall in
    /// the gap between two runs and only be sent one run late.
    pub lookahead: Duration,
    /// Delay the first run until the start of the next minute
    pub align_to_minute: bool,
}

impl ReminderJobConfig {
    pub fn new(interval: Duration, lookahead: Duration, align_to_minute: bool) -> Self {
        let lookahead = if lookahead < interval {
            warn!(
                "Reminder lookahead of {:?} is smaller than the job interval of {:?}, using the interval as lookahead.",
                lookahead, interval
            );
            interval
        } else {
            lookahead
        };
        Self {
            interval,
            lookahead,
            align_to_minute,
        }
    }
}

impl Default for ReminderJobConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(60), Duration::from_secs(60), true)
    }
}

fn parse_env_var<T: FromStr + ToString>(name: &str, default: T) -> T {
    let value = match std::env::var(name) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default value: {}.",
                name,
                value,
                default.to_string()
            );
            default
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET_KEY") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET_KEY environment variable. Going to create one.");
                info!("Tokens issued with a generated secret are invalidated on restart.");
                create_random_secret(32)
            }
        };
        let port = parse_env_var("PORT", 5000);

        let access_token_ttl = parse_env_var("JWT_ACCESS_TOKEN_EXPIRES_SECS", 60 * 60);
        let refresh_token_ttl =
            parse_env_var("JWT_REFRESH_TOKEN_EXPIRES_SECS", 60 * 60 * 24 * 30);

        // Bcrypt accepts costs between 4 and 31
        let password_hash_cost = parse_env_var::<u32>("PASSWORD_HASH_COST", 12).max(4).min(31);

        let interval = parse_env_var::<u64>("REMINDER_JOB_INTERVAL_SECS", 60).max(1);
        let lookahead = parse_env_var("REMINDER_LOOKAHEAD_SECS", 60);
        let align_to_minute = parse_env_var("REMINDER_JOB_ALIGN_TO_MINUTE", true);

        Self {
            port,
            jwt_secret,
            access_token_ttl: Duration::from_secs(access_token_ttl),
            refresh_token_ttl: Duration::from_secs(refresh_token_ttl),
            password_hash_cost,
            reminder_job: ReminderJobConfig::new(
                Duration::from_secs(interval),
                Duration::from_secs(lookahead),
                align_to_minute,
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
