mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryRevokedTokenRepo;
pub use postgres::PostgresRevokedTokenRepo;

/// Blocklist of json web tokens that were revoked before their expiry,
/// identified by their `jti` claim.
#[async_trait::async_trait]
pub trait IRevokedTokenRepo: Send + Sync {
    async fn revoke(&self, jti: &str, expires: DateTime<Utc>) -> anyhow::Result<()>;
    async fn is_revoked(&self, jti: &str) -> anyhow::Result<bool>;
}
