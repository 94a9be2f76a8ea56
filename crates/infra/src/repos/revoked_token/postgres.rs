use super::IRevokedTokenRepo;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresRevokedTokenRepo {
    pool: PgPool,
}

impl PostgresRevokedTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IRevokedTokenRepo for PostgresRevokedTokenRepo {
    async fn revoke(&self, jti: &str, expires: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens(jti, expires_at)
            VALUES($1, $2)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(expires.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> anyhow::Result<bool> {
        let revoked: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT t.jti FROM revoked_tokens AS t
            WHERE t.jti = $1
            "#,
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await?;

        Ok(revoked.is_some())
    }
}
