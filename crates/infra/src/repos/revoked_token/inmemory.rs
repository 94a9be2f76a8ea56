use super::IRevokedTokenRepo;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct InMemoryRevokedTokenRepo {
    tokens: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevokedTokenRepo {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IRevokedTokenRepo for InMemoryRevokedTokenRepo {
    async fn revoke(&self, jti: &str, expires: DateTime<Utc>) -> anyhow::Result<()> {
        let mut tokens = self.tokens.lock().unwrap();
        // Expired tokens are rejected anyway, no need to remember them
        let now = Utc::now();
        tokens.retain(|_, expires| *expires > now);
        tokens.insert(jti.to_string(), expires);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> anyhow::Result<bool> {
        Ok(self.tokens.lock().unwrap().contains_key(jti))
    }
}
