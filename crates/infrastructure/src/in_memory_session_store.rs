use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use warden_application::SessionStore;
use warden_core::AppResult;

/// Process-local session store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warden_application::{IDENTITY_KEY, ORGANIZATION_ID_KEY, SessionService, SessionStore};
    use warden_core::{AccessToken, AdminIdentity, AppResult, RecordId};

    use super::InMemorySessionStore;

    fn identity() -> AdminIdentity {
        AdminIdentity::new(RecordId::new(3), "Asha", "SUPER_ADMIN", Some(RecordId::new(9)))
    }

    #[tokio::test]
    async fn established_session_is_restored_and_torn_down() -> AppResult<()> {
        let store = Arc::new(InMemorySessionStore::new());
        let sessions = SessionService::new(store.clone());

        sessions
            .establish(identity(), AccessToken::new("token-1"))
            .await?;
        assert_eq!(store.get(ORGANIZATION_ID_KEY).await?.as_deref(), Some("9"));
        assert!(store.get(IDENTITY_KEY).await?.is_some());

        let restored = sessions.restore().await?;
        assert!(restored.is_some_and(|session| {
            session.access_token().expose() == "token-1"
                && session.identity().user_id() == RecordId::new(3)
        }));

        sessions.teardown().await?;
        assert!(store.is_empty().await);
        assert_eq!(sessions.restore().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn removing_an_absent_key_is_not_an_error() -> AppResult<()> {
        let store = InMemorySessionStore::new();

        store.remove("access_token").await?;
        store.set("user_id", "3").await?;

        assert_eq!(store.len().await, 1);
        Ok(())
    }
}
