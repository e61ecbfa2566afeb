//! Store implementations behind the [`UserStore`] trait.

use async_trait::async_trait;
use peermatch_core::{Error, Result, UserRecord};
use serde_json::Value;
use tracing::debug;

use crate::projection::project_user;

/// Read-only access to the user population.
///
/// A connectivity failure is an error; an empty population is a valid,
/// distinct outcome.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn fetch_all_users(&self) -> Result<Vec<UserRecord>>;
}

/// Fetches user documents from a document-store HTTP endpoint.
///
/// Expects `GET {base}/users` to return a JSON array of raw user
/// documents, which are projected into [`UserRecord`]s.
pub struct HttpUserStore {
    client: reqwest::Client,
    users_url: String,
}

impl HttpUserStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            client: reqwest::Client::new(),
            users_url: format!("{}/users", base.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl UserStore for HttpUserStore {
    async fn fetch_all_users(&self) -> Result<Vec<UserRecord>> {
        let response = self
            .client
            .get(&self.users_url)
            .send()
            .await
            .map_err(|e| Error::Store(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Store(e.to_string()))?;

        let documents: Vec<Value> = response
            .json()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;

        let users: Vec<UserRecord> = documents.iter().filter_map(project_user).collect();
        debug!(
            fetched = documents.len(),
            projected = users.len(),
            "population fetched"
        );
        Ok(users)
    }
}

/// In-memory store for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Vec<UserRecord>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn fetch_all_users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peermatch_core::UserProfile;

    #[tokio::test]
    async fn test_memory_store_returns_fixture() {
        let record = UserRecord::new("u1", UserProfile::default());
        let store = MemoryUserStore::new(vec![record.clone()]);

        let users = store.fetch_all_users().await.unwrap();
        assert_eq!(users, vec![record]);
    }

    #[tokio::test]
    async fn test_empty_store_is_ok_not_error() {
        let store = MemoryUserStore::default();
        assert_eq!(store.fetch_all_users().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_store_error() {
        // Port 9 (discard) on localhost is not listening.
        let store = HttpUserStore::new("http://127.0.0.1:9");
        let err = store.fetch_all_users().await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }
}
