use super::{MediaStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local media table for tests and `--memory` runs.
///
/// Mirrors the MySQL store's found-rows semantics: writing the value a row
/// already holds still reports one affected row.
#[derive(Debug, Default)]
pub struct InMemoryMediaStore {
    rows: RwLock<HashMap<i64, String>>,
    failure: Option<StoreError>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows as `(id, provider)` pairs.
    pub fn with_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            rows: RwLock::new(rows.into_iter().map(|(id, p)| (id, p.into())).collect()),
            failure: None,
        }
    }

    /// Every subsequent update fails with `err` and leaves rows untouched.
    pub fn failing_with(mut self, err: StoreError) -> Self {
        self.failure = Some(err);
        self
    }

    pub async fn provider(&self, id: i64) -> Option<String> {
        self.rows.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn update_provider(&self, id: i64, provider: &str) -> Result<u64, StoreError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            Some(slot) => {
                *slot = provider.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
