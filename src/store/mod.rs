//! Storage seam for the media table.
//!
//! The handler only ever needs one operation: point a media row's `provider`
//! column at a new URL and learn how many rows matched.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryMediaStore;
pub use mysql::MySqlMediaStore;

use async_trait::async_trait;

/// Failure stages of a storage round-trip, in the order they can occur.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Connect(String),
    #[error("{0}")]
    Charset(String),
    #[error("{0}")]
    Prepare(String),
    #[error("{0}")]
    Execute(String),
}

#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// Sets `provider` on the row with the given `id`.
    ///
    /// Returns the affected-row count. Rows whose value already equals
    /// `provider` still count as affected.
    async fn update_provider(&self, id: i64, provider: &str) -> Result<u64, StoreError>;
}
