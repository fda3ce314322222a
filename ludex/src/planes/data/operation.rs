use crate::domain::{AppId, DetailMap};
use async_trait::async_trait;

/// Application-level batch detail lookup
/// Per-item failures are absorbed, so there is no error path.
#[async_trait]
pub trait DetailOperations: Send + Sync + 'static {
    async fn fetch_details(&self, ids: &[AppId]) -> DetailMap;
}
