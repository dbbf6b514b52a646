mod error;
mod rest;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::model::{CorrelationId, NewTask, Status, Task, TaskId, TaskPatch};
pub use error::StoreError;
pub use rest::HttpTaskStore;

/// One page of the remote collection, optionally narrowed to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<Status>,
}

// Remote task collection
#[async_trait]
pub trait TaskStore: Sync + Send + 'static {
    async fn list_tasks(
        &self,
        cid: &CorrelationId,
        query: &ListQuery,
    ) -> Result<Vec<Task>, StoreError>;
    async fn create_task(&self, cid: &CorrelationId, draft: &NewTask) -> Result<(), StoreError>;
    async fn update_task(
        &self,
        cid: &CorrelationId,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<(), StoreError>;
    async fn delete_task(&self, cid: &CorrelationId, id: &TaskId) -> Result<(), StoreError>;
}
