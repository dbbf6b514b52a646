use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{ListQuery, StoreError, TaskStore};
use crate::model::{CorrelationId, Field, NewTask, Task, TaskId, TaskPatch};

/// In-process stand-in for the REST resource, paginating the way json-server does.
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicU64,
    reject_writes: AtomicBool,
    list_calls: Mutex<Vec<ListQuery>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            reject_writes: AtomicBool::new(false),
            list_calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes every create/update/delete answer with a 500.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "rejected".to_string(),
            });
        }
        Ok(())
    }

    fn not_found() -> StoreError {
        StoreError::Rejected {
            status: StatusCode::NOT_FOUND,
            body: "{}".to_string(),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_tasks(
        &self,
        _cid: &CorrelationId,
        query: &ListQuery,
    ) -> Result<Vec<Task>, StoreError> {
        self.list_calls.lock().unwrap().push(*query);
        let tasks = self.tasks.lock().unwrap();
        let skip = (query.page.max(1) - 1) as usize * query.limit as usize;
        Ok(tasks
            .iter()
            .filter(|task| match query.status {
                Some(status) => task.status.text() == status.as_str(),
                None => true,
            })
            .skip(skip)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn create_task(&self, _cid: &CorrelationId, draft: &NewTask) -> Result<(), StoreError> {
        self.check_writable()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.tasks.lock().unwrap().push(Task {
            id: TaskId::from(id),
            title: Field::from(draft.title.clone()),
            description: Field::from(draft.description.clone()),
            status: Field::from(draft.status.clone()),
            due_date: Field::from(draft.due_date.clone()),
        });
        Ok(())
    }

    async fn update_task(
        &self,
        _cid: &CorrelationId,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == *id)
            .ok_or_else(Self::not_found)?;
        task.title = Field::from(patch.title.clone());
        task.description = Field::from(patch.description.clone());
        task.status = Field::from(patch.status.clone());
        task.due_date = Field::from(patch.due_date.clone());
        Ok(())
    }

    async fn delete_task(&self, _cid: &CorrelationId, id: &TaskId) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|task| task.id != *id);
        if tasks.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    fn draft(title: &str, status: Status) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            status: status.to_string(),
            due_date: "2024-03-01T10:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_pages_and_status() {
        // GIVEN
        let store = MemoryTaskStore::new();
        let cid = CorrelationId::new();
        for i in 0..7 {
            let status = if i % 2 == 0 { Status::Open } else { Status::Closed };
            store
                .create_task(&cid, &draft(&format!("t{}", i), status))
                .await
                .unwrap();
        }

        // WHEN
        let page2 = store
            .list_tasks(
                &cid,
                &ListQuery {
                    page: 2,
                    limit: 5,
                    status: None,
                },
            )
            .await
            .unwrap();
        let open = store
            .list_tasks(
                &cid,
                &ListQuery {
                    page: 1,
                    limit: 5,
                    status: Some(Status::Open),
                },
            )
            .await
            .unwrap();

        // THEN
        assert_eq!(page2.len(), 2);
        assert_eq!(page2[0].title, Field::from("t5"));
        assert_eq!(open.len(), 4);
        assert_eq!(store.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_writes_leave_store_untouched() {
        let store = MemoryTaskStore::new();
        store.reject_writes(true);

        let res = store
            .create_task(&CorrelationId::new(), &draft("a", Status::Open))
            .await;

        assert!(matches!(res, Err(StoreError::Rejected { .. })));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let store = MemoryTaskStore::new();
        let res = store
            .delete_task(&CorrelationId::new(), &TaskId::from("missing"))
            .await;
        assert!(matches!(res, Err(StoreError::Rejected { .. })));
    }
}
