#[cfg(test)]
mod tests {

    use std::collections::HashSet;
    use std::sync::Arc;

    use chrono::{Duration, Local};
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};
    use url::Url;

    use crate::config::{StoreConfig, DEFAULT_STORE_URL};
    use crate::controller::{TaskController, UserAction};
    use crate::model::{CorrelationId, NewTask, Status};
    use crate::store::{HttpTaskStore, ListQuery, TaskStore};
    use crate::view::ViewState;

    fn store() -> HttpTaskStore {
        HttpTaskStore::new(&StoreConfig {
            url: Url::parse(DEFAULT_STORE_URL).unwrap(),
            timeout_millis: Some(3000),
        })
        .unwrap()
    }

    fn random_title() -> String {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(30)
            .map(char::from)
            .collect()
    }

    #[tokio::test]
    async fn test_e2e_task_lifecycle() {
        let store = Arc::new(store());
        let titles: Vec<String> = (0..3).map(|_| random_title()).collect();

        // create concurrently
        let handles: Vec<_> = titles
            .iter()
            .cloned()
            .map(|title| {
                let store = store.clone();
                tokio::spawn(async move {
                    let draft = NewTask::new(
                        title,
                        "e2e",
                        Status::Open,
                        Local::now() + Duration::seconds(60),
                    );
                    store.create_task(&CorrelationId::new(), &draft).await
                })
            })
            .collect();
        for res in futures::future::join_all(handles).await {
            res.unwrap().unwrap();
        }

        // walk the five pages looking for them
        let wanted: HashSet<String> = titles.iter().cloned().collect();
        let mut found = vec![];
        for page in 1..=5 {
            let tasks = store
                .list_tasks(
                    &CorrelationId::new(),
                    &ListQuery {
                        page,
                        limit: 100,
                        status: Some(Status::Open),
                    },
                )
                .await
                .unwrap();
            found.extend(
                tasks
                    .into_iter()
                    .filter(|t| wanted.contains(&t.title.text())),
            );
        }
        assert_eq!(found.len(), titles.len());

        // delete them through the controller, each flow refreshing the page
        let controller = TaskController::new(store.clone());
        for task in found {
            assert!(controller
                .run(UserAction::Delete(task.id), ViewState::default())
                .await
                .is_some());
        }
    }
}
