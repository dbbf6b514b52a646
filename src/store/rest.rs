use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method, RequestBuilder, Response};
use tracing::{debug, info};
use url::Url;

use super::{ListQuery, StoreError, TaskStore};
use crate::config::StoreConfig;
use crate::model::{CorrelationId, NewTask, Task, TaskId, TaskPatch};

/// Task store behind a json-server style REST resource.
pub struct HttpTaskStore {
    client: reqwest::Client,
    base: Url,
}

impl HttpTaskStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout_millis {
            builder = builder.timeout(Duration::from_millis(timeout));
        }
        Ok(Self {
            client: builder.build()?,
            base: config.url.clone(),
        })
    }

    fn item_url(&self, id: &TaskId) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::BaseUrl(self.base.clone()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    async fn execute(
        &self,
        cid: &CorrelationId,
        method: Method,
        url: Url,
        body: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, StoreError> {
        let mut headers = HeaderMap::new();
        cid.insert_into_header_map(&mut headers)?;

        let started = Instant::now();
        let request = body(self.client.request(method.clone(), url.clone())).headers(headers);
        let response = request.send().await?;
        let status = response.status();
        info!(
            cid = %cid,
            method = %method,
            url = %url,
            status = status.as_u16(),
            latency = %humantime::format_duration(started.elapsed()),
            "store call",
        );

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::Rejected { status, body })
        }
    }
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    async fn list_tasks(
        &self,
        cid: &CorrelationId,
        query: &ListQuery,
    ) -> Result<Vec<Task>, StoreError> {
        let mut params = vec![
            ("_page", query.page.to_string()),
            ("_limit", query.limit.to_string()),
        ];
        if let Some(status) = query.status {
            params.push(("status", status.to_string()));
        }

        let response = self
            .execute(cid, Method::GET, self.base.clone(), |req| req.query(&params))
            .await?;
        let bytes = response.bytes().await?;
        let tasks: Vec<Task> = serde_json::from_slice(&bytes)?;
        debug!(cid = %cid, tasks_number = tasks.len(), "tasks decoded");
        Ok(tasks)
    }

    async fn create_task(&self, cid: &CorrelationId, draft: &NewTask) -> Result<(), StoreError> {
        self.execute(cid, Method::POST, self.base.clone(), |req| req.json(draft))
            .await
            .map(|_| ())
    }

    async fn update_task(
        &self,
        cid: &CorrelationId,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<(), StoreError> {
        let url = self.item_url(id)?;
        self.execute(cid, Method::PATCH, url, |req| req.json(patch))
            .await
            .map(|_| ())
    }

    async fn delete_task(&self, cid: &CorrelationId, id: &TaskId) -> Result<(), StoreError> {
        let url = self.item_url(id)?;
        self.execute(cid, Method::DELETE, url, |req| req)
            .await
            .map(|_| ())
    }
}
