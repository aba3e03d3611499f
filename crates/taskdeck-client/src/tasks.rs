//! Task and subtask CRUD against the `/api` endpoints.

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::{build_http_client, decode_envelope};
use crate::session::Session;
use chrono::NaiveDate;
use taskdeck_api::{ApiResponse, Page, Priority, SubTask, Task, TaskStatus};
use tracing::debug;
use url::Url;

/// Sort direction for the task listing. The backend defaults to ascending
/// when the parameter is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Optional filter/sort parameters for [`TaskClient::list_tasks`].
///
/// Unset fields are omitted from the query entirely; set fields are sent
/// verbatim in the backend's wire spelling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub sort_by: Option<String>,
    pub direction: Option<SortDirection>,
    pub deadline_before: Option<NaiveDate>,
}

/// Client for the task endpoints. Attaches the session token as a bearer
/// header when one is present.
#[derive(Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl TaskClient {
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        Ok(Self {
            http: build_http_client(config.http_timeout_seconds)?,
            base_url: config.origin().to_string(),
            session,
        })
    }

    async fn authorized(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ClientResult<reqwest::RequestBuilder> {
        Ok(match self.session.token().await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// List one page of tasks.
    pub async fn list_tasks(
        &self,
        page: u32,
        size: u32,
        filter: &TaskFilter,
    ) -> ClientResult<ApiResponse<Page<Task>>> {
        let mut url = Url::parse(&format!("{}/api/tasks", self.base_url))?;

        {
            let mut params = url.query_pairs_mut();
            params.append_pair("page", &page.to_string());
            params.append_pair("size", &size.to_string());

            if let Some(priority) = filter.priority {
                params.append_pair("priority", priority.as_str());
            }
            if let Some(status) = filter.status {
                params.append_pair("status", status.as_str());
            }
            if let Some(sort_by) = &filter.sort_by {
                params.append_pair("sortBy", sort_by);
            }
            if let Some(direction) = filter.direction {
                params.append_pair("direction", direction.as_str());
            }
            if let Some(deadline_before) = filter.deadline_before {
                params.append_pair("deadlineBefore", &deadline_before.to_string());
            }
        }

        debug!(%url, "listing tasks");
        let request = self.authorized(self.http.get(url)).await?;
        decode_envelope(request.send().await?).await
    }

    pub async fn get_task(&self, id: i64) -> ClientResult<ApiResponse<Task>> {
        let request = self
            .authorized(self.http.get(format!("{}/api/tasks/{id}", self.base_url)))
            .await?;
        decode_envelope(request.send().await?).await
    }

    pub async fn create_task(&self, task: &Task) -> ClientResult<ApiResponse<Task>> {
        let request = self
            .authorized(self.http.post(format!("{}/api/tasks", self.base_url)))
            .await?;
        decode_envelope(request.json(task).send().await?).await
    }

    pub async fn update_task(&self, id: i64, task: &Task) -> ClientResult<ApiResponse<Task>> {
        let request = self
            .authorized(self.http.put(format!("{}/api/tasks/{id}", self.base_url)))
            .await?;
        decode_envelope(request.json(task).send().await?).await
    }

    pub async fn delete_task(&self, id: i64) -> ClientResult<ApiResponse<()>> {
        let request = self
            .authorized(self.http.delete(format!("{}/api/tasks/{id}", self.base_url)))
            .await?;
        decode_envelope(request.send().await?).await
    }

    /// Create a subtask under its parent task's collection.
    pub async fn create_sub_task(
        &self,
        task_id: i64,
        sub_task: &SubTask,
    ) -> ClientResult<ApiResponse<SubTask>> {
        let request = self
            .authorized(
                self.http
                    .post(format!("{}/api/tasks/{task_id}/subtasks", self.base_url)),
            )
            .await?;
        decode_envelope(request.json(sub_task).send().await?).await
    }

    /// Subtasks are updated by their own id, independent of the parent.
    pub async fn update_sub_task(
        &self,
        id: i64,
        sub_task: &SubTask,
    ) -> ClientResult<ApiResponse<SubTask>> {
        let request = self
            .authorized(self.http.put(format!("{}/api/subtasks/{id}", self.base_url)))
            .await?;
        decode_envelope(request.json(sub_task).send().await?).await
    }

    pub async fn delete_sub_task(&self, id: i64) -> ClientResult<ApiResponse<()>> {
        let request = self
            .authorized(
                self.http
                    .delete(format!("{}/api/subtasks/{id}", self.base_url)),
            )
            .await?;
        decode_envelope(request.send().await?).await
    }
}
