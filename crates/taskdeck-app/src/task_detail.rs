//! Task detail view-model: one task plus its subtasks.
//!
//! Subtasks are read from the embedded list on the task payload; there is no
//! separate listing fetch. Local mutations are applied only after the server
//! call succeeded.

use crate::forms::{FormErrors, SubTaskFormState, validate_sub_task_form};
use taskdeck_api::{SubTask, Task, TaskStatus};
use taskdeck_client::TaskClient;
use tracing::error;

const LOAD_FAILED: &str = "Failed to load task";
const SUBTASK_FAILED: &str = "Failed to save subtask";

/// Display state for one task and its subtasks.
#[derive(Clone)]
pub struct TaskDetail {
    pub task_id: i64,
    pub task: Option<Task>,
    pub sub_tasks: Vec<SubTask>,
    pub form: SubTaskFormState,
    pub errors: FormErrors,
    pub error: Option<String>,
    pub loading: bool,
}

impl TaskDetail {
    pub fn new(task_id: i64) -> Self {
        Self {
            task_id,
            task: None,
            sub_tasks: Vec::new(),
            form: SubTaskFormState::default(),
            errors: FormErrors::default(),
            error: None,
            loading: false,
        }
    }

    /// Fetch the task once; the subtask list comes embedded in the payload.
    pub async fn load(&mut self, client: &TaskClient) {
        self.loading = true;
        match client.get_task(self.task_id).await {
            Ok(envelope) if envelope.success => {
                if let Some(task) = envelope.data {
                    self.sub_tasks = task.subtasks.clone().unwrap_or_default();
                    self.task = Some(task);
                }
            }
            Ok(_) | Err(_) => {
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Validate the subtask form and create the subtask under this task.
    /// On success the server's copy is appended and the form resets to its
    /// defaults. Returns whether a subtask was added.
    pub async fn add_sub_task(&mut self, client: &TaskClient) -> bool {
        self.errors = validate_sub_task_form(&self.form);
        if !self.errors.is_empty() {
            return false;
        }

        match client
            .create_sub_task(self.task_id, &self.form.to_sub_task())
            .await
        {
            Ok(envelope) if envelope.success => {
                if let Some(created) = envelope.data {
                    self.sub_tasks.push(created);
                    self.form = SubTaskFormState::default();
                    return true;
                }
                false
            }
            outcome => {
                if let Err(e) = outcome {
                    error!(task_id = self.task_id, "subtask creation failed: {e}");
                }
                self.error = Some(SUBTASK_FAILED.to_string());
                false
            }
        }
    }

    /// Update one subtask's status; the local entry is replaced with the
    /// server's copy once the call succeeds.
    pub async fn set_sub_task_status(
        &mut self,
        client: &TaskClient,
        id: i64,
        status: TaskStatus,
    ) {
        let Some(sub_task) = self.sub_tasks.iter().find(|st| st.id == Some(id)) else {
            return;
        };

        let mut updated = sub_task.clone();
        updated.status = status;

        match client.update_sub_task(id, &updated).await {
            Ok(envelope) if envelope.success => {
                if let Some(saved) = envelope.data {
                    if let Some(slot) = self.sub_tasks.iter_mut().find(|st| st.id == Some(id)) {
                        *slot = saved;
                    }
                }
            }
            outcome => {
                if let Err(e) = outcome {
                    error!(id, "subtask update failed: {e}");
                }
                self.error = Some(SUBTASK_FAILED.to_string());
            }
        }
    }

    /// Delete one subtask and drop it from the local list. Confirmation is
    /// the caller's job.
    pub async fn delete_sub_task(&mut self, client: &TaskClient, id: i64) {
        match client.delete_sub_task(id).await {
            Ok(_) => self.sub_tasks.retain(|st| st.id != Some(id)),
            Err(e) => {
                error!(id, "subtask deletion failed: {e}");
                self.error = Some(SUBTASK_FAILED.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormError;
    use taskdeck_client::{ClientConfig, Session};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, TaskClient) {
        let mock_server = MockServer::start().await;
        let config = ClientConfig::new(mock_server.uri());
        let client = TaskClient::new(&config, Session::in_memory()).unwrap();
        (mock_server, client)
    }

    fn sub_task_json(id: i64, title: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "priority": "LOW",
            "status": status,
        })
    }

    async fn mount_task(mock_server: &MockServer, subtasks: Vec<serde_json::Value>) {
        Mock::given(method("GET"))
            .and(path("/api/tasks/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "statusCode": 200,
                "message": "Task retrieved successfully",
                "data": {
                    "id": 7,
                    "title": "Ship release",
                    "priority": "HIGH",
                    "deadline": "2025-06-30",
                    "status": "IN_PROGRESS",
                    "subtasks": subtasks,
                },
            })))
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn load_reads_subtasks_from_the_embedded_list() {
        let (mock_server, client) = setup().await;
        mount_task(
            &mock_server,
            vec![
                sub_task_json(12, "Write changelog", "PENDING"),
                sub_task_json(13, "Tag release", "PENDING"),
            ],
        )
        .await;

        let mut detail = TaskDetail::new(7);
        detail.load(&client).await;

        assert_eq!(detail.task.as_ref().unwrap().title, "Ship release");
        assert_eq!(detail.sub_tasks.len(), 2);
        // One fetch covers both the task and its subtasks.
        assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_subtask_form_sends_nothing() {
        let (mock_server, client) = setup().await;

        let mut detail = TaskDetail::new(7);
        assert!(!detail.add_sub_task(&client).await);
        assert!(detail.errors.contains(FormError::TitleRequired));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn added_subtask_is_the_server_copy_and_the_form_resets() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/tasks/7/subtasks"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "success": true,
                "statusCode": 201,
                "message": "SubTask created successfully",
                "data": sub_task_json(14, "Write changelog", "PENDING"),
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut detail = TaskDetail::new(7);
        detail.form.title = "Write changelog".to_string();

        assert!(detail.add_sub_task(&client).await);
        assert_eq!(detail.sub_tasks.len(), 1);
        assert_eq!(detail.sub_tasks[0].id, Some(14));
        assert_eq!(detail.form, SubTaskFormState::default());
    }

    #[tokio::test]
    async fn status_update_replaces_the_local_entry() {
        let (mock_server, client) = setup().await;
        mount_task(&mock_server, vec![sub_task_json(12, "Write changelog", "PENDING")]).await;

        Mock::given(method("PUT"))
            .and(path("/api/subtasks/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "statusCode": 200,
                "message": "SubTask updated successfully",
                "data": sub_task_json(12, "Write changelog", "COMPLETED"),
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut detail = TaskDetail::new(7);
        detail.load(&client).await;
        detail
            .set_sub_task_status(&client, 12, TaskStatus::Completed)
            .await;

        assert_eq!(detail.sub_tasks[0].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn deleted_subtask_leaves_the_local_list() {
        let (mock_server, client) = setup().await;
        mount_task(
            &mock_server,
            vec![
                sub_task_json(12, "Write changelog", "PENDING"),
                sub_task_json(13, "Tag release", "PENDING"),
            ],
        )
        .await;

        Mock::given(method("DELETE"))
            .and(path("/api/subtasks/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "statusCode": 200,
                "message": "SubTask deleted successfully",
                "data": null,
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut detail = TaskDetail::new(7);
        detail.load(&client).await;
        detail.delete_sub_task(&client, 12).await;

        assert_eq!(detail.sub_tasks.len(), 1);
        assert_eq!(detail.sub_tasks[0].id, Some(13));
    }

    #[tokio::test]
    async fn unknown_subtask_status_update_is_a_no_op() {
        let (mock_server, client) = setup().await;

        let mut detail = TaskDetail::new(7);
        detail
            .set_sub_task_status(&client, 99, TaskStatus::Completed)
            .await;

        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }
}
