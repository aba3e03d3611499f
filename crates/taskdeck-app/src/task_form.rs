//! Task form view-model, shared between create and edit mode.

use crate::forms::{FormErrors, TaskFormState, validate_task_form};
use crate::routes::Route;
use taskdeck_client::TaskClient;
use tracing::error;

const LOAD_FAILED: &str = "Failed to load task";
const CREATE_FAILED: &str = "Failed to create task";
const UPDATE_FAILED: &str = "Failed to update task";

/// Whether the form creates a new task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Display state for the task form.
#[derive(Clone)]
pub struct TaskForm {
    pub mode: FormMode,
    pub state: TaskFormState,
    pub errors: FormErrors,
    pub error: Option<String>,
    pub loading: bool,
}

impl TaskForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            state: TaskFormState::default(),
            errors: FormErrors::default(),
            error: None,
            loading: false,
        }
    }

    pub fn edit(id: i64) -> Self {
        Self {
            mode: FormMode::Edit(id),
            ..Self::create()
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Pre-populate the form in edit mode. A no-op in create mode.
    pub async fn load(&mut self, client: &TaskClient) {
        let FormMode::Edit(id) = self.mode else {
            return;
        };

        self.loading = true;
        match client.get_task(id).await {
            Ok(envelope) if envelope.success => {
                if let Some(task) = &envelope.data {
                    self.state = TaskFormState::from_task(task);
                }
            }
            Ok(_) | Err(_) => {
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Validate and submit. Invalid state records errors and sends nothing.
    /// A successful create or update navigates to the dashboard; a failure
    /// keeps the form populated and records a generic message.
    pub async fn submit(&mut self, client: &TaskClient) -> Option<Route> {
        self.errors = validate_task_form(&self.state);
        if !self.errors.is_empty() {
            return None;
        }

        self.loading = true;
        self.error = None;
        let task = self.state.to_task();

        let result = match self.mode {
            FormMode::Edit(id) => client.update_task(id, &task).await,
            FormMode::Create => client.create_task(&task).await,
        };

        match result {
            Ok(envelope) if envelope.success => {
                self.loading = false;
                Some(Route::Dashboard)
            }
            outcome => {
                if let Err(e) = outcome {
                    error!("task submit failed: {e}");
                }
                self.error = Some(
                    if self.is_edit() { UPDATE_FAILED } else { CREATE_FAILED }.to_string(),
                );
                self.loading = false;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taskdeck_api::{Priority, TaskStatus};
    use taskdeck_client::{ClientConfig, Session};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, TaskClient) {
        let mock_server = MockServer::start().await;
        let config = ClientConfig::new(mock_server.uri());
        let client = TaskClient::new(&config, Session::in_memory()).unwrap();
        (mock_server, client)
    }

    fn task_envelope(id: i64, title: &str) -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "statusCode": 200,
            "message": "ok",
            "data": {
                "id": id,
                "title": title,
                "priority": "HIGH",
                "deadline": "2025-06-30",
                "status": "IN_PROGRESS",
            },
        })
    }

    #[tokio::test]
    async fn invalid_submit_sends_no_request() {
        let (mock_server, client) = setup().await;

        let mut form = TaskForm::create();
        form.state.title = "ab".to_string();
        form.state.deadline = None;

        assert_eq!(form.submit(&client).await, None);
        assert!(!form.errors.is_empty());
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn valid_create_posts_then_navigates_to_dashboard() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(201).set_body_json(task_envelope(42, "New task")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut form = TaskForm::create();
        form.state.title = "New task".to_string();
        form.state.deadline = NaiveDate::from_ymd_opt(2025, 6, 30);

        assert_eq!(form.submit(&client).await, Some(Route::Dashboard));
        assert!(form.error.is_none());
    }

    #[tokio::test]
    async fn edit_mode_loads_then_puts_to_the_task_path() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/tasks/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(task_envelope(7, "Ship release")))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/api/tasks/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(task_envelope(7, "Ship release")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut form = TaskForm::edit(7);
        form.load(&client).await;

        assert_eq!(form.state.title, "Ship release");
        assert_eq!(form.state.priority, Priority::High);
        assert_eq!(form.state.status, TaskStatus::InProgress);
        assert_eq!(form.state.deadline, NaiveDate::from_ymd_opt(2025, 6, 30));

        // Resubmitting unchanged keeps the body identical to the fetch.
        assert_eq!(form.submit(&client).await, Some(Route::Dashboard));

        let requests = mock_server.received_requests().await.unwrap();
        let put = requests.iter().find(|r| r.method == "PUT").unwrap();
        let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
        assert_eq!(body["title"], "Ship release");
        assert_eq!(body["priority"], "HIGH");
        assert_eq!(body["status"], "IN_PROGRESS");
        assert_eq!(body["deadline"], "2025-06-30");
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_form_populated() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "success": false,
                "statusCode": 400,
                "message": "Validation failed",
                "errors": {"deadline": "Deadline cannot be in the past"},
            })))
            .mount(&mock_server)
            .await;

        let mut form = TaskForm::create();
        form.state.title = "Past task".to_string();
        form.state.deadline = NaiveDate::from_ymd_opt(2020, 1, 1);

        assert_eq!(form.submit(&client).await, None);
        assert_eq!(form.error.as_deref(), Some("Failed to create task"));
        assert_eq!(form.state.title, "Past task");
    }
}
