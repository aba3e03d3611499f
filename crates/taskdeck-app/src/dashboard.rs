//! Dashboard view-model: paginated, filterable task list.

use taskdeck_api::{Priority, Task, TaskStatus};
use taskdeck_client::{TaskClient, TaskFilter};
use tracing::{error, warn};

const LOAD_FAILED: &str = "Failed to load tasks";
const DELETE_FAILED: &str = "Failed to delete task";

/// Display state for the task list.
///
/// On a failed refresh the previous list stays visible next to the error
/// message; nothing is cleared.
#[derive(Clone)]
pub struct Dashboard {
    pub tasks: Vec<Task>,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub filter: TaskFilter,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            page: 0,
            size: 10,
            total_pages: 0,
            filter: TaskFilter {
                sort_by: Some("deadline".to_string()),
                ..TaskFilter::default()
            },
            error: None,
            loading: false,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the current page with the current filter.
    pub async fn refresh(&mut self, client: &TaskClient) {
        self.loading = true;
        self.error = None;

        match client.list_tasks(self.page, self.size, &self.filter).await {
            Ok(envelope) if envelope.success => {
                if let Some(page) = envelope.data {
                    self.tasks = page.content;
                    self.total_pages = page.total_pages;
                }
            }
            Ok(envelope) => {
                warn!(status = envelope.status, "task listing rejected: {}", envelope.message);
                self.error = Some(LOAD_FAILED.to_string());
            }
            Err(e) => {
                error!("task listing failed: {e}");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    /// Change the filter and reload from the first page.
    pub async fn apply_filter(
        &mut self,
        client: &TaskClient,
        priority: Option<Priority>,
        status: Option<TaskStatus>,
        sort_by: Option<String>,
    ) {
        self.filter.priority = priority;
        self.filter.status = status;
        self.filter.sort_by = sort_by;
        self.page = 0;
        self.refresh(client).await;
    }

    /// Navigate to another page. Out-of-range targets are a no-op; returns
    /// whether the navigation happened.
    pub async fn change_page(&mut self, client: &TaskClient, new_page: u32) -> bool {
        if new_page >= self.total_pages {
            return false;
        }
        self.page = new_page;
        self.refresh(client).await;
        true
    }

    /// Delete a task and reload the current page. Confirmation is the
    /// caller's job. The page number is kept even if the deletion emptied
    /// the last page; the server then answers an empty page.
    pub async fn delete_task(&mut self, client: &TaskClient, id: i64) {
        match client.delete_task(id).await {
            Ok(_) => self.refresh(client).await,
            Err(e) => {
                error!(id, "task deletion failed: {e}");
                self.error = Some(DELETE_FAILED.to_string());
            }
        }
    }
}
