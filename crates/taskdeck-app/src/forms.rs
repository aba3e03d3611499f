//! Typed form state with pure validation.
//!
//! Validation runs before submit and never touches the network; the same
//! constraints the backend enforces (title at least 3 characters, deadline
//! required for tasks) are checked here first.

use chrono::NaiveDate;
use taskdeck_api::{Priority, SubTask, Task, TaskStatus};

/// Minimum title length, matching the backend's constraint.
pub const TITLE_MIN_LEN: usize = 3;

/// One validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    TitleRequired,
    TitleTooShort,
    DeadlineRequired,
}

impl FormError {
    pub fn message(&self) -> &'static str {
        match self {
            FormError::TitleRequired => "Title is required",
            FormError::TitleTooShort => "Title must be at least 3 characters",
            FormError::DeadlineRequired => "Deadline is required",
        }
    }
}

/// The set of validation failures for one submit attempt. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(Vec<FormError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: FormError) -> bool {
        self.0.contains(&error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormError> {
        self.0.iter()
    }

    fn push(&mut self, error: FormError) {
        self.0.push(error);
    }
}

/// Form state for creating or editing a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFormState {
    pub title: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub deadline: Option<NaiveDate>,
}

impl Default for TaskFormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            deadline: None,
        }
    }
}

impl TaskFormState {
    /// Pre-populate the form from a fetched task (edit mode).
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            priority: task.priority,
            status: task.status,
            deadline: task.deadline,
        }
    }

    /// Build the request body. Identity and server-owned fields are left
    /// absent; the id travels in the URL on update.
    pub fn to_task(&self) -> Task {
        Task {
            id: None,
            title: self.title.clone(),
            priority: self.priority,
            deadline: self.deadline,
            status: self.status,
            subtasks: None,
            attachment_url: None,
            version: None,
        }
    }
}

/// Form state for adding a subtask. Deadline is optional here.
#[derive(Debug, Clone, PartialEq)]
pub struct SubTaskFormState {
    pub title: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub deadline: Option<NaiveDate>,
}

impl Default for SubTaskFormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            deadline: None,
        }
    }
}

impl SubTaskFormState {
    pub fn to_sub_task(&self) -> SubTask {
        SubTask {
            id: None,
            title: self.title.clone(),
            priority: self.priority,
            deadline: self.deadline,
            status: self.status,
            version: None,
        }
    }
}

/// Validate a task form. Priority and status are always present in the
/// typed state, so only title and deadline can fail.
pub fn validate_task_form(state: &TaskFormState) -> FormErrors {
    let mut errors = FormErrors::default();
    let title = state.title.trim();

    if title.is_empty() {
        errors.push(FormError::TitleRequired);
    } else if title.chars().count() < TITLE_MIN_LEN {
        errors.push(FormError::TitleTooShort);
    }
    if state.deadline.is_none() {
        errors.push(FormError::DeadlineRequired);
    }

    errors
}

/// Validate a subtask form: only a title is required.
pub fn validate_sub_task_form(state: &SubTaskFormState) -> FormErrors {
    let mut errors = FormErrors::default();
    if state.title.trim().is_empty() {
        errors.push(FormError::TitleRequired);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_state() -> TaskFormState {
        TaskFormState {
            title: "Ship release".to_string(),
            priority: Priority::High,
            status: TaskStatus::InProgress,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30),
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate_task_form(&valid_state()).is_empty());
    }

    #[test]
    fn short_title_is_rejected() {
        let mut state = valid_state();
        state.title = "ab".to_string();
        let errors = validate_task_form(&state);
        assert!(errors.contains(FormError::TitleTooShort));
        assert!(!errors.contains(FormError::TitleRequired));
    }

    #[test]
    fn blank_title_is_required_not_too_short() {
        let mut state = valid_state();
        state.title = "   ".to_string();
        let errors = validate_task_form(&state);
        assert!(errors.contains(FormError::TitleRequired));
        assert!(!errors.contains(FormError::TitleTooShort));
    }

    #[test]
    fn missing_deadline_is_rejected_for_tasks_only() {
        let mut state = valid_state();
        state.deadline = None;
        assert!(validate_task_form(&state).contains(FormError::DeadlineRequired));

        let sub = SubTaskFormState {
            title: "Write changelog".to_string(),
            ..Default::default()
        };
        assert!(validate_sub_task_form(&sub).is_empty());
    }

    #[test]
    fn defaults_match_the_form_presets() {
        let state = TaskFormState::default();
        assert_eq!(state.priority, Priority::Medium);
        assert_eq!(state.status, TaskStatus::Pending);
    }

    #[test]
    fn fetched_task_round_trips_through_the_form() {
        let task = Task {
            id: Some(7),
            title: "Ship release".to_string(),
            priority: Priority::High,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30),
            status: TaskStatus::InProgress,
            subtasks: Some(vec![]),
            attachment_url: None,
            version: Some(3),
        };

        let resubmitted = TaskFormState::from_task(&task).to_task();
        assert_eq!(resubmitted.title, task.title);
        assert_eq!(resubmitted.priority, task.priority);
        assert_eq!(resubmitted.status, task.status);
        assert_eq!(resubmitted.deadline, task.deadline);
    }
}
