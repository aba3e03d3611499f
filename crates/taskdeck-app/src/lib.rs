//! View layer for the taskdeck client.
//!
//! Each screen is a plain view-model struct owning its display state
//! exclusively: the dashboard (paginated, filterable task list), the task
//! form (create/edit) and the task detail (one task plus its subtasks).
//! Form validation is a pure function over typed form state, and routing is
//! an enum with a session guard. The terminal binary in `main.rs` is a thin
//! prompt loop over these view-models.

pub mod dashboard;
pub mod forms;
pub mod routes;
pub mod task_detail;
pub mod task_form;

pub use dashboard::Dashboard;
pub use forms::{
    FormError, FormErrors, SubTaskFormState, TaskFormState, validate_sub_task_form,
    validate_task_form,
};
pub use routes::Route;
pub use task_detail::TaskDetail;
pub use task_form::{FormMode, TaskForm};
