//! Wire types shared by the taskdeck HTTP clients and views.
//!
//! Everything here mirrors the backend's JSON contract: the `ApiResponse`
//! envelope around every response, Spring-style `Page` metadata, and the
//! task/subtask payloads with their priority and status enums.

mod auth;
mod envelope;
mod page;
mod task;

pub use auth::{AuthRequest, AuthResponse, RegistrationRequest};
pub use envelope::{ApiFailure, ApiResponse};
pub use page::Page;
pub use task::{Priority, SubTask, Task, TaskStatus};
