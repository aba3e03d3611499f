//! HTTP layer for the taskdeck backend.
//!
//! [`AuthClient`] handles login/registration and hands the returned token to
//! the [`Session`]; [`TaskClient`] covers the paginated task listing and the
//! task/subtask CRUD endpoints, attaching the session token as a bearer
//! header. Every response is decoded through the shared envelope handling in
//! this crate: a 2xx envelope is returned as-is (success flag included), a
//! non-2xx response is surfaced as an error.

mod auth;
mod config;
mod error;
mod http;
mod session;
mod tasks;


pub use auth::AuthClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{FileTokenStore, InMemoryTokenStore, Session, TokenStore};
pub use tasks::{SortDirection, TaskClient, TaskFilter};
