//! API middleware.

mod auth;
mod session;

pub use auth::{auth_middleware, end_session, start_session, CurrentUser, PathAllowList};
pub use session::session_layer;
