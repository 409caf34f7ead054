//! Login interceptor.
//!
//! Every request outside the public allow-list must carry a session that
//! holds a [`CurrentUser`]; the user is then copied into request extensions
//! for handlers to extract.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::config::{PUBLIC_PATHS, SESSION_KEY_CURRENT_USER};
use crate::domain::UserResponse;
use crate::errors::AppError;

/// Logged-in user, as stored in the session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub uid: i32,
    pub username: String,
}

impl From<UserResponse> for CurrentUser {
    fn from(user: UserResponse) -> Self {
        Self {
            uid: user.uid,
            username: user.username,
        }
    }
}

/// Path patterns that skip the login check.
///
/// A pattern ending in `/**` matches its prefix and everything below it;
/// any other pattern must match the path exactly.
#[derive(Clone, Debug)]
pub struct PathAllowList {
    patterns: Vec<String>,
}

impl PathAllowList {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| matches_pattern(pattern, path))
    }
}

impl Default for PathAllowList {
    fn default() -> Self {
        Self::new(PUBLIC_PATHS.iter().copied())
    }
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
        None => pattern == path,
    }
}

/// Store the logged-in user in a fresh session id.
pub async fn start_session(session: &Session, user: &CurrentUser) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(SESSION_KEY_CURRENT_USER, user).await?;
    Ok(())
}

/// Drop everything the session holds.
pub async fn end_session(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

/// Session authentication middleware.
///
/// Allow-listed paths pass straight through. Anything else needs a
/// [`CurrentUser`] in the session, which is injected into the request
/// extensions.
pub async fn auth_middleware(
    State(allow_list): State<PathAllowList>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if allow_list.allows(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let current_user: CurrentUser = session
        .get(SESSION_KEY_CURRENT_USER)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(uid = current_user.uid, path = %request.uri().path(), "Session accepted");
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
