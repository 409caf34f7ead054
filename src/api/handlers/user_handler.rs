//! Account handlers: registration, login and the logged-in user's profile.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{end_session, start_session, CurrentUser};
use crate::api::AppState;
use crate::domain::{Gender, ProfileUpdate, UserProfile, UserResponse};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, NoContent};
use crate::utils::validation::PHONE_RE;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 20, message = "Username must be 1 to 20 characters"))]
    #[schema(example = "tom")]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "tom")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret123")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// Profile fields; omitted fields are cleared
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    #[schema(example = "13800000000")]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "tom@example.com")]
    pub email: Option<String>,
    pub gender: Option<Gender>,
}

/// Create account routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/reg", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_profile).put(update_profile))
        .route("/password", put(change_password))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/reg",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .user_service
        .register(payload.username, payload.password)
        .await?;

    Ok(Created(user))
}

/// Log in and start a session
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = UserResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .login(payload.username, payload.password)
        .await?;

    start_session(&session, &CurrentUser::from(user.clone())).await?;
    Ok(Json(user))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/users/logout",
    tag = "Users",
    responses((status = 204, description = "Logged out")),
    security(("session_cookie" = []))
)]
pub async fn logout(session: Session) -> AppResult<NoContent> {
    end_session(&session).await?;
    Ok(NoContent)
}

/// Profile of the logged-in user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 401, description = "Not logged in")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<UserProfile>> {
    let profile = state.user_service.profile(user.uid).await?;
    Ok(Json(profile))
}

/// Change phone, email and gender
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 204, description = "Profile updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not logged in")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<NoContent> {
    let info = ProfileUpdate {
        phone: payload.phone,
        email: payload.email,
        gender: payload.gender,
    };
    state
        .user_service
        .change_info(user.uid, user.username, info)
        .await?;

    Ok(NoContent)
}

/// Change password after checking the old one
#[utoipa::path(
    put,
    path = "/users/password",
    tag = "Users",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Old password does not match")
    ),
    security(("session_cookie" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .user_service
        .change_password(
            user.uid,
            user.username,
            payload.old_password,
            payload.new_password,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password changed")))
}
