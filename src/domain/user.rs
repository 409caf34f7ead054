//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Gender as stored in `t_user.gender` (0 = female, 1 = male)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Column value
    pub fn as_i32(self) -> i32 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }

    /// Decode a column value; unknown values are treated as unset.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Gender::Female),
            1 => Some(Gender::Male),
            _ => None,
        }
    }
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub uid: i32,
    pub username: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub created_user: String,
    pub created_time: DateTime<Utc>,
    pub modified_user: String,
    pub modified_time: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields written when registering a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Profile fields a user may change about themselves
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    #[schema(example = "13800000000")]
    pub phone: Option<String>,
    #[schema(example = "tom@example.com")]
    pub email: Option<String>,
    pub gender: Option<Gender>,
}

/// Identity returned by login and registration (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 7)]
    pub uid: i32,
    #[schema(example = "tom")]
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            username: user.username,
        }
    }
}

/// Profile view for the edit-profile page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub uid: i32,
    pub username: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            username: user.username,
            phone: user.phone,
            email: user.email,
            gender: user.gender,
        }
    }
}
