use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - represents an author in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing)]
    pub password_digest: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(input: NewUser, password_digest: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            birthday: input.birthday,
            password_digest,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. Fields left as `None` stay untouched.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(birthday) = changes.birthday {
            self.birthday = birthday;
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    /// Plain-text password, hashed before it reaches storage.
    pub password: Option<String>,
}

/// Partial update of a user.
///
/// `birthday` is doubly optional: `Some(None)` clears the stored date.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<Option<NaiveDate>>,
}
