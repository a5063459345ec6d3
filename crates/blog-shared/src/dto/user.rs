use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::rules::{PatchField, into_result, not_blank};
use crate::Nullable;

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        length(min = 2, max = 30, message = "must be between 2 and 30 characters"),
        custom(function = "not_blank")
    )]
    pub first_name: String,

    #[validate(
        length(min = 2, max = 30, message = "must be between 2 and 30 characters"),
        custom(function = "not_blank")
    )]
    pub last_name: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    pub birthday: Option<NaiveDate>,

    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: Option<String>,
}

/// Partial update of a user.
///
/// Omitted fields are kept. `birthday: null` clears the birthday; `null` on
/// any other field is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub first_name: Nullable<String>,

    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub last_name: Nullable<String>,

    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub email: Nullable<String>,

    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub birthday: Nullable<NaiveDate>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        PatchField::new(&mut errors, "first_name")
            .required(&self.first_name)
            .length(&self.first_name, 2, 30);
        PatchField::new(&mut errors, "last_name")
            .required(&self.last_name)
            .length(&self.last_name, 2, 30);
        PatchField::new(&mut errors, "email")
            .required(&self.email)
            .email(&self.email);

        into_result(errors)
    }
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
