use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::rules::{PatchField, into_result, not_blank};
use crate::Nullable;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    #[validate(
        length(min = 2, max = 50, message = "must be between 2 and 50 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
}

/// Partial update of a tag; an omitted name keeps the current one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagRequest {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
}

impl Validate for UpdateTagRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        PatchField::new(&mut errors, "name")
            .required(&self.name)
            .length(&self.name, 2, 50);

        into_result(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}
