//! Field rules shared by derived and hand-written validators.

use std::borrow::Cow;

use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::Nullable;

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank"));
    }
    Ok(())
}

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Validation of a patch field that may be absent, null or a string.
pub(crate) struct PatchField<'a> {
    errors: &'a mut ValidationErrors,
    field: &'static str,
}

impl<'a> PatchField<'a> {
    pub(crate) fn new(errors: &'a mut ValidationErrors, field: &'static str) -> Self {
        Self { errors, field }
    }

    /// Rejects an explicit `null` on a column that cannot be empty.
    pub(crate) fn required<T>(self, value: &Nullable<T>) -> Self {
        if value.is_null() {
            self.errors.add(self.field, error("null", "must not be null"));
        }
        self
    }

    pub(crate) fn length(self, value: &Nullable<String>, min: usize, max: usize) -> Self {
        if let Some(text) = value.value() {
            let len = text.chars().count();
            if len < min || len > max {
                self.errors.add(
                    self.field,
                    error(
                        "length",
                        format!("must be between {} and {} characters", min, max),
                    ),
                );
            } else if let Err(e) = not_blank(text) {
                self.errors.add(self.field, e);
            }
        }
        self
    }

    pub(crate) fn email(self, value: &Nullable<String>) -> Self {
        if value.value().is_some_and(|text| !text.validate_email()) {
            self.errors
                .add(self.field, error("email", "must be a valid email address"));
        }
        self
    }
}

pub(crate) fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
