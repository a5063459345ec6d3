use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewUser, User, UserChanges};
use crate::error::DomainError;
use crate::ports::{PasswordService, UserRepository};

use super::RepoResultExt;

const ENTITY: &str = "User";

/// User management.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// Register a user. The email must not be taken.
    pub async fn create(&self, input: NewUser) -> Result<User, DomainError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Duplicate(
                "User with this email already exists".to_string(),
            ));
        }

        let password_digest = input
            .password
            .as_deref()
            .map(|password| self.passwords.hash(password))
            .transpose()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self.users.insert(User::new(input, password_digest)).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Apply a partial update. Changing the email re-checks uniqueness.
    pub async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        if let Some(email) = &changes.email {
            if *email != user.email && self.users.find_by_email(email).await?.is_some() {
                return Err(DomainError::Duplicate(
                    "User with this email already exists".to_string(),
                ));
            }
        }

        user.apply(changes);
        let user = self.users.update(user).await.or_not_found(ENTITY, id)?;
        tracing::info!(user_id = %id, "User updated");
        Ok(user)
    }

    /// Delete a user together with their posts (and, through them, comments).
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.users.exists(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }
        self.users.delete(id).await.or_not_found(ENTITY, id)?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
