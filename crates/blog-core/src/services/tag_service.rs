use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Tag, TagChanges};
use crate::error::{DomainError, RepoError};
use crate::ports::TagRepository;

use super::RepoResultExt;

const ENTITY: &str = "Tag";

/// Tag management.
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    pub async fn list(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.tags.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Tag, DomainError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn create(&self, name: String) -> Result<Tag, DomainError> {
        self.ensure_name_free(&name).await?;
        let tag = self.tags.insert(Tag::new(name)).await?;
        tracing::info!(tag_id = %tag.id, "Tag created");
        Ok(tag)
    }

    /// Create several tags at once. Either every tag is inserted or none is.
    pub async fn create_bulk(&self, names: Vec<String>) -> Result<Vec<Tag>, DomainError> {
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(DomainError::Duplicate(format!(
                    "Tag name '{}' appears more than once",
                    name
                )));
            }
            self.ensure_name_free(name).await?;
        }

        let tags = self
            .tags
            .insert_many(names.into_iter().map(Tag::new).collect())
            .await?;
        tracing::info!(count = tags.len(), "Tags created in bulk");
        Ok(tags)
    }

    pub async fn update(&self, id: Uuid, changes: TagChanges) -> Result<Tag, DomainError> {
        let mut tag = self.get(id).await?;

        if let Some(name) = changes.name {
            if name != tag.name {
                self.ensure_name_free(&name).await?;
            }
            tag.name = name;
        }

        let tag = self.tags.update(tag).await.or_not_found(ENTITY, id)?;
        tracing::info!(tag_id = %id, "Tag updated");
        Ok(tag)
    }

    /// Delete a tag that no post refers to.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let tag = self.get(id).await?;

        if self.tags.count_posts(tag.id).await? > 0 {
            return Err(DomainError::Conflict(
                "Cannot delete tag that is associated with posts. First remove the tag from all posts."
                    .to_string(),
            ));
        }

        // A post may have linked the tag since the count; the foreign key refuses then.
        self.tags.delete(id).await.map_err(|err| match err {
            RepoError::Constraint(_) => {
                DomainError::Conflict("Tag is still associated with posts".to_string())
            }
            RepoError::NotFound => DomainError::not_found(ENTITY, id),
            other => other.into(),
        })?;
        tracing::info!(tag_id = %id, "Tag deleted");
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str) -> Result<(), DomainError> {
        if self.tags.find_by_name(name).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "Tag with name '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::ports::BaseRepository;

    /// Tag store in a HashMap; `linked` ids report one post each.
    #[derive(Default)]
    struct InMemoryTags {
        rows: Mutex<HashMap<Uuid, Tag>>,
        linked: Mutex<HashSet<Uuid>>,
    }

    #[async_trait]
    impl BaseRepository<Tag, Uuid> for InMemoryTags {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn exists(&self, id: Uuid) -> Result<bool, RepoError> {
            Ok(self.rows.lock().unwrap().contains_key(&id))
        }

        async fn insert(&self, tag: Tag) -> Result<Tag, RepoError> {
            self.rows.lock().unwrap().insert(tag.id, tag.clone());
            Ok(tag)
        }

        async fn update(&self, tag: Tag) -> Result<Tag, RepoError> {
            self.insert(tag).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.rows
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl TagRepository for InMemoryTags {
        async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
            let mut tags: Vec<Tag> = self.rows.lock().unwrap().values().cloned().collect();
            tags.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(tags)
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|t| t.name == name)
                .cloned())
        }

        async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, RepoError> {
            let rows = self.rows.lock().unwrap();
            Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
        }

        async fn insert_many(&self, tags: Vec<Tag>) -> Result<Vec<Tag>, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            for tag in &tags {
                rows.insert(tag.id, tag.clone());
            }
            Ok(tags)
        }

        async fn count_posts(&self, tag_id: Uuid) -> Result<u64, RepoError> {
            Ok(u64::from(self.linked.lock().unwrap().contains(&tag_id)))
        }
    }

    fn service() -> (TagService, Arc<InMemoryTags>) {
        let repo = Arc::new(InMemoryTags::default());
        (TagService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_rejects_taken_name() {
        let (service, _) = service();
        service.create("rust".to_string()).await.unwrap();

        let result = service.create("rust".to_string()).await;

        assert!(matches!(result, Err(DomainError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_bulk_duplicate_in_batch_inserts_nothing() {
        let (service, repo) = service();

        let result = service
            .create_bulk(vec!["a-tag".to_string(), "b-tag".to_string(), "a-tag".to_string()])
            .await;

        assert!(matches!(result, Err(DomainError::Duplicate(_))));
        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_linked_tag_is_conflict() {
        let (service, repo) = service();
        let tag = service.create("rust".to_string()).await.unwrap();
        repo.linked.lock().unwrap().insert(tag.id);

        let result = service.delete(tag.id).await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert!(repo.rows.lock().unwrap().contains_key(&tag.id));
    }

    #[tokio::test]
    async fn test_update_without_name_keeps_tag() {
        let (service, _) = service();
        let tag = service.create("rust".to_string()).await.unwrap();

        let updated = service.update(tag.id, TagChanges::default()).await.unwrap();

        assert_eq!(updated.name, "rust");
    }
}
