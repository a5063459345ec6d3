use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, Tag};

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(author_id: Uuid, slug: String, title: String, content: String, published: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            slug,
            title,
            content,
            published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and content, and the optional fields that were supplied.
    pub fn apply(&mut self, changes: &PostChanges) {
        self.title = changes.title.clone();
        self.content = changes.content.clone();
        if let Some(slug) = &changes.slug {
            self.slug = slug.clone();
        }
        if let Some(published) = changes.published {
            self.published = published;
        }
        self.updated_at = Utc::now();
    }
}

/// A post together with its tags and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetails {
    pub post: Post,
    pub tags: Vec<Tag>,
    pub comments: Vec<Comment>,
}

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub tag_ids: Vec<Uuid>,
}

/// Update of a post.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    pub published: Option<bool>,
    /// `None` keeps the current tags, `Some` replaces the whole set.
    pub tag_ids: Option<Vec<Uuid>>,
}

/// Optional predicates for listing posts. Every `None` matches all posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub author_id: Option<Uuid>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
    pub tag_id: Option<Uuid>,
    pub title_contains: Option<String>,
}

impl PostFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_title_and_content_only() {
        let mut post = Post::new(
            Uuid::new_v4(),
            "first-post".to_string(),
            "First".to_string(),
            "Some long enough content".to_string(),
            false,
        );
        let created_at = post.created_at;

        post.apply(&PostChanges {
            title: "Renamed".to_string(),
            content: "Rewritten content body".to_string(),
            slug: None,
            published: Some(true),
            tag_ids: None,
        });

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.content, "Rewritten content body");
        assert_eq!(post.slug, "first-post");
        assert!(post.published);
        assert_eq!(post.created_at, created_at);
        assert!(post.updated_at >= created_at);
    }

    #[test]
    fn test_filter_is_empty() {
        assert!(PostFilter::default().is_empty());

        let filter = PostFilter {
            author_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
