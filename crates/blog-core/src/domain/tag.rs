use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - shared between posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// Partial update of a tag.
#[derive(Debug, Clone, Default)]
pub struct TagChanges {
    pub name: Option<String>,
}
