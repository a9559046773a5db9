use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group entity - a named topical category that posts may belong to.
///
/// Groups are externally managed reference data: this layer only reads
/// them and attaches posts to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    /// URL-safe identifier, unique, used instead of `id` in group-scoped routes.
    pub slug: String,
    pub description: String,
}

impl Group {
    pub fn new(title: impl Into<String>, slug: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            description: description.into(),
        }
    }
}
