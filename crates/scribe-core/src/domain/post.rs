use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of characters shown as a post's display title.
pub const TITLE_LENGTH: usize = 30;

/// Post entity - a single authored text entry, optionally grouped and illustrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    /// Set once at creation, never updated afterwards.
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub image_id: Option<Uuid>,
}

/// The only fields an edit is allowed to touch.
///
/// `id`, `author_id` and `pub_date` are immutable by construction: there is
/// no way to express a change to them.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_id: Option<Uuid>,
}

impl Post {
    /// Create a new post with generated ID and publication timestamp.
    pub fn new(
        author_id: Uuid,
        text: String,
        group_id: Option<Uuid>,
        image_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            pub_date: Utc::now(),
            author_id,
            group_id,
            image_id,
        }
    }

    /// Display title: the first [`TITLE_LENGTH`] characters of the text.
    ///
    /// Shorter texts are returned whole; truncation is character-based,
    /// never splitting a multi-byte character.
    pub fn preview_title(&self) -> String {
        self.text.chars().take(TITLE_LENGTH).collect()
    }

    /// Apply an edit, leaving `id`, `author_id` and `pub_date` untouched.
    pub fn apply(&mut self, changes: PostChanges) {
        self.text = changes.text;
        self.group_id = changes.group_id;
        self.image_id = changes.image_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_title_truncates_long_text() {
        let post = Post::new(Uuid::new_v4(), "a".repeat(100), None, None);
        assert_eq!(post.preview_title().chars().count(), TITLE_LENGTH);
    }

    #[test]
    fn preview_title_returns_short_text_whole() {
        let post = Post::new(Uuid::new_v4(), "short".to_string(), None, None);
        assert_eq!(post.preview_title(), "short");
    }

    #[test]
    fn preview_title_respects_char_boundaries() {
        // 40 multi-byte characters; byte-indexed slicing would panic here.
        let post = Post::new(Uuid::new_v4(), "я".repeat(40), None, None);
        assert_eq!(post.preview_title(), "я".repeat(30));
    }

    #[test]
    fn apply_never_touches_identity_fields() {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, "original".to_string(), None, None);
        let (id, pub_date) = (post.id, post.pub_date);

        post.apply(PostChanges {
            text: "edited".to_string(),
            group_id: Some(Uuid::new_v4()),
            image_id: None,
        });

        assert_eq!(post.text, "edited");
        assert_eq!(post.id, id);
        assert_eq!(post.author_id, author);
        assert_eq!(post.pub_date, pub_date);
    }
}
