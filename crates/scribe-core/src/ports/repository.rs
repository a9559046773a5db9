//! Repository ports - the named query/command operations handlers rely on.
//!
//! None of these operations perform authorization; ownership and identity
//! checks are the caller's responsibility.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Post, PostChanges, User};
use crate::error::RepoError;

/// Post repository.
///
/// Every listing operation returns posts ordered by `pub_date` descending
/// (most recent first).
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, most recent first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts belonging to one group, most recent first.
    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts by one author, most recent first.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Raw lookup: `Ok(None)` when no such post exists.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Total number of posts by the given author.
    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError>;

    /// Persist a new post.
    async fn create(&self, post: Post) -> Result<Post, RepoError>;

    /// Apply an edit to an existing post. Only `text`, `group_id` and
    /// `image_id` can change. Fails with [`RepoError::NotFound`] if the
    /// post does not exist.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;
}

/// Group repository - read-only reference data for this layer.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Group>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;
}

/// User repository - the identity lookup side of the identity provider.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user. Fails with [`RepoError::Constraint`] on a
    /// duplicate username.
    async fn create(&self, user: User) -> Result<User, RepoError>;
}
