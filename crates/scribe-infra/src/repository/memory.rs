//! In-memory repositories - the default storage when no database is
//! configured, and the storage the test suites run against.
//!
//! Posts live in a map keyed by id; listings sort on read, most recent
//! first. Note: data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Group, Post, PostChanges, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{GroupRepository, PostRepository, UserRepository};

fn by_recency(posts: &mut [Post]) {
    // Id as tie-breaker keeps the order deterministic for same-instant posts.
    posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect(&self, filter: impl Fn(&Post) -> bool) -> Vec<Post> {
        let posts = self.posts.read().await;
        let mut matched: Vec<Post> = posts.values().filter(|p| filter(p)).cloned().collect();
        by_recency(&mut matched);
        matched
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|_| true).await)
    }

    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|p| p.group_id == Some(group_id)).await)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|p| p.author_id == author_id).await)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().filter(|p| p.author_id == author_id).count() as u64)
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.apply(changes);
        Ok(post.clone())
    }
}

/// In-memory group repository. Groups are reference data, seeded at
/// construction and read-only afterwards.
#[derive(Default)]
pub struct InMemoryGroupRepository {
    groups: RwLock<HashMap<Uuid, Group>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups(groups: Vec<Group>) -> Self {
        Self {
            groups: RwLock::new(groups.into_iter().map(|g| (g.id, g)).collect()),
        }
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let groups = self.groups.read().await;
        let mut all: Vec<Group> = groups.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        Ok(self.groups.read().await.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.groups.read().await;
        Ok(groups.values().find(|g| g.slug == slug).cloned())
    }
}

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("username already taken".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn post_at(author: Uuid, group: Option<Uuid>, minutes_ago: i64) -> Post {
        let mut post = Post::new(author, format!("post from {minutes_ago}m ago"), group, None);
        post.pub_date = Utc::now() - Duration::minutes(minutes_ago);
        post
    }

    #[tokio::test]
    async fn list_recent_orders_newest_first() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        for minutes_ago in [30, 5, 90] {
            repo.create(post_at(author, None, minutes_ago)).await.unwrap();
        }

        let posts = repo.list_recent().await.unwrap();
        let dates: Vec<_> = posts.iter().map(|p| p.pub_date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
        assert_eq!(posts.len(), 3);
    }

    #[tokio::test]
    async fn group_listing_only_contains_that_group() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let group = Uuid::new_v4();
        let other = Uuid::new_v4();
        repo.create(post_at(author, Some(group), 1)).await.unwrap();
        repo.create(post_at(author, Some(other), 2)).await.unwrap();
        repo.create(post_at(author, None, 3)).await.unwrap();

        let posts = repo.list_by_group(group).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts.iter().all(|p| p.group_id == Some(group)));
    }

    #[tokio::test]
    async fn author_listing_and_count_agree() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        for minutes_ago in [1, 2] {
            repo.create(post_at(author, None, minutes_ago)).await.unwrap();
        }
        repo.create(post_at(stranger, None, 3)).await.unwrap();

        assert_eq!(repo.list_by_author(author).await.unwrap().len(), 2);
        assert_eq!(repo.count_by_author(author).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn update_edits_fields_without_changing_count() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let post = repo.create(post_at(author, None, 1)).await.unwrap();

        let group = Uuid::new_v4();
        let updated = repo
            .update(
                post.id,
                PostChanges {
                    text: "edited".to_string(),
                    group_id: Some(group),
                    image_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.text, "edited");
        assert_eq!(updated.group_id, Some(group));
        assert_eq!(updated.pub_date, post.pub_date);
        assert_eq!(repo.count_by_author(author).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let result = repo.update(Uuid::new_v4(), PostChanges::default()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn group_lookup_by_slug() {
        let repo = InMemoryGroupRepository::with_groups(vec![
            Group::new("Travel", "travel", "Places and journeys"),
            Group::new("Cooking", "cooking", "Recipes"),
        ]);

        let group = repo.find_by_slug("travel").await.unwrap().unwrap();
        assert_eq!(group.title, "Travel");
        assert!(repo.find_by_slug("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("leo".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let result = repo
            .create(User::new("leo".to_string(), "other".to_string()))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
