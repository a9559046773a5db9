//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::domain::Group;
use scribe_core::ports::{GroupRepository, MediaStore, PostRepository, UserRepository};
use scribe_infra::media::InMemoryMediaStore;
use scribe_infra::repository::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use scribe_infra::database::{
    DatabaseConnections, PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub users: Arc<dyn UserRepository>,
    pub media: Arc<dyn MediaStore>,
    /// Posts per listing page, fixed at startup.
    pub page_size: usize,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let db = connections.main;
                    return Self {
                        posts: Arc::new(PostgresPostRepository::new(db.clone())),
                        groups: Arc::new(PostgresGroupRepository::new(db.clone())),
                        users: Arc::new(PostgresUserRepository::new(db)),
                        media: Arc::new(InMemoryMediaStore::new()),
                        page_size: config.page_size,
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory storage.",
                        e
                    );
                }
            }
        }

        if config.database.is_none() {
            tracing::warn!("DATABASE_URL not set. Running on in-memory storage.");
        }

        Self::in_memory(config.page_size, default_groups())
    }

    /// State backed entirely by in-memory adapters, with the given groups
    /// seeded as reference data.
    pub fn in_memory(page_size: usize, groups: Vec<Group>) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            groups: Arc::new(InMemoryGroupRepository::with_groups(groups)),
            users: Arc::new(InMemoryUserRepository::new()),
            media: Arc::new(InMemoryMediaStore::new()),
            page_size,
        }
    }
}

/// Starter groups for in-memory mode, where no admin tooling exists to
/// create them.
fn default_groups() -> Vec<Group> {
    vec![
        Group::new("General", "general", "Anything goes"),
        Group::new("Travel", "travel", "Places and journeys"),
        Group::new("Cooking", "cooking", "Recipes and kitchen notes"),
    ]
}
