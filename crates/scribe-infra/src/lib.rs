//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//! This crate contains the repositories, media store and auth services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory adapters only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod media;
pub mod repository;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use media::InMemoryMediaStore;
pub use repository::{InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository};

pub use database::DatabaseConnections;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtTokenService};
