//! Repository implementations backed by in-process storage.

mod memory;

pub use memory::{InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository};
