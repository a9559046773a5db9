//! Media storage port.

use async_trait::async_trait;
use uuid::Uuid;

/// A stored media object.
#[derive(Debug, Clone)]
pub struct MediaObject {
    pub id: Uuid,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Store for image assets referenced by posts.
///
/// Callers are expected to have validated the payload before storing it;
/// the store itself is format-agnostic.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store a payload, returning its assigned id.
    async fn put(&self, bytes: Vec<u8>, content_type: &'static str) -> Result<Uuid, MediaError>;

    /// Retrieve a stored object: `Ok(None)` when no such id exists.
    async fn get(&self, id: Uuid) -> Result<Option<MediaObject>, MediaError>;
}

/// Media errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Payload is not a decodable image")]
    InvalidImage,

    #[error("Storage failure: {0}")]
    Storage(String),
}
