//! Media storage and image payload validation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::ports::{MediaError, MediaObject, MediaStore};

/// Check that a payload is a decodable image and return its mime type.
///
/// Both the format sniff and a full decode must succeed; a correct magic
/// number over a corrupt body is not enough.
pub fn validate_image(bytes: &[u8]) -> Result<&'static str, MediaError> {
    let format = image::guess_format(bytes).map_err(|_| MediaError::InvalidImage)?;
    image::load_from_memory_with_format(bytes, format).map_err(|e| {
        tracing::debug!(error = %e, "Rejected undecodable image payload");
        MediaError::InvalidImage
    })?;
    Ok(format.to_mime_type())
}

/// In-memory media store using a HashMap with an async RwLock.
///
/// Note: stored objects are lost on process restart.
#[derive(Default)]
pub struct InMemoryMediaStore {
    objects: RwLock<HashMap<Uuid, MediaObject>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn put(&self, bytes: Vec<u8>, content_type: &'static str) -> Result<Uuid, MediaError> {
        let id = Uuid::new_v4();
        let mut objects = self.objects.write().await;
        objects.insert(
            id,
            MediaObject {
                id,
                content_type,
                bytes,
            },
        );
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<MediaObject>, MediaError> {
        Ok(self.objects.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    pub(crate) fn tiny_png() -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        RgbaImage::new(1, 1)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn valid_png_passes_validation() {
        assert_eq!(validate_image(&tiny_png()).unwrap(), "image/png");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            validate_image(b"definitely not an image"),
            Err(MediaError::InvalidImage)
        ));
    }

    #[test]
    fn truncated_png_is_rejected() {
        // Valid magic number, corrupt body.
        let mut bytes = tiny_png();
        bytes.truncate(12);
        assert!(matches!(
            validate_image(&bytes),
            Err(MediaError::InvalidImage)
        ));
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemoryMediaStore::new();
        let bytes = tiny_png();
        let id = store.put(bytes.clone(), "image/png").await.unwrap();

        let object = store.get(id).await.unwrap().unwrap();
        assert_eq!(object.bytes, bytes);
        assert_eq!(object.content_type, "image/png");

        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
