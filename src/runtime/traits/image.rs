// ABOUTME: Image inspection trait for container runtimes.
// ABOUTME: Looks up already-pulled images in the runtime's local store.

use super::sealed::Sealed;
use async_trait::async_trait;

/// Metadata the runtime reports for a locally stored image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageInfo {
    /// Runtime-assigned image ID. For Docker and Podman this is the digest of
    /// the image configuration blob.
    pub id: String,
}

/// Image lookup against the runtime's local image store.
#[async_trait]
pub trait ImageInspect: Sealed + Send + Sync {
    /// Inspect an image by name, tag, or ID.
    ///
    /// Returns [`ImageError::NotFound`] when the runtime does not have the image.
    async fn inspect_image(&self, image_name: &str) -> Result<ImageInfo, ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
