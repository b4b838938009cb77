// ABOUTME: Image digest resolution against the local runtime and remote registries.
// ABOUTME: Lookups are advisory: failures are logged and reported as None.

mod local;
pub mod source;
#[cfg(test)]
pub(crate) mod testing;

pub use local::{LOCAL_LOOKUP_TIMEOUT, digest_by_local_daemon, digest_by_local_daemon_with_timeout};
pub use source::{
    DaemonSource, ImageOrigin, ImageSource, RegistrySource, ResolvedImage, default_sources,
    default_sources_with, resolve_image,
};

use crate::registry::RegistryError;
use crate::types::{ImageRef, ParseDigestError, ParseImageRefError};

/// Why an image could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid image reference: {0}")]
    InvalidReference(#[from] ParseImageRefError),

    #[error("local runtime lookup failed: {message}")]
    Daemon { message: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("no image sources configured")]
    NoSources,

    #[error("invalid config digest {value:?}: {source}")]
    ConfigName {
        value: String,
        source: ParseDigestError,
    },
}

/// Resolve the config digest of `image_name` through the default source chain.
///
/// Returns the hex part of the digest, or `None` when the name does not parse,
/// no source has the image, or the digest cannot be extracted.
pub async fn digest_by_retrieve(image_name: &str) -> Option<String> {
    digest_by_retrieve_with(&default_sources(), image_name).await
}

/// [`digest_by_retrieve`] with a caller-supplied source chain.
pub async fn digest_by_retrieve_with(
    sources: &[Box<dyn ImageSource>],
    image_name: &str,
) -> Option<String> {
    let reference = match ImageRef::parse(image_name) {
        Ok(reference) => reference,
        Err(e) => {
            tracing::info!(image = image_name, error = %e, "error parsing image name");
            return None;
        }
    };

    let image = match resolve_image(sources, &reference).await {
        Ok(image) => image,
        Err(e) => {
            tracing::info!(image = image_name, error = %e, "error retrieving image");
            return None;
        }
    };

    match image.config_name() {
        Ok(digest) => Some(digest.hex().to_string()),
        Err(e) => {
            tracing::info!(image = image_name, error = %e, "error getting image config name");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeSource;
    use super::*;

    #[tokio::test]
    async fn returns_hex_of_config_digest() {
        let sources: Vec<Box<dyn ImageSource>> = vec![Box::new(FakeSource::found(
            "daemon",
            "sha256:0123456789abcdef",
        ))];
        assert_eq!(
            digest_by_retrieve_with(&sources, "nginx:1.25").await.as_deref(),
            Some("0123456789abcdef")
        );
    }

    #[tokio::test]
    async fn unresolvable_image_returns_none() {
        let sources: Vec<Box<dyn ImageSource>> = vec![
            Box::new(FakeSource::failing("daemon", "no such image")),
            Box::new(FakeSource::failing("registry", "denied")),
            Box::new(FakeSource::failing("anonymous", "manifest unknown")),
        ];
        assert_eq!(digest_by_retrieve_with(&sources, "nginx:1.25").await, None);
    }

    #[tokio::test]
    async fn unparsable_name_returns_none_without_lookup() {
        let source = FakeSource::found("daemon", "sha256:abcd");
        let calls = source.calls();
        let sources: Vec<Box<dyn ImageSource>> = vec![Box::new(source)];

        assert_eq!(digest_by_retrieve_with(&sources, "not an image!").await, None);
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn broken_config_digest_returns_none() {
        let sources: Vec<Box<dyn ImageSource>> =
            vec![Box::new(FakeSource::found("daemon", "sha256:"))];
        assert_eq!(digest_by_retrieve_with(&sources, "nginx").await, None);
    }
}
