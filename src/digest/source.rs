// ABOUTME: Ordered image sources tried in turn to resolve a reference to an image.
// ABOUTME: Default chain is local runtime, registry with ambient credentials, anonymous registry.

use async_trait::async_trait;

use super::ResolveError;
use crate::registry::{Keychain, RegistryAuth, RegistryClient};
use crate::runtime::{BollardRuntime, ConnectError, ImageInspect, RuntimeConfig};
use crate::types::{Digest, ImageRef};

/// Where a resolved image was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    /// The local runtime's image store.
    Daemon,
    /// A remote registry, with or without credentials.
    Registry { authenticated: bool },
}

/// An image located by one of the sources.
///
/// Holds the raw config digest as reported; it is only validated when
/// [`ResolvedImage::config_name`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    origin: ImageOrigin,
    config: String,
}

impl ResolvedImage {
    pub fn new(origin: ImageOrigin, config: impl Into<String>) -> Self {
        Self {
            origin,
            config: config.into(),
        }
    }

    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    /// Digest of the image configuration blob.
    pub fn config_name(&self) -> Result<Digest, ResolveError> {
        Digest::parse(&self.config).map_err(|source| ResolveError::ConfigName {
            value: self.config.clone(),
            source,
        })
    }
}

/// One way of turning a reference into an image.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn image(&self, reference: &ImageRef) -> Result<ResolvedImage, ResolveError>;
}

/// Try each source in order and return the first image found.
///
/// When every source fails, the last failure is returned.
pub async fn resolve_image(
    sources: &[Box<dyn ImageSource>],
    reference: &ImageRef,
) -> Result<ResolvedImage, ResolveError> {
    tracing::info!(image = %reference, "retrieving image");

    let mut last_error = ResolveError::NoSources;
    let mut remaining = sources.len();

    for source in sources {
        remaining -= 1;
        match source.image(reference).await {
            Ok(image) => {
                tracing::info!(image = %reference, source = source.name(), "found image");
                return Ok(image);
            }
            Err(e) => {
                if remaining > 0 {
                    tracing::info!(
                        image = %reference,
                        source = source.name(),
                        error = %e,
                        "lookup failed, trying next source"
                    );
                }
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// The standard chain: local runtime, registry with the given keychain, then
/// the registry anonymously.
pub fn default_sources_with(
    runtime: Option<&RuntimeConfig>,
    keychain: Keychain,
) -> Vec<Box<dyn ImageSource>> {
    let client = RegistryClient::new();
    vec![
        Box::new(DaemonSource::detect(runtime)),
        Box::new(RegistrySource::with_keychain(client.clone(), keychain)),
        Box::new(RegistrySource::anonymous(client)),
    ]
}

/// [`default_sources_with`] using auto-detection and the default keychain.
pub fn default_sources() -> Vec<Box<dyn ImageSource>> {
    default_sources_with(None, Keychain::default())
}

/// Looks the image up in the local runtime's store.
///
/// The runtime ID of an image is the digest of its configuration blob.
pub struct DaemonSource<R> {
    runtime: Result<R, ConnectError>,
}

impl<R: ImageInspect> DaemonSource<R> {
    pub fn new(runtime: R) -> Self {
        Self {
            runtime: Ok(runtime),
        }
    }
}

impl DaemonSource<BollardRuntime> {
    /// Connect to the local runtime. A failed detection is kept and reported
    /// on each lookup, so the chain moves on to the next source.
    pub fn detect(config: Option<&RuntimeConfig>) -> Self {
        Self {
            runtime: BollardRuntime::connect_local(config),
        }
    }
}

#[async_trait]
impl<R: ImageInspect> ImageSource for DaemonSource<R> {
    fn name(&self) -> &str {
        "daemon"
    }

    async fn image(&self, reference: &ImageRef) -> Result<ResolvedImage, ResolveError> {
        let runtime = self.runtime.as_ref().map_err(|e| ResolveError::Daemon {
            message: e.to_string(),
        })?;
        let info = runtime
            .inspect_image(&reference.name())
            .await
            .map_err(|e| ResolveError::Daemon {
                message: e.to_string(),
            })?;
        Ok(ResolvedImage::new(ImageOrigin::Daemon, info.id))
    }
}

enum Credentials {
    Keychain(Keychain),
    Anonymous,
}

/// Reads the manifest from the image's registry.
pub struct RegistrySource {
    client: RegistryClient,
    credentials: Credentials,
}

impl RegistrySource {
    /// Authenticate with whatever the keychain holds for the registry.
    pub fn with_keychain(client: RegistryClient, keychain: Keychain) -> Self {
        Self {
            client,
            credentials: Credentials::Keychain(keychain),
        }
    }

    pub fn anonymous(client: RegistryClient) -> Self {
        Self {
            client,
            credentials: Credentials::Anonymous,
        }
    }
}

#[async_trait]
impl ImageSource for RegistrySource {
    fn name(&self) -> &str {
        match self.credentials {
            Credentials::Keychain(_) => "registry",
            Credentials::Anonymous => "registry (anonymous)",
        }
    }

    async fn image(&self, reference: &ImageRef) -> Result<ResolvedImage, ResolveError> {
        let auth = match &self.credentials {
            Credentials::Keychain(keychain) => keychain.resolve(reference.registry())?,
            Credentials::Anonymous => RegistryAuth::Anonymous,
        };
        let authenticated = !matches!(auth, RegistryAuth::Anonymous);

        let manifest = self
            .client
            .fetch_manifest(reference, &auth)
            .await
            .inspect_err(|e| {
                if authenticated {
                    tracing::warn!(image = %reference, error = %e, "authenticated lookup failed");
                }
            })?;
        tracing::debug!(
            image = %reference,
            manifest = %manifest.manifest_digest,
            config = %manifest.config_digest,
            "fetched manifest"
        );

        Ok(ResolvedImage::new(
            ImageOrigin::Registry { authenticated },
            manifest.config_digest,
        ))
    }
}
