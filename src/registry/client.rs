// ABOUTME: Registry client that reads image manifests via oci-distribution.
// ABOUTME: Only the manifest is fetched; the config digest comes from its config descriptor.

use oci_distribution::client::{ClientConfig, ClientProtocol};
use oci_distribution::manifest::{ImageIndexEntry, OciImageManifest};
use oci_distribution::secrets::RegistryAuth;
use oci_distribution::{Client, Reference};

use super::RegistryError;
use crate::types::ImageRef;

/// Manifest facts needed for digest resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteManifest {
    /// Digest of the manifest itself, as reported by the registry.
    pub manifest_digest: String,
    /// Digest of the image configuration blob, from the config descriptor.
    pub config_digest: String,
}

/// Thin wrapper over an `oci-distribution` client.
#[derive(Clone)]
pub struct RegistryClient {
    client: Client,
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryClient {
    /// HTTPS client resolving multi-arch indexes to Linux on the host's
    /// architecture.
    pub fn new() -> Self {
        let config = ClientConfig {
            protocol: ClientProtocol::Https,
            platform_resolver: Some(Box::new(linux_platform_resolver)),
            ..Default::default()
        };
        Self {
            client: Client::new(config),
        }
    }

    /// Fetch the manifest for `reference` and return its digests.
    pub async fn fetch_manifest(
        &self,
        reference: &ImageRef,
        auth: &RegistryAuth,
    ) -> Result<RemoteManifest, RegistryError> {
        let oci_ref = to_oci_reference(reference)?;

        tracing::debug!(reference = %reference, "fetching manifest from registry");

        let (manifest, manifest_digest): (OciImageManifest, String) = self
            .client
            .pull_image_manifest(&oci_ref, auth)
            .await
            .map_err(|e| RegistryError::Request {
                registry: reference.registry().to_string(),
                message: e.to_string(),
            })?;

        Ok(RemoteManifest {
            manifest_digest,
            config_digest: manifest.config.digest,
        })
    }
}

/// Pick the Linux entry for the host architecture from an image index.
///
/// Runtimes run Linux images even on macOS hosts, so the host OS is ignored.
fn linux_platform_resolver(manifests: &[ImageIndexEntry]) -> Option<String> {
    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        other => other,
    };

    manifests
        .iter()
        .find(|entry| {
            entry
                .platform
                .as_ref()
                .is_some_and(|p| p.os == "linux" && p.architecture == arch)
        })
        .map(|entry| entry.digest.clone())
}

/// Convert an ImageRef to an oci-distribution Reference.
fn to_oci_reference(reference: &ImageRef) -> Result<Reference, RegistryError> {
    let ref_str = reference.name();
    ref_str
        .parse::<Reference>()
        .map_err(|e| RegistryError::InvalidReference {
            reference: ref_str.clone(),
            message: e.to_string(),
        })
}
