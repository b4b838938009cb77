// ABOUTME: Remote registry access for digest resolution.
// ABOUTME: Wraps the manifest client and Docker config credential lookup.

mod client;
mod keychain;

pub use client::{RegistryClient, RemoteManifest};
pub use keychain::Keychain;
pub use oci_distribution::secrets::RegistryAuth;

use std::path::PathBuf;

/// Errors talking to a registry or reading credentials.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid reference {reference}: {message}")]
    InvalidReference { reference: String, message: String },

    #[error("registry {registry}: {message}")]
    Request { registry: String, message: String },

    #[error("failed to read credentials from {}: {message}", path.display())]
    Credentials { path: PathBuf, message: String },
}
