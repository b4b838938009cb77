// ABOUTME: Ambient registry credential discovery from the Docker config file.
// ABOUTME: Resolves per-registry logins from $DOCKER_CONFIG/config.json or ~/.docker/config.json.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use oci_distribution::secrets::RegistryAuth;
use serde::Deserialize;

use super::RegistryError;
use crate::types::DEFAULT_REGISTRY;

/// Names Docker Hub is stored under in `config.json`.
const DOCKER_HUB_ALIASES: &[&str] = &[
    DEFAULT_REGISTRY,
    "index.docker.io",
    "registry-1.docker.io",
];

#[derive(Debug, Default, Deserialize)]
struct DockerConfigFile {
    #[serde(default)]
    auths: HashMap<String, AuthEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthEntry {
    #[serde(default)]
    auth: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Looks up registry credentials the way the Docker CLI stores them.
///
/// Credential helpers (`credsStore`, `credHelpers`) are not executed; only
/// inline `auths` entries are read.
#[derive(Debug, Clone)]
pub struct Keychain {
    path: Option<PathBuf>,
}

impl Default for Keychain {
    /// Keychain backed by `$DOCKER_CONFIG/config.json`, falling back to
    /// `~/.docker/config.json`.
    fn default() -> Self {
        let path = std::env::var_os("DOCKER_CONFIG")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".docker")))
            .map(|dir| dir.join("config.json"));
        Self { path }
    }
}

impl Keychain {
    /// Keychain backed by an explicit `config.json`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Resolve credentials for `registry`.
    ///
    /// A missing file or a registry without an entry resolves to anonymous
    /// access. A file that cannot be read or parsed is an error.
    pub fn resolve(&self, registry: &str) -> Result<RegistryAuth, RegistryError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(RegistryAuth::Anonymous);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no docker config, using anonymous access");
            return Ok(RegistryAuth::Anonymous);
        }

        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Credentials {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: DockerConfigFile =
            serde_json::from_str(&content).map_err(|e| RegistryError::Credentials {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let wanted = normalize_registry(registry);
        let entry = file
            .auths
            .iter()
            .find(|(key, _)| registries_match(&normalize_registry(key), &wanted))
            .map(|(_, entry)| entry);

        match entry {
            Some(entry) => entry.to_auth().map_err(|message| RegistryError::Credentials {
                path: path.to_path_buf(),
                message: format!("{}: {}", registry, message),
            }),
            None => Ok(RegistryAuth::Anonymous),
        }
    }
}

impl AuthEntry {
    fn to_auth(&self) -> Result<RegistryAuth, String> {
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            return Ok(RegistryAuth::Basic(username.clone(), password.clone()));
        }

        let Some(encoded) = self.auth.as_deref().filter(|a| !a.is_empty()) else {
            return Ok(RegistryAuth::Anonymous);
        };
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| format!("invalid base64 in auth field: {}", e))?;
        let decoded =
            String::from_utf8(decoded).map_err(|_| "auth field is not UTF-8".to_string())?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| "auth field is not user:password".to_string())?;

        Ok(RegistryAuth::Basic(
            username.to_string(),
            password.to_string(),
        ))
    }
}

/// Strip scheme and path so `https://index.docker.io/v1/` becomes `index.docker.io`.
fn normalize_registry(registry: &str) -> String {
    let without_scheme = registry
        .strip_prefix("https://")
        .or_else(|| registry.strip_prefix("http://"))
        .unwrap_or(registry);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_ascii_lowercase()
}

fn registries_match(a: &str, b: &str) -> bool {
    a == b || (DOCKER_HUB_ALIASES.contains(&a) && DOCKER_HUB_ALIASES.contains(&b))
}
