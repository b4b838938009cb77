// ABOUTME: Bollard-based container runtime client.
// ABOUTME: Supports both Docker and Podman via the Docker-compatible API.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{ImageError, ImageInfo, ImageInspect};
use crate::runtime::types::{RuntimeConfig, RuntimeInfo, RuntimeType};
use async_trait::async_trait;
use bollard::Docker;

use super::detection::{DetectionError, detect_local};

/// Request timeout handed to bollard, in seconds. Lookups apply their own,
/// shorter budget on top.
const CLIENT_TIMEOUT_SECS: u64 = 120;

/// Errors connecting to a runtime socket.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("runtime detection failed: {0}")]
    Detection(#[from] DetectionError),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

fn map_image_inspect_error(e: bollard::errors::Error, image_name: &str) -> ImageError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            ImageError::NotFound(image_name.to_string())
        }
        _ => ImageError::Runtime(format!("failed to inspect {}: {}", image_name, e)),
    }
}

/// Container runtime client using bollard.
pub struct BollardRuntime {
    client: Docker,
    runtime_type: RuntimeType,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker, runtime_type: RuntimeType) -> Self {
        Self {
            client,
            runtime_type,
        }
    }

    /// Connect to a container runtime using detected runtime info.
    ///
    /// Connecting does not touch the socket; the first request does.
    pub fn connect(info: &RuntimeInfo) -> Result<Self, ConnectError> {
        let client = Docker::connect_with_unix(
            &info.socket_path,
            CLIENT_TIMEOUT_SECS,
            bollard::API_DEFAULT_VERSION,
        )
        .map_err(|e| ConnectError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(client, info.runtime_type))
    }

    /// Detect the local runtime and connect to it.
    pub fn connect_local(config: Option<&RuntimeConfig>) -> Result<Self, ConnectError> {
        let info = detect_local(config)?;
        tracing::debug!(
            runtime = %info.runtime_type,
            socket = %info.socket_path,
            "connecting to local runtime"
        );
        Self::connect(&info)
    }

    /// Get the runtime type (Docker or Podman).
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }
}

impl Sealed for BollardRuntime {}

#[async_trait]
impl ImageInspect for BollardRuntime {
    async fn inspect_image(&self, image_name: &str) -> Result<ImageInfo, ImageError> {
        let details = self
            .client
            .inspect_image(image_name)
            .await
            .map_err(|e| map_image_inspect_error(e, image_name))?;

        let id = details.id.filter(|id| !id.is_empty()).ok_or_else(|| {
            ImageError::Runtime(format!("runtime returned no ID for {}", image_name))
        })?;

        Ok(ImageInfo { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found() {
        let err = bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message: "No such image: nope:latest".to_string(),
        };
        match map_image_inspect_error(err, "nope:latest") {
            ImageError::NotFound(name) => assert_eq!(name, "nope:latest"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_keeps_detected_runtime_type() {
        let info = RuntimeInfo {
            runtime_type: RuntimeType::Podman,
            socket_path: "/nonexistent/podman.sock".to_string(),
        };
        let runtime = BollardRuntime::connect(&info).unwrap();
        assert_eq!(runtime.runtime_type(), RuntimeType::Podman);
    }

    #[test]
    fn server_error_maps_to_runtime() {
        let err = bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: "boom".to_string(),
        };
        assert!(matches!(
            map_image_inspect_error(err, "alpine"),
            ImageError::Runtime(_)
        ));
    }
}
