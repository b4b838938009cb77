// ABOUTME: Local container runtime access for Docker and Podman.
// ABOUTME: Detects the runtime socket and inspects locally stored images.

mod bollard;
mod detection;
pub mod traits;
mod types;

pub use self::bollard::{BollardRuntime, ConnectError};
pub use detection::{DetectionError, detect_local};
pub use traits::{ImageError, ImageInfo, ImageInspect};
pub use types::{RuntimeConfig, RuntimeInfo, RuntimeType};
