// ABOUTME: Best-effort digest lookup against the local container runtime.
// ABOUTME: Bounded by a short timeout; absence and faults both yield None.

use std::time::Duration;

use crate::runtime::{ImageError, ImageInspect};

/// Time budget for a single local runtime lookup.
pub const LOCAL_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Return the runtime-assigned ID of `image_name` if the local runtime has it.
///
/// "Not found" is a normal outcome and returns `None` quietly. Any other fault,
/// including running out of time, is logged and also returns `None`.
pub async fn digest_by_local_daemon(client: &impl ImageInspect, image_name: &str) -> Option<String> {
    digest_by_local_daemon_with_timeout(client, image_name, LOCAL_LOOKUP_TIMEOUT).await
}

/// [`digest_by_local_daemon`] with an explicit time budget.
pub async fn digest_by_local_daemon_with_timeout(
    client: &impl ImageInspect,
    image_name: &str,
    timeout: Duration,
) -> Option<String> {
    // Dropping the timed-out future releases its connection.
    match tokio::time::timeout(timeout, client.inspect_image(image_name)).await {
        Ok(Ok(info)) => Some(info.id),
        Ok(Err(ImageError::NotFound(_))) => {
            tracing::debug!(image = image_name, "image not present in local runtime");
            None
        }
        Ok(Err(e)) => {
            tracing::info!(
                image = image_name,
                error = %e,
                "couldn't find image digest from local runtime"
            );
            None
        }
        Err(_) => {
            tracing::info!(
                image = image_name,
                timeout = ?timeout,
                "local runtime lookup timed out"
            );
            None
        }
    }
}
