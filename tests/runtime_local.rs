// ABOUTME: Integration tests against the local Docker/Podman daemon.
// ABOUTME: Skipped when no runtime socket is found; never pulls images.

mod support;

use imgstash::digest::{DaemonSource, ImageOrigin, ImageSource, digest_by_local_daemon};
use imgstash::runtime::{BollardRuntime, ImageError, ImageInspect, detect_local};
use imgstash::types::ImageRef;

/// Get local runtime, skipping test if unavailable.
fn local_runtime() -> Option<BollardRuntime> {
    let info = detect_local(None).ok()?;
    BollardRuntime::connect(&info).ok()
}

/// Skip test if no local runtime available.
macro_rules! require_runtime {
    () => {
        match local_runtime() {
            Some(rt) => rt,
            None => {
                eprintln!("Skipping test: no local container runtime found");
                return;
            }
        }
    };
}

const MISSING_IMAGE: &str = "imgstash-test-image-that-does-not-exist:v999";

#[tokio::test]
async fn inspect_missing_image_is_not_found() {
    support::init_tracing();
    let runtime = require_runtime!();

    match runtime.inspect_image(MISSING_IMAGE).await {
        Err(ImageError::NotFound(name)) => assert_eq!(name, MISSING_IMAGE),
        Err(ImageError::Runtime(e)) => eprintln!("Skipping test: runtime unreachable: {e}"),
        Ok(info) => panic!("unexpected image {info:?}"),
    }
}

#[tokio::test]
async fn digest_of_missing_image_is_none() {
    let runtime = require_runtime!();
    assert_eq!(digest_by_local_daemon(&runtime, MISSING_IMAGE).await, None);
}

#[tokio::test]
async fn present_image_id_matches_daemon_source_digest() {
    let runtime = require_runtime!();

    let Some(id) = digest_by_local_daemon(&runtime, "alpine:latest").await else {
        eprintln!("Skipping test: alpine:latest not present locally");
        return;
    };
    assert!(id.starts_with("sha256:"), "unexpected id {id}");

    let source = DaemonSource::new(runtime);
    let image = ImageRef::parse("alpine:latest").unwrap();
    let resolved = source.image(&image).await.expect("daemon source should find alpine");

    assert_eq!(resolved.origin(), ImageOrigin::Daemon);
    assert_eq!(resolved.config_name().unwrap().to_string(), id);
}
