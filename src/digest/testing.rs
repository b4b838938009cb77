// ABOUTME: In-crate fakes for the runtime and image sources.
// ABOUTME: Lets digest lookups be tested without a daemon or network.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::ResolveError;
use super::source::{ImageOrigin, ImageSource, ResolvedImage};
use crate::runtime::traits::sealed::Sealed;
use crate::runtime::{ImageError, ImageInfo, ImageInspect};
use crate::types::ImageRef;

/// Runtime that answers from a fixed table.
pub struct FakeRuntime {
    images: HashMap<String, String>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl FakeRuntime {
    pub fn empty() -> Self {
        Self {
            images: HashMap::new(),
            failure: None,
            delay: None,
        }
    }

    pub fn with_image(name: &str, id: &str) -> Self {
        let mut runtime = Self::empty();
        runtime.images.insert(name.to_string(), id.to_string());
        runtime
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::empty()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl Sealed for FakeRuntime {}

#[async_trait]
impl ImageInspect for FakeRuntime {
    async fn inspect_image(&self, image_name: &str) -> Result<ImageInfo, ImageError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref message) = self.failure {
            return Err(ImageError::Runtime(message.clone()));
        }
        self.images
            .get(image_name)
            .map(|id| ImageInfo { id: id.clone() })
            .ok_or_else(|| ImageError::NotFound(image_name.to_string()))
    }
}

/// Shared call counter handed out by [`FakeSource::calls`].
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Source that always finds the same image or always fails.
pub struct FakeSource {
    name: String,
    outcome: Result<String, String>,
    calls: Calls,
}

impl FakeSource {
    pub fn found(name: &str, config: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Ok(config.to_string()),
            calls: Calls::default(),
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Err(message.to_string()),
            calls: Calls::default(),
        }
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

#[async_trait]
impl ImageSource for FakeSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn image(&self, _reference: &ImageRef) -> Result<ResolvedImage, ResolveError> {
        self.calls.0.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(config) => Ok(ResolvedImage::new(ImageOrigin::Daemon, config.clone())),
            Err(message) => Err(ResolveError::Daemon {
                message: message.clone(),
            }),
        }
    }
}
