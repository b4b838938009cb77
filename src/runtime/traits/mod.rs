// ABOUTME: Capability traits for container runtimes.
// ABOUTME: Only image inspection is needed for digest lookups.

mod image;
pub(crate) mod sealed;

pub use image::{ImageError, ImageInfo, ImageInspect};
