// ABOUTME: Validated domain types for image references and digests.
// ABOUTME: Parsing is lenient where image names are concerned.

mod digest;
mod image_ref;

pub use digest::{Digest, ParseDigestError};
pub use image_ref::{DEFAULT_REGISTRY, DEFAULT_TAG, ImageRef, ParseImageRefError};
