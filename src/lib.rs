// ABOUTME: Library root for imgstash - image digest lookup and image cache pruning.
// ABOUTME: The CLI binary is in main.rs.

pub mod cache;
pub mod config;
pub mod digest;
pub mod error;
pub mod registry;
pub mod runtime;
pub mod types;

pub use cache::delete_from_image_cache_dir;
pub use digest::{digest_by_local_daemon, digest_by_retrieve};
