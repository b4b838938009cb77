// ABOUTME: On-disk image cache maintenance.
// ABOUTME: Deletes cached image files and prunes directories left empty.

mod path;
mod prune;

pub use path::{cache_identifier, sanitize_cache_path};
pub use prune::ImageCache;

use std::io;
use std::path::PathBuf;

use crate::config::default_cache_dir;

/// Errors from cache mutation. Any of these aborts the operation.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cannot determine the image cache directory (no home directory)")]
    NoCacheDir,

    #[error("failed to delete {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove directory {}: {source}", path.display())]
    RemoveDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl CacheError {
    /// Underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            CacheError::NoCacheDir => None,
            CacheError::Remove { source, .. }
            | CacheError::ReadDir { source, .. }
            | CacheError::RemoveDir { source, .. } => Some(source),
            CacheError::Walk { source, .. } => source.io_error(),
        }
    }
}

/// Delete `images` from the default image cache, then prune empty directories.
pub fn delete_from_image_cache_dir<S: AsRef<str>>(images: &[S]) -> Result<(), CacheError> {
    let root = default_cache_dir().ok_or(CacheError::NoCacheDir)?;
    ImageCache::new(root).delete(images)
}
