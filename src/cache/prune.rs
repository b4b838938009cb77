// ABOUTME: Deletion of cached image files and sweeping of empty directories.
// ABOUTME: Deletion is fail-fast; the sweep is a single pre-order pass under the root.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::CacheError;
use super::path::sanitize_cache_path;

/// An on-disk image cache rooted at a fixed directory.
///
/// Not safe against concurrent deleters on the same root; callers are
/// expected to serialize access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCache {
    root: PathBuf,
}

impl ImageCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Confined on-disk path for `identifier`.
    pub fn path_for(&self, identifier: &str) -> PathBuf {
        sanitize_cache_path(&self.root, identifier)
    }

    /// Delete each listed entry, then sweep empty directories.
    ///
    /// The first failed deletion, including a missing file, aborts: later
    /// entries are left alone and no sweep runs.
    pub fn delete<S: AsRef<str>>(&self, images: &[S]) -> Result<(), CacheError> {
        for image in images {
            let path = self.path_for(image.as_ref());
            tracing::info!(path = %path.display(), "deleting image in cache");
            std::fs::remove_file(&path).map_err(|source| CacheError::Remove {
                path: path.clone(),
                source,
            })?;
        }
        self.clean()
    }

    /// Remove every empty directory under the root, leaving the root itself.
    ///
    /// Directories are visited parents first, so a parent emptied by removing
    /// its last child stays until the next sweep. A missing root is a no-op;
    /// any directory that cannot be listed, the root included, aborts.
    pub fn clean(&self) -> Result<(), CacheError> {
        // The walk never yields the root, so list it here
        match std::fs::read_dir(&self.root) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(CacheError::ReadDir {
                    path: self.root.clone(),
                    source,
                });
            }
        }

        let mut walker = WalkDir::new(&self.root).min_depth(1).into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                    let message = e.to_string();
                    match e.into_io_error() {
                        Some(source) if source.kind() != io::ErrorKind::NotFound => {
                            return Err(CacheError::ReadDir { path, source });
                        }
                        _ => {
                            // Already gone
                            tracing::debug!(
                                path = %path.display(),
                                error = %message,
                                "skipping cache entry"
                            );
                            continue;
                        }
                    }
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let mut children = match std::fs::read_dir(path) {
                Ok(children) => children,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(CacheError::ReadDir {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            };

            if children.next().is_none() {
                tracing::debug!(path = %path.display(), "removing empty cache directory");
                std::fs::remove_dir(path).map_err(|source| CacheError::RemoveDir {
                    path: path.to_path_buf(),
                    source,
                })?;
                walker.skip_current_dir();
            }
        }

        Ok(())
    }

    /// Identifiers of every cached file, `/`-separated and sorted.
    ///
    /// A missing root is an empty cache.
    pub fn list(&self) -> Result<Vec<String>, CacheError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut identifiers = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(|source| CacheError::Walk {
                path: self.root.clone(),
                source,
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            let identifier = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            identifiers.push(identifier);
        }

        identifiers.sort();
        Ok(identifiers)
    }
}
